//! Starting contents of the fallback store

use domain::{Book, BookDraft, EntityId, Product, Resource};

/// Books the fallback list starts with
pub fn seed_books() -> Vec<Book> {
    vec![Book::from_draft(
        EntityId::generate(),
        BookDraft {
            title: "To Kill a Mockingbird".to_string(),
            author: "Harper Lee".to_string(),
            genre: "Fiction".to_string(),
            published_year: 1960,
            price: 12.99,
            in_stock: true,
            pages: 336,
            publisher: "J. B. Lippincott & Co.".to_string(),
        },
    )]
}

/// Products the fallback list starts with
pub fn seed_products() -> Vec<Product> {
    vec![
        product(
            "1",
            "Laptop",
            "High-performance laptop with 16GB RAM",
            1200.0,
            "electronics",
            true,
        ),
        product(
            "2",
            "Smartphone",
            "Latest model with 128GB storage",
            800.0,
            "electronics",
            true,
        ),
        product(
            "3",
            "Coffee Maker",
            "Programmable coffee maker with timer",
            50.0,
            "kitchen",
            false,
        ),
    ]
}

fn product(
    id: &str,
    name: &str,
    description: &str,
    price: f64,
    category: &str,
    in_stock: bool,
) -> Product {
    Product {
        id: EntityId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        price,
        category: category.to_string(),
        in_stock,
    }
}
