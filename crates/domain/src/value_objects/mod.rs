//! Value objects shared by the catalog entities

mod entity_id;

pub use entity_id::EntityId;
