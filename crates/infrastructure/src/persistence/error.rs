//! Shared error mapping for sqlx persistence layer

use application::error::ApplicationError;

/// Map a sqlx error to an application-layer error
pub fn map_sqlx_error(e: sqlx::Error) -> ApplicationError {
    match e {
        sqlx::Error::RowNotFound => {
            ApplicationError::NotFound("Database record not found".to_string())
        },
        unavailable @ (sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut) => {
            ApplicationError::Storage(format!("Database unavailable: {unavailable}"))
        },
        sqlx::Error::Database(db_err) => {
            ApplicationError::Storage(format!("Database error: {db_err}"))
        },
        other => ApplicationError::Internal(format!("Database error: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(map_sqlx_error(sqlx::Error::RowNotFound).is_not_found());
    }

    #[test]
    fn closed_pool_maps_to_storage() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolClosed),
            ApplicationError::Storage(_)
        ));
    }
}
