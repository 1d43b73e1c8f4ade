//! Background tasks for the HTTP presentation layer

mod database_reconnect;

pub use database_reconnect::spawn_database_reconnect_task;
