pub mod connection;
pub mod models;
pub mod service;

pub use connection::{get_pool, init_schema, DbPool, StoreError};
pub use models::*;
