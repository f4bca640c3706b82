//! `PostgreSQL` adapters for board persistence.

mod connection;
mod models;
mod repository;
mod schema;

pub use connection::{BoardPgPool, build_pool};
pub use repository::PostgresBoardRepository;
