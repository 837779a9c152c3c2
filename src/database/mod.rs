pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod query_builder;
pub mod repository;

pub use manager::DatabaseError;
pub use memory::MemoryCatalog;
pub use postgres::PgCatalogRepository;
pub use query_builder::{CatalogTable, FieldValue, QueryBuildError, UpdateBuilder, UpdateStatement};
pub use repository::CatalogRepository;
