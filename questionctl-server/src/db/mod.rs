//! Database layer - connection pool, migrations and question stores
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections by default) - no Arc<Mutex<Connection>>
//! - Rely on DB constraints, handle conflicts - no check-then-insert
//! - Transactions for multi-step operations

pub mod memory;
pub mod migrations;
pub mod pool;
pub mod postgres;
pub mod store;

pub use memory::MemoryQuestionStore;
pub use migrations::{run_migrations, MIGRATOR};
pub use pool::{create_pool, create_pool_with_options, DEFAULT_DATABASE_URL, DEFAULT_MAX_CONNECTIONS};
pub use postgres::PgQuestionStore;
pub use store::{DbError, QuestionStore};
