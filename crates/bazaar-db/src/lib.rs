//! Bazaar DB - Database abstractions
//!
//! SQLx-based persistence for the records the auth layer reads: regular
//! users, the super-administrator, store ownership and the audit log.
//!
//! # Example
//!
//! ```rust,ignore
//! use bazaar_db::{create_pool, Repositories, UserRepository};
//!
//! let pool = create_pool("postgres://localhost/bazaar").await?;
//! let repos = Repositories::new(pool);
//!
//! let user = repos.users.find_by_email("ana@example.com").await?;
//! ```

pub mod error;
pub mod models;
pub mod pg;
pub mod pool;
pub mod repo;

pub use error::{DbError, DbResult};
pub use models::*;
pub use pg::Repositories;
pub use pool::{create_pool, create_pool_with_options, DbPool, PoolOptions};
pub use repo::*;
