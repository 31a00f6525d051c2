//! Repository implementations for database access.
//!
//! Each repository wraps a SQLx connection, builds its queries with bound parameters and returns
//! records from [`crate::db::models`].
//!
//! ```ignore
//! use jlcsearch::db::handlers::{Repository, VoltageRegulators, voltage_regulators::VoltageRegulatorFilter};
//!
//! async fn example(pool: &sqlx::SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut conn = pool.acquire().await?;
//!     let mut repo = VoltageRegulators::new(&mut conn);
//!
//!     let ldos = repo.list(&VoltageRegulatorFilter::default().with_is_ldo(true)).await?;
//!     let packages = repo.list_packages().await?;
//!     Ok(())
//! }
//! ```

pub mod repository;
pub mod voltage_regulators;

pub use repository::Repository;
pub use voltage_regulators::VoltageRegulators;
