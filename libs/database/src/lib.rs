//! Database library providing connection management utilities.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB connector, health checks
//! - `config` - `core_config::FromEnv` support for connection settings
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb;
//!
//! let client = mongodb::connect("mongodb://localhost:27017").await?;
//! let db = client.database("mydb");
//! let collection = db.collection::<Document>("users");
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{retry, retry_with_backoff, RetryConfig};
