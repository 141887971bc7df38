//! Read-only access to the insights store: routing-security and ISP-market
//! reference tables populated by an external ingestion job.

mod error;
mod inspect;
mod models;
mod open;
mod query;
pub mod schema;
mod value;

pub use error::{Result, StoreError};
pub use models::*;
pub use open::{Db, Store, StoreConfig, DEFAULT_PATH};
