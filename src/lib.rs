//! Wahoo (workspace facade crate).
//!
//! Re-exports the member crates under `wahoo::{core,driver,types}` so hosts
//! and the integration tests depend on one package while the implementation
//! lives in dedicated crates under `crates/`.

pub use wahoo_core as core;
pub use wahoo_driver as driver;
pub use wahoo_types as types;
