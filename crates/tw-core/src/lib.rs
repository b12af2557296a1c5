//! trendwatch/crates/tw-core/src/lib.rs
//!
//! The shared record shape and the source/store contracts for TrendWatch.

pub mod error;
pub mod models;
pub mod request;
pub mod timestamp;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use request::*;
pub use traits::*;
