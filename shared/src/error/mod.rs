//! Error codes shared between the schedule engine and its hosts
//!
//! - [`ErrorCode`]: stable numeric codes, serialized as `u16`
//! - [`ErrorCategory`]: classification by code range
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 4xxx: Payment schedule errors
//! - 9xxx: System errors

mod category;
mod codes;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
