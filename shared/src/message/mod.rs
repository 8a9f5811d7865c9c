//! User-facing notification types
//!
//! The schedule engine never talks to a UI directly. Every rejection and
//! every structural change is described by a [`NotificationPayload`] that the
//! host forwards to its toast/notification channel.

pub mod payload;
pub use payload::*;
