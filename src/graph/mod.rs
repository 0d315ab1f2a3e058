//! Microsoft Graph directory access.
//!
//! Session setup with application resolution, plus read and write
//! operations on the application's role-assignment collection.

pub mod assignments;
pub mod models;
pub mod session;

pub use models::{ApplicationIdentity, Assignment};
pub use session::GraphSession;
