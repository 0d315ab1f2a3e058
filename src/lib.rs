//! Reconciles an enterprise application's role-assignment list against a
//! desired set of Azure AD group ids, via the Microsoft Graph API.
//!
//! The flow is strictly sequential: authenticate, resolve the application,
//! fetch the current assignments, diff against the desired set, then apply
//! additions followed by removals one call at a time.

#![deny(clippy::all)]

pub mod auth;
pub mod config;
pub mod error;
pub mod graph;
pub mod state;
pub mod sync;
