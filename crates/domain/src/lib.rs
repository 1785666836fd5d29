//! # navloader-domain
//!
//! Pure domain model for navigation loading feedback.
//!
//! ## Responsibilities
//! - Define the **loading state** shared by every indicator in a UI session
//!   (`is_loading`, optional message, intent counter) and its invariants
//! - Define the **route identity** used for change detection
//! - Define validation errors raised at configuration boundaries
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app` or from IO crates.
//! Subscription and observation are expressed in the `app` crate.

pub mod error;
pub mod loading;
pub mod route;
