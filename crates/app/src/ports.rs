//! Port definitions — traits at the boundaries of the coordinator.
//!
//! The intent hook and the route observer only need [`LoadingControl`];
//! the provider only needs a [`RouteSource`]. Both have in-process
//! implementations in this crate, and UI integrations can supply their own.

pub mod loading_control;
pub mod route_source;

pub use loading_control::LoadingControl;
pub use route_source::RouteSource;
