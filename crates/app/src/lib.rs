//! # navloader-app
//!
//! Application layer — navigation loading coordination and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** at the seams:
//!   - `LoadingControl` — show / hide the loading indicator
//!   - `RouteSource` — observable current route identity
//! - Provide the in-process building blocks:
//!   - `LoadingStore` — single source of truth, synchronous and async subscribers
//!   - `NavigationIntent` — called by trigger elements at the moment of intent
//!   - `RouteChangeObserver` — clears the indicator when the route changes
//!   - `NavigationLoadingProvider` — installs the observer once per session
//!   - `RouteTracker` — in-process `RouteSource`
//!   - `NavigationSession` — owns one of each, replacing any ambient global
//!   - `LoadingWatchdog` — optional auto-hide for navigations that never commit
//!
//! ## Dependency rule
//! Depends on `navloader-domain` only (plus `tokio` for channels and timers).

pub mod listeners;
pub mod loading_store;
pub mod navigation;
pub mod ports;
pub mod provider;
pub mod route_observer;
pub mod route_tracker;
pub mod session;
pub mod watchdog;
