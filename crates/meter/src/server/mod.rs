//! REST API module for the meter service
//!
//! Provides the HTTP endpoints for uploading, listing and comparing records
//! and for forwarding prediction requests. Uses axum for routing.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routing;
pub mod services;
pub mod startup;
pub mod state;
pub mod types;
