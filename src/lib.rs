//! SF Asset API
//!
//! HTTP gateway over the fleet asset tables: list vehicles, patch their
//! status, record odometer readings and issue API keys.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
