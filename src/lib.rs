pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod services;
pub mod types;
