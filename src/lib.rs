//! Bookstore Core - Online Bookstore Backend
//!
//! This crate provides the REST API for an online bookstore: catalog
//! browsing, user accounts, order placement and sales statistics.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod migration;
pub mod openapi;
pub mod repository;
pub mod server;
pub mod service;
pub mod state;
pub mod telemetry;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
