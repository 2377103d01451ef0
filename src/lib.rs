//! Accounts Core - Small-business back-office accounts service
//!
//! Users register and own businesses; employees join a business only by
//! accepting an invitation, and every management action passes through
//! a role-hierarchy authorization gate.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod notification;
pub mod policy;
pub mod repository;
pub mod server;
pub mod service;
pub mod telemetry;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
