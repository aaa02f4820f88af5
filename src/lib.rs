//! fitagg library
//!
//! This module exposes the service, cache, data and CLI modules for use in
//! integration tests and by the binary.

pub mod advice;
pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod server;
pub mod service;

pub use error::{ErrorKind, FitnessError};
pub use service::FitnessService;
