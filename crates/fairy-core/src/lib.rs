//! Core types shared by the FAIRy preflight engine: error taxonomy,
//! layered configuration, tracing setup, and constants.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
