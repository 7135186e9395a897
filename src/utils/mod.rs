//! Small helpers shared across the binary: logging setup and scope guards.

pub mod context;
pub mod logger;
