//! Utility modules

pub mod upload;
