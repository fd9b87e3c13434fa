//! CLI command implementations.

pub mod alias;
pub mod analyze;
pub mod bands;
pub mod common;
pub mod config;
pub mod generate;
pub mod sum;
