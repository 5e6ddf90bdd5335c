pub mod cli;
pub mod config;
pub mod error;
pub mod generator;

pub use error::{InitError, Result};
