pub mod config;
pub mod duration;
mod error;
pub mod models;
pub mod report;
pub mod upstream;

pub use error::{Error, Result};
