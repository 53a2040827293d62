pub mod commands;
pub mod error;
pub mod installer;
pub mod package;
pub mod provider;
pub mod runtime;
pub mod wheel;

pub use error::Error;
