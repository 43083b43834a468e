mod error;
mod loader;

#[cfg(test)]
mod tests;

pub use error::ConfigError;
pub use loader::*;
