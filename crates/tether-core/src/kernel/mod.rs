pub mod constants;
pub mod error;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;
