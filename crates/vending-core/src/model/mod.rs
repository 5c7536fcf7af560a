//! Plain data carried in and out of the machine: products and machine configuration.

pub mod config;
pub mod product;

pub use config::*;
pub use product::*;
