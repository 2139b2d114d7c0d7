//! Configuration validation
//!
//! Every configuration section implements [`Validate`]; `Config::validate`
//! runs them all and reports the first problem with its section name.

mod trait_def;
mod validators;

pub use trait_def::Validate;
