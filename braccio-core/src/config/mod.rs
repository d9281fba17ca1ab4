//! Configuration types
//!
//! Board-agnostic arm configuration and the `arm.toml` parser.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
