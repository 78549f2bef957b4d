//! Configuration types
//!
//! Board-agnostic configuration structures, plus the parser for the
//! `display.toml` file embedded in the firmware.

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, ParseError, ParseErrorKind};
pub use types::*;
