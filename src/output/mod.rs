//! Output formatting for resolved prefixes.
//!
//! - [`terminal`] - Plain CIDR lines or JSON lines on stdout

mod terminal;

pub use terminal::{format_json, format_prefixes, render, OutputFormat};
