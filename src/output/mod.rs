//! Report and tool-list rendering.
//!
//! # Modules
//!
//! - [`human`] - Terminal text with status icons
//! - [`json`] - JSON documents for tooling

pub mod human;
pub mod json;

pub use human::{format_duration, HumanFormatter};
pub use json::{format_report_json, format_tool_list_json, JsonTool, JsonToolList};
