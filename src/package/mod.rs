//! Package identity module
//!
//! This module provides the small amount of packaging vocabulary the tool
//! needs: distribution name normalization, requirement strings, and the
//! version arithmetic used when a target version is derived.

pub mod name;
mod requirement;
mod version;

pub use requirement::{Requirement, has_specifier, normalize_specifier};
pub use version::{DEFAULT_VERSION, Release, default_target_specifier, minor_line_range};
