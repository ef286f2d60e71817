//! Image processing utilities.
//!
//! # Modules
//!
//! - [`svg`]: inline SVG optimization

pub mod svg;
