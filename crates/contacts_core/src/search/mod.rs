//! Contact search entry points.
//!
//! # Responsibility
//! - Expose case-insensitive substring matching over names and phones.
//! - Keep hit shaping inside core.

pub mod substring;
