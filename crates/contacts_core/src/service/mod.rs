//! Core use-case services.
//!
//! # Responsibility
//! - Combine address book lookups, record edits and persistence into
//!   single calls for UI/CLI layers.

pub mod contact_service;
