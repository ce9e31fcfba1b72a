//! Contact domain model.
//!
//! # Responsibility
//! - Define validated field types and the contact record built from them.
//!
//! # Invariants
//! - A value that fails its field validator is never stored.
//! - Record identity inside an address book is its name.

pub mod field;
pub mod record;
