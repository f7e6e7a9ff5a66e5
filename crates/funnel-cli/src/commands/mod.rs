//! Subcommand handlers. Each handler is a thin adapter: build a filter or a
//! whole record from the flags, call the registry, render the result.

pub mod admin;
pub mod leads;
pub mod notes;
pub mod report;
