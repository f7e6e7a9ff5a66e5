//! Core types for the funnel lead-pipeline registry.
//!
//! This crate is deliberately free of I/O dependencies. It defines the
//! entities, identifiers, error taxonomy, notification contract, and read
//! models; the in-memory registry lives in `funnel-registry` and the
//! terminal adapter in `funnel-cli`.

pub mod agent;
pub mod company;
pub mod error;
pub mod group;
pub mod id;
pub mod lead;
pub mod note;
pub mod notify;
pub mod user;
pub mod view;

pub use error::{Error, Result};
