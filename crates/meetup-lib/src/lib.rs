//! The library of the meetup database.
//!
//! The tables themselves and their derived accessors live in the [`entity`] crate. This crate
//! contains the environment and connection setup, and the operations keeping the ordered
//! collections (the talks and links of an event, the speakers and links of a talk) and the
//! talk/speaker associations consistent.

#![warn(missing_docs)]

mod env;

pub mod city;
pub mod error;
pub mod event;
pub mod must;
pub mod ordering;
pub mod pool;
pub mod speaker;
pub mod talk;
pub mod venue;

pub use env::*;
pub use pool::Database;
