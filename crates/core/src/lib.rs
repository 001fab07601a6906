//! Domain logic for the menagerie API.
//!
//! Everything in this crate is pure: no I/O, no shared state. The store and
//! HTTP layers build on it.

pub mod age;
pub mod error;
pub mod normalize;
pub mod query;
pub mod reference;
pub mod resource;
pub mod types;
pub mod validation;
