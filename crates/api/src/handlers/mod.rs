//! Request handlers.
//!
//! Each resource submodule provides async handler functions (create, list,
//! get_by_id, update, delete). Handlers parse the path identifier before
//! touching the store, delegate to the corresponding repository in
//! `menagerie_db` and map errors via [`AppError`](crate::error::AppError).

pub mod animal;
pub mod category;
pub mod maintenance;
pub mod species;
