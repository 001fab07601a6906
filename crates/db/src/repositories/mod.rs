//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&Db` as the first argument. Every document read back from
//! the store passes through its record's normalizer.

pub mod animal_repo;
pub mod category_repo;
pub mod document;
pub mod maintenance_repo;
pub mod species_repo;

pub use animal_repo::AnimalRepo;
pub use category_repo::CategoryRepo;
pub use maintenance_repo::{BackfillReport, MaintenanceRepo};
pub use species_repo::SpeciesRepo;
