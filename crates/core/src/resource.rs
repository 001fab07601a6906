//! Per-kind descriptors for the three stored resources.

/// Identifier field of every stored document.
pub const ID_FIELD: &str = "_id";
pub const NAME_FIELD: &str = "name";
pub const CREATED_AT_FIELD: &str = "createdAt";
pub const UPDATED_AT_FIELD: &str = "updatedAt";

/// The resources this service stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Animal,
    Category,
    Species,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Animal,
        ResourceKind::Category,
        ResourceKind::Species,
    ];

    /// Collection the documents live in.
    pub fn collection(self) -> &'static str {
        match self {
            ResourceKind::Animal => "animals",
            ResourceKind::Category => "categories",
            ResourceKind::Species => "species",
        }
    }

    /// Human-readable name used in error messages.
    pub fn entity(self) -> &'static str {
        match self {
            ResourceKind::Animal => "Animal",
            ResourceKind::Category => "Category",
            ResourceKind::Species => "Species",
        }
    }

    /// Legacy field some older writers used instead of `name`.
    pub fn name_alias(self) -> &'static str {
        match self {
            ResourceKind::Animal => "animal_name",
            ResourceKind::Category => "category_name",
            ResourceKind::Species => "species_name",
        }
    }

    /// Whether name searches also look at [`name_alias`](Self::name_alias).
    ///
    /// Category documents were never written with the alias in bulk, so
    /// their search only covers the canonical field.
    pub fn searches_name_alias(self) -> bool {
        !matches!(self, ResourceKind::Category)
    }

    /// Fields a list request may sort by.
    pub fn sortable_fields(self) -> &'static [&'static str] {
        match self {
            ResourceKind::Animal => &["name", "age", "createdAt", "birthdate", "animal_name"],
            ResourceKind::Category => &["name", "createdAt"],
            ResourceKind::Species => &["name", "createdAt", "species_name"],
        }
    }

    pub fn is_sortable(self, field: &str) -> bool {
        self.sortable_fields().contains(&field)
    }
}
