#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}
