use bson::oid::ObjectId;

use crate::error::CoreError;

/// Store-assigned document identifier. Carries its creation second.
pub type DocId = ObjectId;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// The identifier a record gets when its document has no `_id`.
pub fn nil_id() -> DocId {
    ObjectId::from_bytes([0; 12])
}

/// Parse a hex-encoded path parameter into a [`DocId`].
pub fn parse_id(raw: &str) -> Result<DocId, CoreError> {
    ObjectId::parse_str(raw).map_err(|_| CoreError::InvalidId(raw.to_string()))
}

/// Creation time embedded in an identifier.
pub fn id_timestamp(id: &DocId) -> Timestamp {
    id.timestamp().to_chrono()
}
