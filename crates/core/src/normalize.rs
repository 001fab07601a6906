//! Tolerant field decoders for stored documents.
//!
//! Documents in the store were written by several generations of clients, so
//! one logical field may appear under different names or in different BSON
//! encodings. Each decoder here tries a fixed sequence of typed reads, takes
//! the first that succeeds, and otherwise falls back to a default. None of
//! them fail.

use bson::{Bson, Document};
use chrono::{TimeZone, Utc};

use crate::age::{age_from_birthdate, age_from_timestamp};
use crate::reference::Reference;
use crate::resource::{ResourceKind, CREATED_AT_FIELD, ID_FIELD, NAME_FIELD, UPDATED_AT_FIELD};
use crate::types::{id_timestamp, nil_id, DocId, Timestamp};

pub const AGE_FIELD: &str = "age";
pub const BIRTHDATE_FIELD: &str = "birthdate";

/// A single typed read of a BSON value.
pub type Decoder<T> = fn(&Bson) -> Option<T>;

/// Run `decoders` in order against `value`; the first hit wins.
pub fn decode_first<T>(value: &Bson, decoders: &[Decoder<T>]) -> Option<T> {
    decoders.iter().find_map(|decode| decode(value))
}

fn as_int32(value: &Bson) -> Option<i64> {
    match value {
        Bson::Int32(v) => Some(i64::from(*v)),
        _ => None,
    }
}

fn as_int64(value: &Bson) -> Option<i64> {
    match value {
        Bson::Int64(v) => Some(*v),
        _ => None,
    }
}

/// Floats truncate toward zero. NaN reads as zero.
fn as_truncated_double(value: &Bson) -> Option<i64> {
    match value {
        Bson::Double(v) => Some(v.trunc() as i64),
        _ => None,
    }
}

fn as_float(value: &Bson) -> Option<f64> {
    match value {
        Bson::Double(v) => Some(*v),
        Bson::Int32(v) => Some(f64::from(*v)),
        Bson::Int64(v) => Some(*v as f64),
        _ => None,
    }
}

fn as_datetime(value: &Bson) -> Option<Timestamp> {
    match value {
        Bson::DateTime(dt) => Some(dt.to_chrono()),
        _ => None,
    }
}

/// Replication-style timestamps carry whole seconds.
fn as_bson_timestamp(value: &Bson) -> Option<Timestamp> {
    match value {
        Bson::Timestamp(ts) => Utc.timestamp_opt(i64::from(ts.time), 0).single(),
        _ => None,
    }
}

/// Integer read across the three numeric encodings.
pub fn integer(value: &Bson) -> Option<i64> {
    decode_first(value, &[as_int32, as_int64, as_truncated_double])
}

/// The store-assigned identifier, or the nil identifier if absent.
pub fn id(doc: &Document) -> DocId {
    match doc.get(ID_FIELD) {
        Some(Bson::ObjectId(id)) => *id,
        _ => nil_id(),
    }
}

fn non_empty_string<'a>(doc: &'a Document, field: &str) -> Option<&'a str> {
    match doc.get(field) {
        Some(Bson::String(s)) if !s.is_empty() => Some(s.as_str()),
        _ => None,
    }
}

/// `name`, else the kind's legacy alias, else empty.
pub fn name(doc: &Document, kind: ResourceKind) -> String {
    non_empty_string(doc, NAME_FIELD)
        .or_else(|| non_empty_string(doc, kind.name_alias()))
        .unwrap_or_default()
        .to_string()
}

/// A weak reference in its canonical string form; empty when missing.
pub fn reference(doc: &Document, field: &str) -> String {
    doc.get(field)
        .and_then(Reference::from_bson)
        .map(|r| r.as_string())
        .unwrap_or_default()
}

/// Boolean flag; anything but a stored boolean reads as `false`.
pub fn flag(doc: &Document, field: &str) -> bool {
    matches!(doc.get(field), Some(Bson::Boolean(true)))
}

/// String passthrough; other encodings read as absent.
pub fn optional_string(doc: &Document, field: &str) -> Option<String> {
    match doc.get(field) {
        Some(Bson::String(s)) => Some(s.clone()),
        _ => None,
    }
}

/// Birthdate as a calendar instant, from a `YYYY-MM-DD` string or a stored
/// date. Returns the computed age, or `None` if it cannot be derived.
fn age_from_birthdate_value(value: &Bson, now: Timestamp) -> Option<Option<i32>> {
    if let Bson::String(raw) = value {
        return Some(age_from_birthdate(raw, now));
    }
    decode_first(value, &[as_datetime, as_bson_timestamp])
        .map(|birth| age_from_timestamp(birth, now))
}

/// Resolve an animal's age as of `now`.
///
/// Priority: stored `age` in any numeric encoding, then `birthdate`, then 0.
/// A birthdate that is present but unusable (bad string, future date) also
/// yields 0; the result is never negative unless a writer stored one.
pub fn age(doc: &Document, now: Timestamp) -> i32 {
    if let Some(stored) = doc.get(AGE_FIELD).and_then(integer) {
        return stored.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    }
    doc.get(BIRTHDATE_FIELD)
        .and_then(|value| age_from_birthdate_value(value, now))
        .flatten()
        .unwrap_or(0)
}

/// Coerce each element to `f64`, skipping elements of any other type.
///
/// Skipping shrinks the output; callers can compare lengths to notice.
pub fn coordinates(values: &[Bson]) -> Vec<f64> {
    values.iter().filter_map(as_float).collect()
}

/// `createdAt` and `updatedAt`, with fallbacks.
///
/// Only stored dates count. A missing `createdAt` is derived from the
/// identifier's embedded time; a missing `updatedAt` copies `createdAt`.
pub fn timestamps(doc: &Document, id: &DocId) -> (Timestamp, Timestamp) {
    let created = doc
        .get(CREATED_AT_FIELD)
        .and_then(as_datetime)
        .unwrap_or_else(|| id_timestamp(id));
    let updated = doc
        .get(UPDATED_AT_FIELD)
        .and_then(as_datetime)
        .unwrap_or(created);
    (created, updated)
}
