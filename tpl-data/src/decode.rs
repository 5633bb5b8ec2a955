//! JSON array decoding with strict and record-skipping policies.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::LoadError;

/// How a collection reacts to an individual malformed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodePolicy {
    /// Any malformed record fails the whole collection.
    #[default]
    Strict,
    /// Malformed records are dropped and reported; the rest are kept.
    SkipInvalid,
}

/// A record dropped under [`DecodePolicy::SkipInvalid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// Resource the record was read from.
    pub resource: String,
    /// Zero-based position in the source array.
    pub index: usize,
    /// Decoder message for the record.
    pub reason: String,
}

/// A decoded collection with the records dropped along the way.
///
/// `skipped` is always empty under [`DecodePolicy::Strict`].
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    /// Records that decoded successfully, in document order.
    pub records: Vec<T>,
    /// Records that were dropped.
    pub skipped: Vec<SkippedRecord>,
}

impl<T> Decoded<T> {
    /// Collection in which every record decoded.
    pub const fn complete(records: Vec<T>) -> Self {
        Self {
            records,
            skipped: Vec::new(),
        }
    }
}

/// Decode `text` as a JSON array of `T` under `policy`.
///
/// # Errors
///
/// Returns [`LoadError::DecodingFailed`] when the document is not a JSON
/// array, or under [`DecodePolicy::Strict`] when any record is malformed.
pub fn decode_collection<T>(
    resource: &str,
    text: &str,
    policy: DecodePolicy,
) -> Result<Decoded<T>, LoadError>
where
    T: DeserializeOwned,
{
    match policy {
        DecodePolicy::Strict => serde_json::from_str(text)
            .map(Decoded::complete)
            .map_err(|source| LoadError::DecodingFailed {
                resource: resource.to_owned(),
                source,
            }),
        DecodePolicy::SkipInvalid => decode_tolerant(resource, text),
    }
}

/// Decode each array element independently, keeping the ones that parse.
///
/// Every dropped record is logged at `warn` level.
///
/// # Errors
///
/// Returns [`LoadError::DecodingFailed`] when the document itself is not a
/// JSON array.
///
/// # Examples
/// ```
/// use tpl_core::VisitRecord;
/// use tpl_data::decode_tolerant;
///
/// let text = r#"[
///     {"_id": 1, "Year": 2023, "BranchCode": "AB", "Visits": "50000"},
///     {"_id": 2, "Year": "soon", "BranchCode": "AB", "Visits": "1"}
/// ]"#;
/// let decoded = decode_tolerant::<VisitRecord>("visits.json", text)?;
/// assert_eq!(decoded.records.len(), 1);
/// assert_eq!(decoded.skipped[0].index, 1);
/// # Ok::<(), tpl_data::LoadError>(())
/// ```
pub fn decode_tolerant<T>(resource: &str, text: &str) -> Result<Decoded<T>, LoadError>
where
    T: DeserializeOwned,
{
    let elements: Vec<Value> =
        serde_json::from_str(text).map_err(|source| LoadError::DecodingFailed {
            resource: resource.to_owned(),
            source,
        })?;
    let mut records = Vec::with_capacity(elements.len());
    let mut skipped = Vec::new();
    for (index, element) in elements.into_iter().enumerate() {
        match serde_json::from_value(element) {
            Ok(record) => records.push(record),
            Err(err) => {
                log::warn!("skipping record {index} of {resource}: {err}");
                skipped.push(SkippedRecord {
                    resource: resource.to_owned(),
                    index,
                    reason: err.to_string(),
                });
            }
        }
    }
    Ok(Decoded { records, skipped })
}
