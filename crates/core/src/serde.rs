//! Serde helpers for query-string filters.
//!
//! Browsers send `?search=&situacao=` when a filter box is left blank, so a
//! blank value must read as "no filter" rather than "match the empty string".

use serde::{Deserialize, Deserializer};

/// Deserializes an optional string, mapping blank values to `None`.
///
/// Non-blank values are kept verbatim, surrounding whitespace included.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}
