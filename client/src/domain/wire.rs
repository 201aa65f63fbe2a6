//! Field decoders for loosely typed backend rows.
//!
//! Listing endpoints return whatever the database holds. A missing or
//! `null` text column decodes to an empty string so one odd row cannot
//! reject a whole list.

use serde::{Deserialize, Deserializer};

/// Decode a text field, mapping `null` to the empty string.
///
/// Pair with `#[serde(default)]` so an absent field also decodes.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
