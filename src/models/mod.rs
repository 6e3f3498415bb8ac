//! Core data models for twofa
//!
//! Labels, seeds, and the map that pairs them.

pub mod label;
pub mod seed;

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer, Visitor};

pub use label::Label;
pub use seed::Seed;

/// Label to seed mapping, iterated in label order
pub type SecretMap = BTreeMap<Label, Seed>;


/// Read a YAML scalar as text
///
/// Hand-edited stores may hold unquoted numbers (`bank: 234567`) or booleans,
/// which YAML does not parse as strings.
pub(crate) fn deserialize_scalar_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct ScalarText;

    impl<'de> Visitor<'de> for ScalarText {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, integer, or boolean")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_owned())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(ScalarText)
}
