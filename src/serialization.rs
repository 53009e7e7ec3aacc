//! The JSON codec shared by every entity type.
//!
//! Encoding goes through [`serde_json::Value`] so that object keys come out
//! sorted (the `Value` map is ordered by key), `None` fields are omitted via
//! the entities' `skip_serializing_if` attributes, and `Decimal` amounts are
//! rendered as exact decimal strings. Output is pretty-printed with 4-space
//! indentation so encoded payloads are stable and diffable in tests.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use serde_json::ser::PrettyFormatter;

use crate::error::{Error, Result};

/// Encode a value to the canonical JSON representation: sorted keys,
/// 4-space indentation, absent fields omitted.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    let value = serde_json::to_value(value)?;
    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8(out).expect("serializer emits valid UTF-8"))
}

/// Project a value to a plain [`Value`] tree of maps, sequences, and
/// primitives. Useful for equality assertions and debugging.
pub fn to_value<T: Serialize>(value: &T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

/// Decode a value from a JSON string. Malformed JSON surfaces the serde
/// error together with the offending input.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|e| Error::DeserializationError(e, Some(json.to_owned())))
}

/// Decode a value from an already-parsed [`Value`].
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T> {
    Ok(serde_json::from_value(value)?)
}

/// Convenience methods for the codec, available on every serde-capable type
/// in the crate.
pub trait JsonCodec: Serialize + DeserializeOwned {
    fn to_json(&self) -> Result<String> {
        to_json(self)
    }

    fn to_value(&self) -> Result<Value> {
        to_value(self)
    }

    fn from_json(json: &str) -> Result<Self> {
        from_json(json)
    }

    fn from_value(value: Value) -> Result<Self> {
        from_value(value)
    }
}

impl<T: Serialize + DeserializeOwned> JsonCodec for T {}
