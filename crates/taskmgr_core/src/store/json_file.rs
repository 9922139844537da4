//! Whole-file JSON array persistence.

use super::{StoreError, StoreResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Indent used by files written before this crate existed; kept so rewritten
/// files diff cleanly against them.
const JSON_INDENT: &[u8] = b"    ";

/// Reads a JSON array of `T` from `path`.
///
/// Returns an empty vector when the file does not exist.
pub fn read_json_array<T: DeserializeOwned>(path: &Path) -> StoreResult<Vec<T>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(StoreError::io(path, err)),
    };

    serde_json::from_slice(&bytes).map_err(|err| StoreError::json(path, err))
}

/// Serializes `items` as a pretty-printed JSON array and overwrites `path`.
pub fn write_json_array<T: Serialize>(path: &Path, items: &[T]) -> StoreResult<()> {
    let mut buffer = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(JSON_INDENT));
    items
        .serialize(&mut serializer)
        .map_err(|err| StoreError::json(path, err))?;

    fs::write(path, buffer).map_err(|err| StoreError::io(path, err))
}
