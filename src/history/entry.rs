//! History records and their on-disk encoding.
//!
//! Keys are the 8-byte big-endian form of the entry id so that byte order
//! and numeric order agree. Values are the serde encoding of [`StoredRecord`];
//! the id lives only in the key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::{HistoryError, HistoryResult};

/// One recorded interaction, as handed out to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    /// Which resolver produced the entry ("agent" or "ask").
    pub command_kind: String,
    pub query: String,
    pub response: String,
    /// The command the user actually ran, if any.
    pub selected: Option<String>,
}

impl Entry {
    /// The text shown in listings: the chosen command, or the raw response
    /// when nothing was chosen.
    pub fn display_command(&self) -> &str {
        self.selected.as_deref().unwrap_or(&self.response)
    }

    /// Whether the full response carries more than the selected command.
    pub fn has_extra_response(&self) -> bool {
        matches!(&self.selected, Some(selected) if *selected != self.response)
    }
}

/// Persisted value layout. `selected` is always written, as `null` when absent.
#[derive(Debug, Serialize, Deserialize)]
struct StoredRecord {
    timestamp: DateTime<Utc>,
    command: String,
    query: String,
    response: String,
    selected: Option<String>,
}

pub(crate) fn encode_key(id: u64) -> [u8; 8] {
    id.to_be_bytes()
}

pub(crate) fn decode_key(key: &[u8]) -> Option<u64> {
    let bytes: [u8; 8] = key.try_into().ok()?;
    Some(u64::from_be_bytes(bytes))
}

pub(crate) fn encode_value(entry: &Entry) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(&StoredRecord {
        timestamp: entry.timestamp,
        command: entry.command_kind.clone(),
        query: entry.query.clone(),
        response: entry.response.clone(),
        selected: entry.selected.clone(),
    })
}

/// Decode one stored key/value pair.
pub(crate) fn decode_record(key: &[u8], value: &[u8]) -> HistoryResult<Entry> {
    let id = decode_key(key).ok_or_else(|| HistoryError::DecodeSkipped {
        key: key.to_vec(),
        reason: format!("expected an 8-byte key, found {} bytes", key.len()),
    })?;

    let record: StoredRecord =
        serde_json::from_slice(value).map_err(|e| HistoryError::DecodeSkipped {
            key: key.to_vec(),
            reason: e.to_string(),
        })?;

    Ok(Entry {
        id,
        timestamp: record.timestamp,
        command_kind: record.command,
        query: record.query,
        response: record.response,
        selected: record.selected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(selected: Option<&str>) -> Entry {
        Entry {
            id: 42,
            timestamp: Utc::now(),
            command_kind: "ask".to_string(),
            query: "how to find large files".to_string(),
            response: "1. `du -sh *` - Sizes per entry".to_string(),
            selected: selected.map(str::to_string),
        }
    }

    #[test]
    fn test_key_order_matches_id_order() {
        let ids = [1u64, 2, 255, 256, 65_536, u64::MAX - 1];
        for pair in ids.windows(2) {
            assert!(encode_key(pair[0]) < encode_key(pair[1]), "{:?}", pair);
        }
        assert_eq!(decode_key(&encode_key(256)), Some(256));
    }

    #[test]
    fn test_short_key_is_rejected() {
        assert_eq!(decode_key(&[0, 1, 2]), None);
        let err = decode_record(&[0, 1, 2], b"{}").unwrap_err();
        assert!(matches!(err, HistoryError::DecodeSkipped { .. }));
    }

    #[test]
    fn test_absent_selection_is_written_as_null() {
        let entry = sample(None);
        let value = encode_value(&entry).unwrap();
        let raw: serde_json::Value = serde_json::from_slice(&value).unwrap();
        assert_eq!(raw["selected"], serde_json::Value::Null);

        let decoded = decode_record(&encode_key(entry.id), &value).unwrap();
        assert_eq!(decoded, entry);
    }

    #[test]
    fn test_garbage_value_is_a_skip() {
        let err = decode_record(&encode_key(7), b"\x00\xffnot a record").unwrap_err();
        match err {
            HistoryError::DecodeSkipped { key, .. } => assert_eq!(key, encode_key(7).to_vec()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_display_command_prefers_selection() {
        assert_eq!(sample(Some("du -sh *")).display_command(), "du -sh *");
        assert_eq!(
            sample(None).display_command(),
            "1. `du -sh *` - Sizes per entry"
        );
        assert!(sample(Some("du -sh *")).has_extra_response());
        assert!(!sample(None).has_extra_response());
    }
}
