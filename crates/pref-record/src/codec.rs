//! Record wire codec
//!
//! A record travels as a JSON object keyed by `preference_<id>`; the id
//! itself is carried by the key, not the payload. Decoding is recoverable
//! by contract: a malformed payload yields `CodecError::Malformed` and the
//! caller moves on to the next record.

use crate::record::{PreferenceRecord, RecordId, RecordStatus};
use serde::{Deserialize, Serialize};

/// Codec errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Stored payload is not a well-formed record object
    #[error("malformed record payload: {0}")]
    Malformed(String),
}

/// On-wire record shape
///
/// Field names are fixed by the ledger contract. A missing `status`
/// defaults to pending, tolerating entries written before the field
/// existed.
#[derive(Debug, Serialize, Deserialize)]
struct WireRecord {
    data: String,
    timestamp: i64,
    owner: String,
    #[serde(rename = "preferenceType")]
    preference_type: String,
    #[serde(default)]
    status: RecordStatus,
}

/// Serialize a record into its wire payload
///
/// # Errors
/// `CodecError::Malformed` if serialization fails (not expected for
/// well-formed records).
pub fn encode(record: &PreferenceRecord) -> Result<Vec<u8>, CodecError> {
    let wire = WireRecord {
        data: record.sealed_data.clone(),
        timestamp: record.timestamp,
        owner: record.owner.clone(),
        preference_type: record.preference_type.clone(),
        status: record.status,
    };
    serde_json::to_vec(&wire).map_err(|e| CodecError::Malformed(e.to_string()))
}

/// Deserialize a wire payload into a record addressed by `id`
///
/// # Errors
/// `CodecError::Malformed` on any payload that does not parse as the wire
/// shape. Callers must treat this as recoverable.
pub fn decode(id: RecordId, bytes: &[u8]) -> Result<PreferenceRecord, CodecError> {
    let wire: WireRecord =
        serde_json::from_slice(bytes).map_err(|e| CodecError::Malformed(e.to_string()))?;
    Ok(PreferenceRecord {
        id,
        sealed_data: wire.data,
        timestamp: wire.timestamp,
        owner: wire.owner,
        preference_type: wire.preference_type,
        status: wire.status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_record() -> PreferenceRecord {
        PreferenceRecord::new(
            RecordId::from_parts(1700000000000, "k3v9q2z"),
            "FHE-eyJkIjoieCJ9",
            1700000000,
            "0xAbC",
            "Visit Frequency",
        )
    }

    #[test]
    fn encode_uses_wire_field_names() {
        let bytes = encode(&sample_record()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(value.get("data").is_some());
        assert!(value.get("preferenceType").is_some());
        assert_eq!(value["status"], "pending");
    }

    #[test]
    fn decode_rejects_malformed_payload() {
        let result = decode(RecordId::from_string("x"), b"not json");
        assert!(matches!(result, Err(CodecError::Malformed(_))));
    }

    #[test]
    fn decode_rejects_wrong_shape() {
        let result = decode(RecordId::from_string("x"), b"[1, 2, 3]");
        assert!(result.is_err());
    }

    #[test]
    fn decode_defaults_missing_status_to_pending() {
        let payload =
            br#"{"data":"FHE-x","timestamp":5,"owner":"0xa","preferenceType":"Dosage"}"#;
        let record = decode(RecordId::from_string("x"), payload).unwrap();
        assert_eq!(record.status, RecordStatus::Pending);
    }

    proptest! {
        #[test]
        fn prop_roundtrip(
            millis in 0i64..4_102_444_800_000,
            suffix in "[0-9a-z]{7}",
            data in "\\PC*",
            timestamp in 0i64..4_102_444_800,
            owner in "0x[0-9a-fA-F]{1,40}",
            preference_type in "[A-Za-z ]{1,24}",
            status in prop_oneof![
                Just(RecordStatus::Pending),
                Just(RecordStatus::Approved),
                Just(RecordStatus::Rejected),
            ],
        ) {
            let mut record = PreferenceRecord::new(
                RecordId::from_parts(millis, &suffix),
                data,
                timestamp,
                owner,
                preference_type,
            );
            record.status = status;

            let bytes = encode(&record).unwrap();
            let decoded = decode(record.id.clone(), &bytes).unwrap();
            prop_assert_eq!(decoded, record);
        }
    }
}
