//! Versioned JSON payloads exchanged with hosts.
//!
//! Writers always emit the v1 envelope. Readers also accept the bare
//! payload so older hosts that never wrapped their data keep working.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::TimelineRecord;
use crate::error::{TimelineError, TimelineResult};

use super::TimelineView;

pub const TIMELINE_VIEW_JSON_SCHEMA_V1: u32 = 1;
pub const TIMELINE_RECORDS_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineViewJsonContractV1 {
    pub schema_version: u32,
    pub view: TimelineView,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineRecordsJsonContractV1 {
    pub schema_version: u32,
    pub records: Vec<TimelineRecord>,
}

impl TimelineView {
    pub fn to_json_pretty(&self) -> TimelineResult<String> {
        to_pretty(self, "timeline view")
    }

    pub fn to_json_contract_v1_pretty(&self) -> TimelineResult<String> {
        to_pretty(
            &TimelineViewJsonContractV1 {
                schema_version: TIMELINE_VIEW_JSON_SCHEMA_V1,
                view: self.clone(),
            },
            "timeline view contract v1",
        )
    }

    /// Accepts either a bare view or a versioned v1 envelope.
    pub fn from_json_compat_str(input: &str) -> TimelineResult<Self> {
        if let Ok(view) = serde_json::from_str::<TimelineView>(input) {
            return Ok(view);
        }
        let payload: TimelineViewJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            TimelineError::InvalidData(format!("failed to parse timeline view json payload: {e}"))
        })?;
        check_version(payload.schema_version, TIMELINE_VIEW_JSON_SCHEMA_V1, "timeline view")?;
        Ok(payload.view)
    }
}

/// Serializes a record set inside the v1 envelope.
pub fn records_to_json_contract_v1_pretty(records: &[TimelineRecord]) -> TimelineResult<String> {
    to_pretty(
        &TimelineRecordsJsonContractV1 {
            schema_version: TIMELINE_RECORDS_JSON_SCHEMA_V1,
            records: records.to_vec(),
        },
        "timeline records contract v1",
    )
}

/// Reads a record set from a bare array or a v1 envelope.
///
/// Only the outer shape is strict; malformed elements inside the array are
/// skipped the same way the layout engine skips them.
pub fn records_from_json_compat_str(input: &str) -> TimelineResult<Vec<TimelineRecord>> {
    let value: Value = serde_json::from_str(input).map_err(|e| {
        TimelineError::InvalidData(format!("failed to parse timeline records json: {e}"))
    })?;

    let items = match &value {
        Value::Array(_) => &value,
        Value::Object(envelope) => {
            let version = envelope
                .get("schema_version")
                .and_then(Value::as_u64)
                .ok_or_else(|| {
                    TimelineError::InvalidData(
                        "timeline records envelope is missing `schema_version`".to_owned(),
                    )
                })?;
            let version = u32::try_from(version).unwrap_or(u32::MAX);
            check_version(version, TIMELINE_RECORDS_JSON_SCHEMA_V1, "timeline records")?;
            envelope
                .get("records")
                .filter(|records| records.is_array())
                .ok_or_else(|| {
                    TimelineError::InvalidData(
                        "timeline records envelope has no `records` array".to_owned(),
                    )
                })?
        }
        _ => {
            return Err(TimelineError::InvalidData(
                "timeline records json must be an array or a v1 envelope".to_owned(),
            ));
        }
    };
    Ok(TimelineRecord::collection_from_json(items))
}

fn to_pretty<T: Serialize>(payload: &T, what: &str) -> TimelineResult<String> {
    serde_json::to_string_pretty(payload)
        .map_err(|e| TimelineError::InvalidData(format!("failed to serialize {what} json: {e}")))
}

fn check_version(found: u32, supported: u32, what: &str) -> TimelineResult<()> {
    if found == supported {
        return Ok(());
    }
    Err(TimelineError::InvalidData(format!(
        "unsupported {what} schema version: {found}"
    )))
}
