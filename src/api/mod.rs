//! Host-facing facade: engine state, render-ready views and JSON contracts.

mod engine;
mod engine_config;
mod json_contract;
mod view;

pub use engine::TimelineEngine;
pub use engine_config::TimelineEngineConfig;
pub use json_contract::{
    TIMELINE_RECORDS_JSON_SCHEMA_V1, TIMELINE_VIEW_JSON_SCHEMA_V1, TimelineRecordsJsonContractV1,
    TimelineViewJsonContractV1, records_from_json_compat_str, records_to_json_contract_v1_pretty,
};
pub use view::{DayCell, ItemView, StageTone, TimelineView, TodayMarker};
