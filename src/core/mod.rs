pub mod calendar;
pub mod date_range;
pub mod labels;
pub mod record;

pub use calendar::{CalendarDay, day_span_inclusive, left_for_day};
pub use date_range::DateRange;
pub use record::{RecordId, TimelineRecord};
