//! Plain-text presentation of engine output and season records.
//!
//! Everything here is a pure function from model values to strings; the
//! binary decides where the text goes.

mod records;
mod summary;

pub use records::{
    all_play_records, render_all_play, render_schedule_swap, schedule_swap_records,
    AllPlayRecord, RecordLine, ScheduleSwapTable,
};
pub use summary::{
    critical_lines, describe_reduction, render_scenarios, render_standings, ScenarioKind,
};
