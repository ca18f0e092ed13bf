mod maths_utils;
mod time_utils;

pub use maths_utils::round_half_up;
pub use time_utils::{TimeUtils, format_record_timestamp, now_record_timestamp};
