mod core;
mod messages;
mod worker;

pub use core::DashboardEngine;
pub use messages::{CycleOutcome, FetchRequest, FetchResult};
