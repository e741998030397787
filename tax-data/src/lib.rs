//! Loading bracket schedules from versioned CSV tables.

mod loader;

pub use loader::{ScheduleLoader, ScheduleLoaderError, ScheduleRecord};
