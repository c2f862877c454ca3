mod actor;
mod handle;
pub mod cache;
pub mod provider;

pub use cache::MonthKey;
pub use handle::ScheduleHandle;
pub use provider::ScheduleProvider;
