pub mod filter;
pub mod layout;
pub mod model;
pub mod time;
pub mod transform;

pub use filter::{FilterOutcome, FilterSpec};
pub use model::{CalendarEvent, EventKind};
