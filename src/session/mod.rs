pub mod events;
pub mod replay;

pub use events::{EditEvent, load_script, parse_script};
pub use replay::{Notification, ReplayReport, replay};
