//! Domain models for the Vehicle Maintenance platform

mod maintenance_log;
mod program;
mod reminder;
mod status;
mod usage;
mod vehicle;

pub use maintenance_log::*;
pub use program::*;
pub use reminder::*;
pub use status::*;
pub use usage::*;
pub use vehicle::*;
