//! HTTP handlers for the schedule entities.

pub mod activity;
pub mod curricular_component;
pub mod holiday;
pub use activity::*;
pub use curricular_component::*;
pub use holiday::*;
