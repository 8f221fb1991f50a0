pub mod service;

pub use crate::service::{HabitService, HabitServiceBuilder, HabitUpdate, UpdateOutcome};
