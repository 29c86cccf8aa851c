//! Resource assignment.
//!
//! Each archetype has an ordered table of rules; worlds with life add an
//! ecology table keyed by their [`LifeType`](crate::astro::LifeType). The
//! [`ResourceAssigner`] walks both tables with the planet's dice.

mod assigner;
mod rules;
mod tables;

pub use assigner::{Resource, ResourceAssigner, ResourceProfile, MAX_DENSITY, MIN_DENSITY};
pub use rules::{Amount, Branch, Condition, Entry, Rule};
pub use tables::{archetype_table, ecology_table};
