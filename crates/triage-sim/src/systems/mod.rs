//! ECS Systems
//!
//! Needs, world indexing, the triage pass and job execution, in tick order.

pub mod index;
pub mod jobs;
pub mod needs;
pub mod triage;

pub use index::index_world;
pub use jobs::{apply_dispatches, pick_routines, progress_jobs};
pub use needs::{decay_satiety, random_injuries, update_bodies};
pub use triage::{run_triage, Dispatches, Triage};
