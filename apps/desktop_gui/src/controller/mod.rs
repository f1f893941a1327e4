//! Controller layer: error modeling and the side effects panels trigger.

pub mod events;
pub mod orchestration;
