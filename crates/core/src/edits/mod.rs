//! Declarative edits: property actions, tag actions and batch options.

mod plan;
mod reducer;
mod types;

pub use plan::{EditPlan, PlanError};
pub use reducer::{UserAction, normalize_tag};
pub use types::{EditSet, EditSetError, Options, PropertyAction, TagAction};
