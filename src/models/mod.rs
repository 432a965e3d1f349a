mod team_member;
mod feature;
mod allocation;
mod estimate;
mod scenario;
mod saved_project;

pub use team_member::{Availability, CompensationKind, Role, TeamMember, TECH_STACK_CATALOGUE};
pub use feature::{Complexity, Feature};
pub use allocation::ProjectAllocation;
pub use estimate::ProjectEstimate;
pub use scenario::Scenario;
pub use saved_project::{ProjectStatus, SavedProject};
