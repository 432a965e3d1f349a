use super::{CompensationKind, Role, TeamMember};
use crate::estimation::monthly_cost;

/// A team member attached to an estimate.
///
/// Rate and compensation are copied from the roster when the allocation is
/// made, so the monthly cost does not follow later roster edits.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectAllocation {
    pub member_id: u32,
    pub name: String,
    pub role: Role,
    pub compensation: CompensationKind,
    pub rate: f64,
    pub allocation_percentage: u8,
    pub computed_monthly_cost: f64,
}

impl ProjectAllocation {
    pub fn for_member(member: &TeamMember, allocation_percentage: u8) -> Self {
        let allocation_percentage = allocation_percentage.min(100);
        Self {
            member_id: member.id,
            name: member.name.clone(),
            role: member.role,
            compensation: member.compensation,
            rate: member.rate,
            allocation_percentage,
            computed_monthly_cost: monthly_cost(member.rate, member.compensation, allocation_percentage),
        }
    }
}
