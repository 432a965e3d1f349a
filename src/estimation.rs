use chrono::{Months, NaiveDate};
use tracing::debug;

use crate::models::{CompensationKind, ProjectAllocation, Scenario};

/// Working hours in a month: 20 days of 8 hours
pub const HOURS_PER_MONTH: f64 = 160.0;

/// Convert a stated rate to its hourly equivalent.
pub fn hourly_equivalent(rate: f64, kind: CompensationKind) -> f64 {
    match kind {
        CompensationKind::Hourly => rate,
        CompensationKind::Monthly => rate / HOURS_PER_MONTH,
    }
}

/// Monthly cost of a member working `allocation_percentage` of full time.
pub fn monthly_cost(rate: f64, kind: CompensationKind, allocation_percentage: u8) -> f64 {
    hourly_equivalent(rate, kind) * HOURS_PER_MONTH * f64::from(allocation_percentage) / 100.0
}

/// Total recurring monthly cost of every allocation
pub fn burn_rate(allocations: &[ProjectAllocation]) -> f64 {
    allocations.iter().map(|a| a.computed_monthly_cost).sum()
}

/// Budget for one scenario: burn rate × duration × scenario multiplier.
pub fn estimate(allocations: &[ProjectAllocation], duration_months: u32, scenario: Scenario) -> f64 {
    let base_cost = burn_rate(allocations) * f64::from(duration_months);
    let cost = base_cost * scenario.multiplier();
    debug!(
        scenario = scenario.label(),
        members = allocations.len(),
        duration_months,
        cost,
        "estimated project cost"
    );
    cost
}

/// Everything the results screen shows for one estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioBreakdown {
    pub burn_rate: f64,
    pub base_cost: f64,
    pub optimistic: f64,
    pub realistic: f64,
    pub pessimistic: f64,
}

impl ScenarioBreakdown {
    pub fn compute(allocations: &[ProjectAllocation], duration_months: u32) -> Self {
        let burn_rate = burn_rate(allocations);
        Self {
            burn_rate,
            base_cost: burn_rate * f64::from(duration_months),
            optimistic: estimate(allocations, duration_months, Scenario::Optimistic),
            realistic: estimate(allocations, duration_months, Scenario::Realistic),
            pessimistic: estimate(allocations, duration_months, Scenario::Pessimistic),
        }
    }

    pub fn cost_for(&self, scenario: Scenario) -> f64 {
        match scenario {
            Scenario::Optimistic => self.optimistic,
            Scenario::Realistic => self.realistic,
            Scenario::Pessimistic => self.pessimistic,
        }
    }
}

/// Round to a whole amount and group thousands with commas, e.g. `€22,500`.
pub fn format_currency(amount: f64, symbol: &str) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if rounded < 0 { "-" } else { "" };
    format!("{}{}{}", sign, symbol, grouped)
}

pub fn duration_label(months: u32) -> String {
    format!("{} month{}", months, if months > 1 { "s" } else { "" })
}

/// Projected end date. Days past the end of the target month clamp to its last day.
pub fn end_date(start: NaiveDate, months: u32) -> NaiveDate {
    start.checked_add_months(Months::new(months)).unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Availability, Role, TeamMember};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn allocation_costing(cost: f64) -> ProjectAllocation {
        ProjectAllocation {
            member_id: 1,
            name: "Test".to_string(),
            role: Role::BackendDeveloper,
            compensation: CompensationKind::Monthly,
            rate: cost,
            allocation_percentage: 100,
            computed_monthly_cost: cost,
        }
    }

    fn member(compensation: CompensationKind, rate: f64) -> TeamMember {
        TeamMember {
            id: 7,
            name: "Emma Williams".to_string(),
            role: Role::ProjectManager,
            compensation,
            rate,
            tech_stack: vec!["Jira".to_string()],
            availability: Availability::Available,
        }
    }

    #[test]
    fn hourly_rate_is_unchanged() {
        for rate in [0.5, 1.0, 85.0, 92.25, 10_000.0] {
            assert_eq!(hourly_equivalent(rate, CompensationKind::Hourly), rate);
        }
    }

    #[test]
    fn monthly_rate_divides_by_working_hours() {
        assert_eq!(hourly_equivalent(6000.0, CompensationKind::Monthly), 37.5);
        for rate in [160.0, 5500.0, 6500.0] {
            assert!(close(hourly_equivalent(rate, CompensationKind::Monthly), rate / 160.0));
        }
    }

    #[test]
    fn allocation_cost_scales_with_percentage() {
        let half_pm = ProjectAllocation::for_member(&member(CompensationKind::Monthly, 6000.0), 50);
        assert!(close(half_pm.computed_monthly_cost, 3000.0));

        let full_dev = ProjectAllocation::for_member(&member(CompensationKind::Hourly, 85.0), 100);
        assert!(close(full_dev.computed_monthly_cost, 13_600.0));
    }

    #[test]
    fn allocation_percentage_is_capped() {
        let allocation = ProjectAllocation::for_member(&member(CompensationKind::Monthly, 6000.0), 250);
        assert_eq!(allocation.allocation_percentage, 100);
        assert!(close(allocation.computed_monthly_cost, 6000.0));
    }

    #[test]
    fn empty_team_costs_nothing() {
        for months in [0, 1, 6, 36] {
            assert_eq!(estimate(&[], months, Scenario::Optimistic), 0.0);
            assert_eq!(estimate(&[], months, Scenario::Pessimistic), 0.0);
        }
    }

    #[test]
    fn zero_duration_costs_nothing() {
        let allocations = vec![allocation_costing(1000.0)];
        assert_eq!(estimate(&allocations, 0, Scenario::Realistic), 0.0);
    }

    #[test]
    fn scenarios_apply_their_multipliers() {
        let allocations = vec![allocation_costing(1000.0), allocation_costing(2000.0)];
        assert!(close(estimate(&allocations, 6, Scenario::Optimistic), 18_000.0));
        assert!(close(estimate(&allocations, 6, Scenario::Realistic), 22_500.0));
        assert!(close(estimate(&allocations, 6, Scenario::Pessimistic), 23_400.0));
    }

    #[test]
    fn breakdown_matches_individual_estimates() {
        let allocations = vec![allocation_costing(1000.0), allocation_costing(2000.0)];
        let breakdown = ScenarioBreakdown::compute(&allocations, 6);
        assert!(close(breakdown.burn_rate, 3000.0));
        assert!(close(breakdown.base_cost, 18_000.0));
        for scenario in Scenario::ALL {
            assert!(close(breakdown.cost_for(scenario), estimate(&allocations, 6, scenario)));
        }
    }

    #[test]
    fn unknown_scenario_label_is_priced_as_realistic() {
        let allocations = vec![allocation_costing(1000.0)];
        let cost = estimate(&allocations, 4, Scenario::from_label("Catastrophic"));
        assert!(close(cost, 5000.0));
    }

    #[test]
    fn currency_is_rounded_and_grouped() {
        assert_eq!(format_currency(22_500.0, "€"), "€22,500");
        assert_eq!(format_currency(1_234_567.6, "€"), "€1,234,568");
        assert_eq!(format_currency(999.4, "$"), "$999");
        assert_eq!(format_currency(0.0, "€"), "€0");
        assert_eq!(format_currency(100_000.0, "€"), "€100,000");
    }

    #[test]
    fn duration_label_pluralises() {
        assert_eq!(duration_label(1), "1 month");
        assert_eq!(duration_label(6), "6 months");
    }

    #[test]
    fn end_date_adds_calendar_months() {
        let start = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        assert_eq!(end_date(start, 6), NaiveDate::from_ymd_opt(2026, 9, 15).unwrap());

        let month_end = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        assert_eq!(end_date(month_end, 1), NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
    }
}
