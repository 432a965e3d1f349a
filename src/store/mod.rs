mod seed;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;

use crate::config::Config;
use crate::estimation::{duration_label, end_date, estimate, format_currency};
use crate::models::{ProjectEstimate, ProjectStatus, SavedProject, Scenario, TeamMember};

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("team member {0} not found")]
    TeamMemberNotFound(u32),
    #[error("saved project {0} not found")]
    SavedProjectNotFound(u32),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// In-memory application state: the roster and every saved project.
///
/// Changes replace whole values; nothing is patched in place field by field.
pub struct Store {
    team_members: Vec<TeamMember>,
    saved_projects: Vec<SavedProject>,
    next_member_id: u32,
    next_project_id: u32,
    currency_symbol: String,
}

impl Store {
    pub fn new(currency_symbol: &str) -> Self {
        Self {
            team_members: Vec::new(),
            saved_projects: Vec::new(),
            next_member_id: 1,
            next_project_id: 1,
            currency_symbol: currency_symbol.to_string(),
        }
    }

    /// Store preloaded with the demo roster
    pub fn with_roster(currency_symbol: &str, roster: Vec<TeamMember>) -> Self {
        let mut store = Self::new(currency_symbol);
        store.next_member_id = roster.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        store.team_members = roster;
        store
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    // Team member operations
    pub fn load_team_members(&self) -> Vec<TeamMember> {
        self.team_members.clone()
    }

    pub fn get_team_member(&self, id: u32) -> Result<TeamMember> {
        self.team_members
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or(StoreError::TeamMemberNotFound(id))
    }

    pub fn create_team_member(&mut self, member: &TeamMember) -> u32 {
        let id = self.next_member_id;
        self.next_member_id += 1;

        self.team_members.push(TeamMember { id, ..member.clone() });
        info!(id, name = %member.name, role = member.role.label(), "team member added");

        id
    }

    pub fn update_team_member(&mut self, member: &TeamMember) -> Result<()> {
        let slot = self
            .team_members
            .iter_mut()
            .find(|m| m.id == member.id)
            .ok_or(StoreError::TeamMemberNotFound(member.id))?;

        *slot = member.clone();
        info!(id = member.id, name = %member.name, "team member updated");

        Ok(())
    }

    pub fn delete_team_member(&mut self, id: u32) -> Result<()> {
        let index = self
            .team_members
            .iter()
            .position(|m| m.id == id)
            .ok_or(StoreError::TeamMemberNotFound(id))?;

        let removed = self.team_members.remove(index);
        info!(id, name = %removed.name, "team member removed");

        Ok(())
    }

    // Saved project operations

    /// Freeze an estimate under the chosen scenario. The budget is computed
    /// here once and stored as text.
    pub fn save_project(&mut self, estimate_data: &ProjectEstimate, scenario: Scenario, today: NaiveDate) -> SavedProject {
        let cost = estimate(&estimate_data.allocations, estimate_data.duration_months, scenario);

        let project = SavedProject {
            id: self.next_project_id,
            name: estimate_data.name.clone(),
            client: estimate_data.client_label().to_string(),
            status: ProjectStatus::Draft,
            budget: format_currency(cost, &self.currency_symbol),
            spent: format_currency(0.0, &self.currency_symbol),
            scenario: scenario.label().to_string(),
            start_date: today,
            end_date: end_date(today, estimate_data.duration_months),
            duration: duration_label(estimate_data.duration_months),
            progress: 0,
        };
        self.next_project_id += 1;

        info!(id = project.id, name = %project.name, scenario = %project.scenario, budget = %project.budget, "project saved");
        self.saved_projects.insert(0, project.clone());

        project
    }

    /// Saved projects, newest first
    pub fn load_saved_projects(&self) -> Vec<SavedProject> {
        self.saved_projects.clone()
    }

    pub fn delete_saved_project(&mut self, id: u32) -> Result<()> {
        let index = self
            .saved_projects
            .iter()
            .position(|p| p.id == id)
            .ok_or(StoreError::SavedProjectNotFound(id))?;

        self.saved_projects.remove(index);
        info!(id, "saved project deleted");

        Ok(())
    }
}

/// Build the application store from configuration
pub fn init(config: &Config) -> Store {
    if config.seed_roster {
        let store = Store::with_roster(config.currency_symbol(), seed::demo_roster());
        info!(members = store.team_members.len(), "demo roster loaded");
        store
    } else {
        Store::new(config.currency_symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Availability, CompensationKind, ProjectAllocation, Role};

    fn member(name: &str, compensation: CompensationKind, rate: f64) -> TeamMember {
        TeamMember {
            id: 0,
            name: name.to_string(),
            role: Role::BackendDeveloper,
            compensation,
            rate,
            tech_stack: vec!["Go".to_string()],
            availability: Availability::Available,
        }
    }

    fn estimate_for(store: &Store, ids: &[u32], months: u32) -> ProjectEstimate {
        let allocations = ids
            .iter()
            .map(|id| ProjectAllocation::for_member(&store.get_team_member(*id).unwrap(), 100))
            .collect();
        ProjectEstimate {
            name: "Portal".to_string(),
            client: None,
            features: Vec::new(),
            allocations,
            duration_months: months,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    #[test]
    fn creates_members_with_sequential_ids() {
        let mut store = Store::new("€");
        let first = store.create_team_member(&member("Ann Lee", CompensationKind::Hourly, 80.0));
        let second = store.create_team_member(&member("Bo Kim", CompensationKind::Monthly, 5000.0));

        assert_eq!((first, second), (1, 2));
        assert_eq!(store.get_team_member(2).unwrap().name, "Bo Kim");
    }

    #[test]
    fn seeded_store_continues_after_highest_id() {
        let mut store = Store::with_roster("€", seed::demo_roster());
        assert_eq!(store.load_team_members().len(), 10);

        let id = store.create_team_member(&member("New Hire", CompensationKind::Hourly, 70.0));
        assert_eq!(id, 11);
    }

    #[test]
    fn updates_replace_the_whole_member() {
        let mut store = Store::new("€");
        let id = store.create_team_member(&member("Ann Lee", CompensationKind::Hourly, 80.0));

        let mut edited = store.get_team_member(id).unwrap();
        edited.rate = 95.0;
        edited.availability = Availability::Busy;
        store.update_team_member(&edited).unwrap();

        assert_eq!(store.get_team_member(id).unwrap(), edited);
    }

    #[test]
    fn unknown_ids_are_reported() {
        let mut store = Store::new("€");
        assert_eq!(store.get_team_member(9), Err(StoreError::TeamMemberNotFound(9)));
        assert_eq!(store.delete_team_member(9), Err(StoreError::TeamMemberNotFound(9)));
        assert_eq!(
            store.update_team_member(&TeamMember { id: 4, ..member("X Y", CompensationKind::Hourly, 1.0) }),
            Err(StoreError::TeamMemberNotFound(4))
        );
        assert_eq!(store.delete_saved_project(3), Err(StoreError::SavedProjectNotFound(3)));
    }

    #[test]
    fn saved_project_captures_the_scenario_budget() {
        let mut store = Store::new("€");
        let pm = store.create_team_member(&member("Emma Williams", CompensationKind::Monthly, 1000.0));
        let dev = store.create_team_member(&member("Michael Chen", CompensationKind::Monthly, 2000.0));
        let estimate_data = estimate_for(&store, &[pm, dev], 6);

        let saved = store.save_project(&estimate_data, Scenario::Realistic, today());

        assert_eq!(saved.budget, "€22,500");
        assert_eq!(saved.spent, "€0");
        assert_eq!(saved.client, "Not specified");
        assert_eq!(saved.status, ProjectStatus::Draft);
        assert_eq!(saved.scenario, "Realistic");
        assert_eq!(saved.duration, "6 months");
        assert_eq!(saved.progress, 0);
        assert_eq!(saved.end_date, NaiveDate::from_ymd_opt(2027, 4, 17).unwrap());
    }

    #[test]
    fn saved_projects_are_frozen_against_roster_changes() {
        let mut store = Store::new("€");
        let id = store.create_team_member(&member("Ann Lee", CompensationKind::Monthly, 1000.0));
        let estimate_data = estimate_for(&store, &[id], 2);
        store.save_project(&estimate_data, Scenario::Pessimistic, today());

        let mut raised = store.get_team_member(id).unwrap();
        raised.rate = 9000.0;
        store.update_team_member(&raised).unwrap();
        store.delete_team_member(id).unwrap();

        let saved = store.load_saved_projects();
        assert_eq!(saved[0].budget, "€2,600");
    }

    #[test]
    fn saved_projects_list_newest_first() {
        let mut store = Store::new("€");
        let id = store.create_team_member(&member("Ann Lee", CompensationKind::Monthly, 1000.0));
        let mut estimate_data = estimate_for(&store, &[id], 1);
        store.save_project(&estimate_data, Scenario::Optimistic, today());
        estimate_data.name = "Second".to_string();
        estimate_data.client = Some("Acme".to_string());
        store.save_project(&estimate_data, Scenario::Optimistic, today());

        let saved = store.load_saved_projects();
        assert_eq!(saved.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2, 1]);
        assert_eq!(saved[0].client, "Acme");
        assert_eq!(saved[0].duration, "1 month");

        store.delete_saved_project(2).unwrap();
        assert_eq!(store.load_saved_projects().len(), 1);
    }

    #[test]
    fn init_respects_seed_setting() {
        let seeded = init(&Config::default());
        assert_eq!(seeded.load_team_members().len(), 10);

        let empty = init(&Config { seed_roster: false, ..Config::default() });
        assert!(empty.load_team_members().is_empty());
    }
}
