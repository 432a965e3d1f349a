pub mod components;
pub mod dashboard;
pub mod team;
pub mod team_member_wizard;
pub mod estimate_wizard;
pub mod results;
pub mod saved_projects;
