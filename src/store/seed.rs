use crate::models::{Availability, CompensationKind, Role, TeamMember};

fn member(
    id: u32,
    name: &str,
    role: Role,
    compensation: CompensationKind,
    rate: f64,
    tech_stack: &[&str],
    availability: Availability,
) -> TeamMember {
    TeamMember {
        id,
        name: name.to_string(),
        role,
        compensation,
        rate,
        tech_stack: tech_stack.iter().map(|t| t.to_string()).collect(),
        availability,
    }
}

/// Roster the app starts with unless seeding is turned off
pub fn demo_roster() -> Vec<TeamMember> {
    use Availability::*;
    use CompensationKind::*;

    vec![
        member(1, "Sarah Johnson", Role::FrontendDeveloper, Hourly, 85.0, &["React", "TypeScript", "Tailwind CSS"], Available),
        member(2, "Michael Chen", Role::BackendDeveloper, Hourly, 90.0, &["Node.js", "Python", "PostgreSQL"], Available),
        member(3, "Emma Williams", Role::ProjectManager, Monthly, 6000.0, &["Agile", "Scrum", "Jira"], Busy),
        member(4, "David Martinez", Role::FullStackDeveloper, Hourly, 88.0, &["React", "Node.js", "MongoDB"], Available),
        member(5, "Lisa Anderson", Role::UiUxDesigner, Monthly, 5500.0, &["Figma", "Adobe XD", "Sketch"], Available),
        member(6, "James Wilson", Role::DevOpsEngineer, Hourly, 92.0, &["Docker", "Kubernetes", "AWS", "Terraform"], Available),
        member(7, "Sophia Brown", Role::QaEngineer, Hourly, 75.0, &["Selenium", "Jest", "Cypress"], Available),
        member(8, "Robert Taylor", Role::ProjectManager, Monthly, 6500.0, &["Agile", "Product Management", "Jira"], Busy),
        member(9, "Olivia Garcia", Role::MobileDeveloper, Hourly, 87.0, &["React Native", "Swift", "Kotlin"], Available),
        member(10, "William Lee", Role::BackendDeveloper, Monthly, 5800.0, &["Java", "Spring Boot", "MySQL"], Offline),
    ]
}
