#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    FrontendDeveloper,
    BackendDeveloper,
    FullStackDeveloper,
    UiUxDesigner,
    DevOpsEngineer,
    ProjectManager,
    QaEngineer,
    MobileDeveloper,
    DataEngineer,
}

impl Role {
    pub const ALL: [Role; 9] = [
        Role::FrontendDeveloper,
        Role::BackendDeveloper,
        Role::FullStackDeveloper,
        Role::UiUxDesigner,
        Role::DevOpsEngineer,
        Role::ProjectManager,
        Role::QaEngineer,
        Role::MobileDeveloper,
        Role::DataEngineer,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::FrontendDeveloper => "Frontend Developer",
            Self::BackendDeveloper => "Backend Developer",
            Self::FullStackDeveloper => "Full Stack Developer",
            Self::UiUxDesigner => "UI/UX Designer",
            Self::DevOpsEngineer => "DevOps Engineer",
            Self::ProjectManager => "Project Manager",
            Self::QaEngineer => "QA Engineer",
            Self::MobileDeveloper => "Mobile Developer",
            Self::DataEngineer => "Data Engineer",
        }
    }

    fn position(&self) -> usize {
        Self::ALL.iter().position(|r| r == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Whether a rate is quoted per hour or per month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompensationKind {
    Hourly,
    Monthly,
}

impl CompensationKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Hourly => "Hourly Rate",
            Self::Monthly => "Monthly Salary",
        }
    }

    /// Suffix used after an amount, e.g. `€85/hr`
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Hourly => "/hr",
            Self::Monthly => "/mo",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Self::Hourly => Self::Monthly,
            Self::Monthly => Self::Hourly,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available,
    Busy,
    Offline,
}

impl Availability {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Busy => "Busy",
            Self::Offline => "Offline",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Available => Self::Busy,
            Self::Busy => Self::Offline,
            Self::Offline => Self::Available,
        }
    }
}

pub const TECH_STACK_CATALOGUE: [&str; 38] = [
    "React",
    "Vue.js",
    "Angular",
    "Next.js",
    "TypeScript",
    "JavaScript",
    "Node.js",
    "Python",
    "Java",
    "C#",
    ".NET",
    "PHP",
    "Ruby",
    "Go",
    "PostgreSQL",
    "MySQL",
    "MongoDB",
    "Redis",
    "Docker",
    "Kubernetes",
    "AWS",
    "Azure",
    "GCP",
    "Terraform",
    "Jenkins",
    "GitHub Actions",
    "Tailwind CSS",
    "SASS",
    "Figma",
    "Adobe XD",
    "Sketch",
    "REST API",
    "GraphQL",
    "Microservices",
    "Swift",
    "Kotlin",
    "React Native",
    "Flutter",
];

/// A person on the roster.
///
/// Edits replace the whole value in the store; no history is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamMember {
    pub id: u32,
    pub name: String,
    pub role: Role,
    pub compensation: CompensationKind,
    pub rate: f64,
    pub tech_stack: Vec<String>,
    pub availability: Availability,
}

impl TeamMember {
    /// Two-letter initials shown next to the name
    pub fn avatar(&self) -> String {
        initials(&self.name)
    }
}

pub fn initials(name: &str) -> String {
    let parts: Vec<&str> = name.split_whitespace().collect();
    let letters: String = if parts.len() >= 2 {
        parts[..2].iter().filter_map(|p| p.chars().next()).collect()
    } else {
        name.trim().chars().take(2).collect()
    };
    letters.to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_use_first_two_words() {
        assert_eq!(initials("Sarah Johnson"), "SJ");
        assert_eq!(initials("Mary Ann Lee"), "MA");
    }

    #[test]
    fn initials_fall_back_to_first_two_characters() {
        assert_eq!(initials("cher"), "CH");
        assert_eq!(initials("  x "), "X");
    }

    #[test]
    fn role_cycles_through_every_value() {
        let mut role = Role::FrontendDeveloper;
        for _ in 0..Role::ALL.len() {
            role = role.next();
        }
        assert_eq!(role, Role::FrontendDeveloper);
        assert_eq!(Role::FrontendDeveloper.previous(), Role::DataEngineer);
    }
}
