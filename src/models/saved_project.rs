use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    Active,
    Draft,
    Completed,
    OnHold,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Draft => "draft",
            Self::Completed => "completed",
            Self::OnHold => "on-hold",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Draft => "Draft",
            Self::Completed => "Completed",
            Self::OnHold => "On Hold",
        }
    }
}

/// Snapshot of an estimate taken when a scenario is saved.
///
/// Amounts are stored already formatted and are never recomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedProject {
    pub id: u32,
    pub name: String,
    pub client: String,
    pub status: ProjectStatus,
    pub budget: String,
    pub spent: String,
    pub scenario: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration: String,
    pub progress: u8,
}
