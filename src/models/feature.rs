#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl Complexity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Low,
        }
    }
}

/// A deliverable listed on an estimate. Carried along, never priced.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: u32,
    pub name: String,
    pub complexity: Complexity,
    pub story_points: u32,
}
