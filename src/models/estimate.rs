use super::{Feature, ProjectAllocation};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProjectEstimate {
    pub name: String,
    pub client: Option<String>,
    pub features: Vec<Feature>,
    pub allocations: Vec<ProjectAllocation>,
    pub duration_months: u32,
}

impl ProjectEstimate {
    /// Client name as shown on saved records
    pub fn client_label(&self) -> &str {
        match self.client.as_deref() {
            Some(client) if !client.trim().is_empty() => client,
            _ => "Not specified",
        }
    }
}
