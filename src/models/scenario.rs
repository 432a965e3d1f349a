#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    Optimistic,
    Realistic,
    Pessimistic,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [Scenario::Optimistic, Scenario::Realistic, Scenario::Pessimistic];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Optimistic => "Optimistic",
            Self::Realistic => "Realistic",
            Self::Pessimistic => "Pessimistic",
        }
    }

    /// Risk buffer applied on top of the base cost
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Optimistic => 1.0,
            Self::Realistic => 1.25,
            Self::Pessimistic => 1.30,
        }
    }

    /// Parse a scenario label. Anything unrecognised is treated as Realistic.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Optimistic" => Self::Optimistic,
            "Pessimistic" => Self::Pessimistic,
            _ => Self::Realistic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_parse_back() {
        for scenario in Scenario::ALL {
            assert_eq!(Scenario::from_label(scenario.label()), scenario);
        }
    }

    #[test]
    fn unknown_label_falls_back_to_realistic() {
        assert_eq!(Scenario::from_label("whatever"), Scenario::Realistic);
        assert_eq!(Scenario::from_label("optimistic"), Scenario::Realistic);
        assert_eq!(Scenario::from_label(""), Scenario::Realistic);
    }
}
