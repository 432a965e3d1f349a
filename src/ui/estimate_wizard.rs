use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use thiserror::Error;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::estimation::{burn_rate, format_currency};
use crate::models::{Complexity, Feature, ProjectAllocation, ProjectEstimate, TeamMember};
use crate::ui::components::{next_index, number_input::NumberInputState, popup::render_error, previous_index};

const DEFAULT_DURATION_MONTHS: u32 = 3;
const MAX_DURATION_MONTHS: u32 = 60;
const DEFAULT_STORY_POINTS: u32 = 3;
const ALLOCATION_STEP: u8 = 10;

#[derive(Debug, Error, PartialEq)]
pub enum EstimateError {
    #[error("Please enter a project name")]
    MissingName,
    #[error("Please allocate at least one team member")]
    NoTeam,
}

#[derive(Clone, Copy, PartialEq)]
pub enum EstimateField {
    Name,
    Client,
    Duration,
    Features,
    Team,
}

// Sub-field of the feature currently being edited
#[derive(Clone, Copy, PartialEq)]
pub enum FeatureField {
    Name,
    Complexity,
    StoryPoints,
}

pub struct EstimateWizardState {
    pub name: String,
    pub client: String,
    pub duration: NumberInputState,
    pub features: Vec<Feature>,
    roster: Vec<TeamMember>,
    allocations: Vec<u8>,
    pub current_field: EstimateField,
    pub editing: bool,
    features_list_state: ListState,
    editing_feature: Option<(usize, FeatureField, String)>, // (index, field, current value)
    team_list_state: ListState,
    show_error: Option<String>,
    currency_symbol: String,
}

impl EstimateWizardState {
    pub fn new(roster: Vec<TeamMember>, currency_symbol: &str) -> Self {
        let allocations = vec![0; roster.len()];
        let mut team_list_state = ListState::default();
        if !roster.is_empty() {
            team_list_state.select(Some(0));
        }

        Self {
            name: String::new(),
            client: String::new(),
            duration: NumberInputState::new(DEFAULT_DURATION_MONTHS, 1, MAX_DURATION_MONTHS),
            features: Vec::new(),
            roster,
            allocations,
            current_field: EstimateField::Name,
            editing: false,
            features_list_state: ListState::default(),
            editing_feature: None,
            team_list_state,
            show_error: None,
            currency_symbol: currency_symbol.to_string(),
        }
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
        if self.current_field == EstimateField::Duration {
            self.duration.toggle_editing();
            self.duration.editing = self.editing;
        }
        if !self.editing {
            self.editing_feature = None;
        }
    }

    pub fn next_field(&mut self) {
        self.current_field = match self.current_field {
            EstimateField::Name => EstimateField::Client,
            EstimateField::Client => EstimateField::Duration,
            EstimateField::Duration => EstimateField::Features,
            EstimateField::Features => EstimateField::Team,
            EstimateField::Team => EstimateField::Name,
        };
    }

    pub fn previous_field(&mut self) {
        self.current_field = match self.current_field {
            EstimateField::Name => EstimateField::Team,
            EstimateField::Client => EstimateField::Name,
            EstimateField::Duration => EstimateField::Client,
            EstimateField::Features => EstimateField::Duration,
            EstimateField::Team => EstimateField::Features,
        };
    }

    // Feature list operations

    pub fn add_feature(&mut self) {
        let id = self.features.iter().map(|f| f.id).max().unwrap_or(0) + 1;
        self.features.push(Feature {
            id,
            name: String::new(),
            complexity: Complexity::Medium,
            story_points: DEFAULT_STORY_POINTS,
        });

        let index = self.features.len() - 1;
        self.features_list_state.select(Some(index));
        self.editing_feature = Some((index, FeatureField::Name, String::new()));
    }

    pub fn edit_feature(&mut self) {
        if let Some(selected) = self.features_list_state.selected() {
            if let Some(feature) = self.features.get(selected) {
                self.editing_feature = Some((selected, FeatureField::Name, feature.name.clone()));
            }
        }
    }

    pub fn delete_feature(&mut self) {
        if let Some(selected) = self.features_list_state.selected() {
            if selected < self.features.len() {
                self.features.remove(selected);

                let selection = if self.features.is_empty() {
                    None
                } else {
                    Some(selected.min(self.features.len() - 1))
                };
                self.features_list_state.select(selection);
                self.editing_feature = None;
            }
        }
    }

    /// Store the buffered value and move to the next sub-field, finishing after story points.
    pub fn next_field_in_feature(&mut self) {
        let Some((idx, field, value)) = self.editing_feature.take() else {
            return;
        };
        let Some(feature) = self.features.get_mut(idx) else {
            return;
        };

        self.editing_feature = match field {
            FeatureField::Name => {
                feature.name = value.trim().to_string();
                Some((idx, FeatureField::Complexity, String::new()))
            }
            FeatureField::Complexity => Some((idx, FeatureField::StoryPoints, feature.story_points.to_string())),
            FeatureField::StoryPoints => match value.parse::<u32>() {
                Ok(points) => {
                    feature.story_points = points;
                    None
                }
                Err(_) => {
                    self.show_error = Some("Invalid story points. Please enter a whole number.".to_string());
                    Some((idx, FeatureField::StoryPoints, value))
                }
            },
        };
    }

    fn edit_feature_value(&mut self, key: KeyCode) {
        let Some((idx, field, value)) = self.editing_feature.as_mut() else {
            return;
        };

        match (*field, key) {
            (FeatureField::Name, KeyCode::Char(c)) => value.push(c),
            (FeatureField::StoryPoints, KeyCode::Char(c)) if c.is_ascii_digit() => value.push(c),
            (FeatureField::Name | FeatureField::StoryPoints, KeyCode::Backspace) => {
                value.pop();
            }
            (FeatureField::Complexity, KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')) => {
                if let Some(feature) = self.features.get_mut(*idx) {
                    feature.complexity = feature.complexity.next();
                }
            }
            _ => {}
        }
    }

    // Team allocation operations

    pub fn set_allocation(&mut self, index: usize, percentage: u8) {
        if let Some(slot) = self.allocations.get_mut(index) {
            *slot = percentage.min(100);
        }
    }

    fn adjust_selected_allocation(&mut self, key: KeyCode) {
        let Some(index) = self.team_list_state.selected() else {
            return;
        };
        let Some(current) = self.allocations.get(index).copied() else {
            return;
        };

        let updated = match key {
            KeyCode::Char(' ') => {
                if current == 0 {
                    100
                } else {
                    0
                }
            }
            KeyCode::Right => current.saturating_add(ALLOCATION_STEP).min(100),
            KeyCode::Left => current.saturating_sub(ALLOCATION_STEP),
            _ => current,
        };
        self.set_allocation(index, updated);
    }

    /// Allocations for every member with a non-zero share, priced from the roster snapshot
    pub fn project_allocations(&self) -> Vec<ProjectAllocation> {
        self.roster
            .iter()
            .zip(&self.allocations)
            .filter(|(_, pct)| **pct > 0)
            .map(|(member, pct)| ProjectAllocation::for_member(member, *pct))
            .collect()
    }

    pub fn edit_current_field(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        match self.current_field {
            EstimateField::Name => match key {
                KeyCode::Char(c) => self.name.push(c),
                KeyCode::Backspace => {
                    self.name.pop();
                }
                _ => {}
            },
            EstimateField::Client => match key {
                KeyCode::Char(c) => self.client.push(c),
                KeyCode::Backspace => {
                    self.client.pop();
                }
                _ => {}
            },
            EstimateField::Duration => self.duration.handle_input(key),
            EstimateField::Features => {
                if self.editing_feature.is_some() {
                    self.edit_feature_value(key);
                } else {
                    match key {
                        KeyCode::Char('a') => self.add_feature(),
                        KeyCode::Char('e') => self.edit_feature(),
                        KeyCode::Char('d') => self.delete_feature(),
                        KeyCode::Down => {
                            let next = next_index(self.features_list_state.selected(), self.features.len());
                            self.features_list_state.select(next);
                        }
                        KeyCode::Up => {
                            let previous = previous_index(self.features_list_state.selected(), self.features.len());
                            self.features_list_state.select(previous);
                        }
                        _ => {}
                    }
                }
            }
            EstimateField::Team => match key {
                KeyCode::Down => {
                    let next = next_index(self.team_list_state.selected(), self.roster.len());
                    self.team_list_state.select(next);
                }
                KeyCode::Up => {
                    let previous = previous_index(self.team_list_state.selected(), self.roster.len());
                    self.team_list_state.select(previous);
                }
                _ => self.adjust_selected_allocation(key),
            },
        }
    }

    /// The estimate described by the form, or the first thing missing from it.
    pub fn validate(&self) -> std::result::Result<ProjectEstimate, EstimateError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(EstimateError::MissingName);
        }

        let allocations = self.project_allocations();
        if allocations.is_empty() {
            return Err(EstimateError::NoTeam);
        }

        let client = self.client.trim();
        Ok(ProjectEstimate {
            name: name.to_string(),
            client: if client.is_empty() { None } else { Some(client.to_string()) },
            features: self.features.iter().filter(|f| !f.name.is_empty()).cloned().collect(),
            allocations,
            duration_months: self.duration.value,
        })
    }
}

pub enum EstimateWizardAction {
    Cancel,
    ShowResults(ProjectEstimate),
}

pub fn render_estimate_wizard<B: Backend>(frame: &mut Frame<B>, state: &mut EstimateWizardState) {
    let size = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3),  // Title
                Constraint::Length(5),  // Project details
                Constraint::Min(6),     // Features and team
                Constraint::Length(3),  // Help
            ]
            .as_ref(),
        )
        .split(size);

    let burn = burn_rate(&state.project_allocations());
    let title = Paragraph::new(Spans::from(vec![
        Span::styled("New Project Estimate", Style::default().fg(Color::Cyan)),
        Span::raw(format!(
            "   Monthly burn rate: {}",
            format_currency(burn, &state.currency_symbol)
        )),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    render_details(frame, state, chunks[1]);

    let lists = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)].as_ref())
        .split(chunks[2]);
    render_features(frame, state, lists[0]);
    render_team(frame, state, lists[1]);

    let help_text = match (state.editing, state.current_field) {
        (false, _) => "Enter - Edit field | Up/Down - Navigate fields | R - Review scenarios | Esc - Cancel",
        (true, EstimateField::Duration) => "Digits or Left/Right - Set months | Enter - Done",
        (true, EstimateField::Features) => {
            if state.editing_feature.is_some() {
                "Tab/Enter - Next field | Left/Right - Complexity | Esc - Stop editing"
            } else {
                "A - Add feature | E - Edit selected | D - Delete selected | Enter - Done"
            }
        }
        (true, EstimateField::Team) => "Up/Down - Select | Space - On/Off | Left/Right - -/+10% | Enter - Done",
        (true, _) => "Enter - Save field | Esc - Done editing",
    };

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[3]);

    if let Some(error) = &state.show_error {
        render_error(frame, size, error);
    }
}

fn field_style(state: &EstimateWizardState, field: EstimateField) -> Style {
    if state.current_field == field {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn render_details<B: Backend>(frame: &mut Frame<B>, state: &EstimateWizardState, area: Rect) {
    let cursor = |field: EstimateField| {
        if state.editing && state.current_field == field {
            "|"
        } else {
            ""
        }
    };

    let duration_value = if state.current_field == EstimateField::Duration && state.editing {
        state.duration.get_display_string()
    } else {
        format!("{} month(s)", state.duration.value)
    };

    let lines = vec![
        Spans::from(vec![
            Span::styled("Project Name: ", field_style(state, EstimateField::Name)),
            Span::raw(format!("{}{}", state.name, cursor(EstimateField::Name))),
        ]),
        Spans::from(vec![
            Span::styled("Client (optional): ", field_style(state, EstimateField::Client)),
            Span::raw(format!("{}{}", state.client, cursor(EstimateField::Client))),
        ]),
        Spans::from(vec![
            Span::styled("Duration: ", field_style(state, EstimateField::Duration)),
            Span::styled(duration_value, Style::default().add_modifier(Modifier::BOLD)),
        ]),
    ];

    let details = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Project Details"));
    frame.render_widget(details, area);
}

fn render_features<B: Backend>(frame: &mut Frame<B>, state: &mut EstimateWizardState, area: Rect) {
    let editing = state.editing_feature.clone();
    let items: Vec<ListItem> = state
        .features
        .iter()
        .enumerate()
        .map(|(i, feature)| {
            let text = match &editing {
                Some((idx, FeatureField::Name, value)) if *idx == i => {
                    format!("> {}| [{}] {} pts", value, feature.complexity.label(), feature.story_points)
                }
                Some((idx, FeatureField::Complexity, _)) if *idx == i => {
                    format!("> {} <{}> {} pts", feature.name, feature.complexity.label(), feature.story_points)
                }
                Some((idx, FeatureField::StoryPoints, value)) if *idx == i => {
                    format!("> {} [{}] {}| pts", feature.name, feature.complexity.label(), value)
                }
                _ => format!("{} [{}] {} pts", feature.name, feature.complexity.label(), feature.story_points),
            };
            ListItem::new(text)
        })
        .collect();

    let total_points: u32 = state.features.iter().map(|f| f.story_points).sum();
    let title = format!("Features ({} pts)", total_points);
    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .style(field_style(state, EstimateField::Features)),
        )
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White));

    frame.render_stateful_widget(list, area, &mut state.features_list_state);
}

fn render_team<B: Backend>(frame: &mut Frame<B>, state: &mut EstimateWizardState, area: Rect) {
    let items: Vec<ListItem> = state
        .roster
        .iter()
        .zip(&state.allocations)
        .map(|(member, pct)| {
            let cost = if *pct > 0 {
                let allocation = ProjectAllocation::for_member(member, *pct);
                format!(
                    " {}/mo",
                    format_currency(allocation.computed_monthly_cost, &state.currency_symbol)
                )
            } else {
                String::new()
            };
            let style = if *pct > 0 {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };

            ListItem::new(Spans::from(vec![
                Span::styled(format!("{:>3}% ", pct), style),
                Span::raw(format!("{} ({})", member.name, member.role.label())),
                Span::styled(cost, style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title("Team Allocation")
                .borders(Borders::ALL)
                .style(field_style(state, EstimateField::Team)),
        )
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White));

    frame.render_stateful_widget(list, area, &mut state.team_list_state);
}

pub fn handle_input(state: &mut EstimateWizardState) -> Result<Option<EstimateWizardAction>> {
    if state.show_error.take().is_some() {
        event::read()?;
        return Ok(None);
    }

    if let Event::Key(key) = event::read()? {
        match key.code {
            KeyCode::Esc => {
                if state.editing {
                    state.toggle_editing();
                } else {
                    return Ok(Some(EstimateWizardAction::Cancel));
                }
            }
            KeyCode::Enter | KeyCode::Tab
                if state.current_field == EstimateField::Features && state.editing_feature.is_some() =>
            {
                state.next_field_in_feature();
            }
            KeyCode::Enter => state.toggle_editing(),
            KeyCode::Up if !state.editing => state.previous_field(),
            KeyCode::Down if !state.editing => state.next_field(),
            KeyCode::Char('r') if !state.editing => match state.validate() {
                Ok(estimate) => return Ok(Some(EstimateWizardAction::ShowResults(estimate))),
                Err(err) => state.show_error = Some(err.to_string()),
            },
            _ if state.editing => state.edit_current_field(key.code),
            _ => {}
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Availability, CompensationKind, Role};

    fn roster() -> Vec<TeamMember> {
        vec![
            TeamMember {
                id: 1,
                name: "Sarah Johnson".to_string(),
                role: Role::FrontendDeveloper,
                compensation: CompensationKind::Hourly,
                rate: 85.0,
                tech_stack: vec!["React".to_string()],
                availability: Availability::Available,
            },
            TeamMember {
                id: 3,
                name: "Emma Williams".to_string(),
                role: Role::ProjectManager,
                compensation: CompensationKind::Monthly,
                rate: 6000.0,
                tech_stack: vec!["Jira".to_string()],
                availability: Availability::Busy,
            },
        ]
    }

    fn typed(state: &mut EstimateWizardState, text: &str) {
        for c in text.chars() {
            state.edit_current_field(KeyCode::Char(c));
        }
    }

    #[test]
    fn requires_a_name_then_a_team() {
        let mut state = EstimateWizardState::new(roster(), "€");
        assert_eq!(state.validate(), Err(EstimateError::MissingName));

        state.name = "Portal".to_string();
        assert_eq!(state.validate(), Err(EstimateError::NoTeam));

        state.set_allocation(1, 50);
        let estimate = state.validate().unwrap();
        assert_eq!(estimate.allocations.len(), 1);
        assert_eq!(estimate.allocations[0].member_id, 3);
        assert_eq!(estimate.allocations[0].computed_monthly_cost, 3000.0);
        assert_eq!(estimate.duration_months, DEFAULT_DURATION_MONTHS);
        assert_eq!(estimate.client, None);
    }

    #[test]
    fn allocation_keys_toggle_and_step() {
        let mut state = EstimateWizardState::new(roster(), "€");
        state.current_field = EstimateField::Team;
        state.toggle_editing();

        state.edit_current_field(KeyCode::Char(' '));
        assert_eq!(state.allocations, vec![100, 0]);
        state.edit_current_field(KeyCode::Left);
        state.edit_current_field(KeyCode::Left);
        assert_eq!(state.allocations, vec![80, 0]);
        state.edit_current_field(KeyCode::Right);
        state.edit_current_field(KeyCode::Right);
        state.edit_current_field(KeyCode::Right);
        assert_eq!(state.allocations, vec![100, 0]);

        state.edit_current_field(KeyCode::Down);
        state.edit_current_field(KeyCode::Right);
        assert_eq!(state.allocations, vec![100, 10]);
        state.edit_current_field(KeyCode::Char(' '));
        assert_eq!(state.allocations, vec![100, 0]);
    }

    #[test]
    fn features_are_added_edited_and_removed() {
        let mut state = EstimateWizardState::new(roster(), "€");
        state.current_field = EstimateField::Features;
        state.toggle_editing();

        state.edit_current_field(KeyCode::Char('a'));
        typed(&mut state, "Login");
        state.next_field_in_feature();
        state.edit_current_field(KeyCode::Right);
        state.next_field_in_feature();
        state.edit_current_field(KeyCode::Backspace);
        typed(&mut state, "8");
        state.next_field_in_feature();

        assert_eq!(
            state.features,
            vec![Feature {
                id: 1,
                name: "Login".to_string(),
                complexity: Complexity::High,
                story_points: 8,
            }]
        );

        state.edit_current_field(KeyCode::Char('d'));
        assert!(state.features.is_empty());
    }

    #[test]
    fn duration_is_edited_through_the_number_input() {
        let mut state = EstimateWizardState::new(roster(), "€");
        state.current_field = EstimateField::Duration;
        state.toggle_editing();
        typed(&mut state, "12");
        state.toggle_editing();
        assert_eq!(state.duration.value, 12);
        assert!(!state.duration.editing);
    }

    #[test]
    fn blank_client_and_unnamed_features_are_dropped() {
        let mut state = EstimateWizardState::new(roster(), "€");
        state.name = "Portal".to_string();
        state.client = "  ".to_string();
        state.set_allocation(0, 100);
        state.current_field = EstimateField::Features;
        state.toggle_editing();
        state.edit_current_field(KeyCode::Char('a'));

        let estimate = state.validate().unwrap();
        assert_eq!(estimate.client_label(), "Not specified");
        assert!(estimate.features.is_empty());
    }
}
