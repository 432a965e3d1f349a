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

use crate::estimation::hourly_equivalent;
use crate::models::{Availability, CompensationKind, Role, TeamMember, TECH_STACK_CATALOGUE};
use crate::ui::components::{next_index, popup::render_error, previous_index};

/// Reasons the member form refuses to save, checked in this order
#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("Please enter employee name")]
    MissingName,
    #[error("Please select a role")]
    MissingRole,
    #[error("Please enter a valid rate")]
    InvalidRate,
    #[error("Please select at least one tech stack")]
    NoTechStack,
}

pub enum TeamMemberWizardAction {
    Cancel,
    Save(TeamMember),
}

#[derive(Clone, PartialEq, Copy)]
pub enum MemberField {
    Name,
    Role,
    Compensation,
    Rate,
    TechStack,
    Availability,
}

pub struct TeamMemberWizardState {
    member_id: Option<u32>,
    pub name: String,
    pub role: Option<Role>,
    pub compensation: CompensationKind,
    pub rate_input: String,
    pub tech_stack: Vec<String>,
    pub availability: Availability,
    pub current_field: MemberField,
    pub editing: bool,
    tech_options: Vec<String>,
    tech_list_state: ListState,
    show_error: Option<String>,
    currency_symbol: String,
}

impl TeamMemberWizardState {
    pub fn new(currency_symbol: &str) -> Self {
        Self {
            member_id: None,
            name: String::new(),
            role: None,
            compensation: CompensationKind::Hourly,
            rate_input: String::new(),
            tech_stack: Vec::new(),
            availability: Availability::Available,
            current_field: MemberField::Name,
            editing: false,
            tech_options: TECH_STACK_CATALOGUE.iter().map(|t| t.to_string()).collect(),
            tech_list_state: ListState::default(),
            show_error: None,
            currency_symbol: currency_symbol.to_string(),
        }
    }

    pub fn from_existing(member: TeamMember, currency_symbol: &str) -> Self {
        let mut state = Self::new(currency_symbol);

        // Tags outside the catalogue stay selectable
        for tag in &member.tech_stack {
            if !state.tech_options.contains(tag) {
                state.tech_options.push(tag.clone());
            }
        }

        state.member_id = Some(member.id);
        state.name = member.name;
        state.role = Some(member.role);
        state.compensation = member.compensation;
        state.rate_input = member.rate.to_string();
        state.tech_stack = member.tech_stack;
        state.availability = member.availability;
        state
    }

    pub fn is_new(&self) -> bool {
        self.member_id.is_none()
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
        if self.editing && self.current_field == MemberField::TechStack && self.tech_list_state.selected().is_none() {
            self.tech_list_state.select(Some(0));
        }
    }

    pub fn next_field(&mut self) {
        self.current_field = match self.current_field {
            MemberField::Name => MemberField::Role,
            MemberField::Role => MemberField::Compensation,
            MemberField::Compensation => MemberField::Rate,
            MemberField::Rate => MemberField::TechStack,
            MemberField::TechStack => MemberField::Availability,
            MemberField::Availability => MemberField::Name,
        };
    }

    pub fn previous_field(&mut self) {
        self.current_field = match self.current_field {
            MemberField::Name => MemberField::Availability,
            MemberField::Role => MemberField::Name,
            MemberField::Compensation => MemberField::Role,
            MemberField::Rate => MemberField::Compensation,
            MemberField::TechStack => MemberField::Rate,
            MemberField::Availability => MemberField::TechStack,
        };
    }

    pub fn toggle_tech(&mut self, tech: &str) {
        if let Some(pos) = self.tech_stack.iter().position(|t| t == tech) {
            self.tech_stack.remove(pos);
        } else {
            self.tech_stack.push(tech.to_string());
        }
    }

    fn toggle_highlighted_tech(&mut self) {
        let highlighted = self
            .tech_list_state
            .selected()
            .and_then(|i| self.tech_options.get(i))
            .cloned();
        if let Some(tech) = highlighted {
            self.toggle_tech(&tech);
        }
    }

    pub fn edit_current_field(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        match self.current_field {
            MemberField::Name => match key {
                KeyCode::Char(c) => self.name.push(c),
                KeyCode::Backspace => {
                    self.name.pop();
                }
                _ => {}
            },
            MemberField::Role => match key {
                KeyCode::Right | KeyCode::Char(' ') => {
                    self.role = Some(self.role.map_or(Role::ALL[0], |r| r.next()));
                }
                KeyCode::Left => {
                    self.role = Some(self.role.map_or(Role::ALL[Role::ALL.len() - 1], |r| r.previous()));
                }
                _ => {}
            },
            MemberField::Compensation => {
                if matches!(key, KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')) {
                    self.compensation = self.compensation.toggle();
                }
            }
            MemberField::Rate => match key {
                KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => self.rate_input.push(c),
                KeyCode::Backspace => {
                    self.rate_input.pop();
                }
                _ => {}
            },
            MemberField::TechStack => match key {
                KeyCode::Down => {
                    let next = next_index(self.tech_list_state.selected(), self.tech_options.len());
                    self.tech_list_state.select(next);
                }
                KeyCode::Up => {
                    let previous = previous_index(self.tech_list_state.selected(), self.tech_options.len());
                    self.tech_list_state.select(previous);
                }
                KeyCode::Char(' ') => self.toggle_highlighted_tech(),
                _ => {}
            },
            MemberField::Availability => {
                if matches!(key, KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')) {
                    self.availability = self.availability.next();
                }
            }
        }
    }

    /// Build the member the form describes, or the first rule it breaks.
    pub fn validate(&self) -> std::result::Result<TeamMember, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }
        let role = self.role.ok_or(FormError::MissingRole)?;
        let rate = match self.rate_input.trim().parse::<f64>() {
            Ok(rate) if rate.is_finite() && rate > 0.0 => rate,
            _ => return Err(FormError::InvalidRate),
        };
        if self.tech_stack.is_empty() {
            return Err(FormError::NoTechStack);
        }

        Ok(TeamMember {
            id: self.member_id.unwrap_or(0),
            name: name.to_string(),
            role,
            compensation: self.compensation,
            rate,
            tech_stack: self.tech_stack.clone(),
            availability: self.availability,
        })
    }
}

pub fn render_team_member_wizard<B: Backend>(frame: &mut Frame<B>, state: &mut TeamMemberWizardState) {
    let size = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(8),
                Constraint::Min(6),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(size);

    let title_text = if state.is_new() {
        "Add New Employee"
    } else {
        "Edit Employee"
    };

    let title = Paragraph::new(title_text)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    render_form(frame, state, chunks[1]);
    render_tech_stack(frame, state, chunks[2]);

    let help_text = if state.editing {
        match state.current_field {
            MemberField::Name | MemberField::Rate => "Enter - Save field | Esc - Done editing",
            MemberField::TechStack => "Up/Down - Move | Space - Toggle | Enter - Done",
            _ => "Left/Right - Change value | Enter - Done",
        }
    } else {
        "Enter - Edit field | Up/Down - Navigate fields | S - Save employee | Esc - Cancel"
    };

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[3]);

    if let Some(error) = &state.show_error {
        render_error(frame, size, error);
    }
}

fn render_form<B: Backend>(frame: &mut Frame<B>, state: &TeamMemberWizardState, area: Rect) {
    let rate_label = match state.compensation {
        CompensationKind::Hourly => format!("Hourly Rate ({})", state.currency_symbol),
        CompensationKind::Monthly => format!("Monthly Salary ({})", state.currency_symbol),
    };

    let rate_value = match (state.compensation, state.rate_input.parse::<f64>()) {
        (CompensationKind::Monthly, Ok(rate)) if rate > 0.0 => format!(
            "{} (~{}{:.2}/hr)",
            state.rate_input,
            state.currency_symbol,
            hourly_equivalent(rate, state.compensation)
        ),
        _ => state.rate_input.clone(),
    };

    let fields = [
        (MemberField::Name, "Full Name".to_string(), state.name.clone()),
        (
            MemberField::Role,
            "Role".to_string(),
            state.role.map_or("Select role".to_string(), |r| r.label().to_string()),
        ),
        (MemberField::Compensation, "Compensation Type".to_string(), state.compensation.label().to_string()),
        (MemberField::Rate, rate_label, rate_value),
        (
            MemberField::TechStack,
            "Tech Stack".to_string(),
            format!("{} selected", state.tech_stack.len()),
        ),
        (MemberField::Availability, "Availability".to_string(), state.availability.label().to_string()),
    ];

    let items: Vec<ListItem> = fields
        .iter()
        .map(|(field, name, value)| {
            let focused = *field == state.current_field;
            let label_style = if focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            let value_span = if focused && state.editing {
                let cursor = matches!(field, MemberField::Name | MemberField::Rate);
                Span::styled(
                    format!("{}{}", value, if cursor { "|" } else { "" }),
                    Style::default().add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw(value.clone())
            };

            ListItem::new(Spans::from(vec![
                Span::styled(format!("{}: ", name), label_style),
                value_span,
            ]))
        })
        .collect();

    let form_list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Employee Details"));

    frame.render_widget(form_list, area);
}

fn render_tech_stack<B: Backend>(frame: &mut Frame<B>, state: &mut TeamMemberWizardState, area: Rect) {
    let items: Vec<ListItem> = state
        .tech_options
        .iter()
        .map(|tech| {
            let mark = if state.tech_stack.contains(tech) { "[x]" } else { "[ ]" };
            ListItem::new(format!("{} {}", mark, tech))
        })
        .collect();

    let active = state.editing && state.current_field == MemberField::TechStack;
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Tech Stack")
        .style(if active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        });

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White));

    frame.render_stateful_widget(list, area, &mut state.tech_list_state);
}

pub fn handle_input(state: &mut TeamMemberWizardState) -> Result<Option<TeamMemberWizardAction>> {
    // Any key dismisses a shown error
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
                    return Ok(Some(TeamMemberWizardAction::Cancel));
                }
            }
            KeyCode::Enter => state.toggle_editing(),
            KeyCode::Up if !state.editing => state.previous_field(),
            KeyCode::Down if !state.editing => state.next_field(),
            KeyCode::Char('s') if !state.editing => match state.validate() {
                Ok(member) => return Ok(Some(TeamMemberWizardAction::Save(member))),
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

    fn filled_form() -> TeamMemberWizardState {
        let mut state = TeamMemberWizardState::new("€");
        state.name = "  Ada Lovelace ".to_string();
        state.role = Some(Role::DataEngineer);
        state.rate_input = "6000".to_string();
        state.compensation = CompensationKind::Monthly;
        state.toggle_tech("Python");
        state
    }

    #[test]
    fn valid_form_builds_a_trimmed_member() {
        let member = filled_form().validate().unwrap();
        assert_eq!(member.name, "Ada Lovelace");
        assert_eq!(member.rate, 6000.0);
        assert_eq!(member.tech_stack, vec!["Python".to_string()]);
        assert_eq!(member.availability, Availability::Available);
    }

    #[test]
    fn reports_the_first_failing_rule() {
        let mut state = filled_form();
        state.name = "   ".to_string();
        state.rate_input = "abc".to_string();
        assert_eq!(state.validate(), Err(FormError::MissingName));

        state.name = "Ada".to_string();
        state.role = None;
        assert_eq!(state.validate(), Err(FormError::MissingRole));

        state.role = Some(Role::QaEngineer);
        assert_eq!(state.validate(), Err(FormError::InvalidRate));

        state.rate_input = "75".to_string();
        state.toggle_tech("Python");
        assert_eq!(state.validate(), Err(FormError::NoTechStack));
    }

    #[test]
    fn rejects_non_positive_rates() {
        let mut state = filled_form();
        for input in ["", "0", "0.0", "1..2"] {
            state.rate_input = input.to_string();
            assert_eq!(state.validate(), Err(FormError::InvalidRate), "input {:?}", input);
        }
    }

    #[test]
    fn error_messages_match_the_form_hints() {
        assert_eq!(FormError::MissingName.to_string(), "Please enter employee name");
        assert_eq!(FormError::NoTechStack.to_string(), "Please select at least one tech stack");
    }

    #[test]
    fn editing_keeps_identity_and_unknown_tags() {
        let existing = TeamMember {
            id: 3,
            name: "Emma Williams".to_string(),
            role: Role::ProjectManager,
            compensation: CompensationKind::Monthly,
            rate: 6000.0,
            tech_stack: vec!["Agile".to_string(), "Jira".to_string()],
            availability: Availability::Busy,
        };

        let state = TeamMemberWizardState::from_existing(existing.clone(), "€");
        assert!(!state.is_new());
        assert!(state.tech_options.contains(&"Agile".to_string()));
        assert_eq!(state.validate().unwrap(), existing);
    }

    #[test]
    fn key_edits_only_apply_while_editing() {
        let mut state = TeamMemberWizardState::new("€");
        state.edit_current_field(KeyCode::Char('x'));
        assert!(state.name.is_empty());

        state.toggle_editing();
        state.edit_current_field(KeyCode::Char('B'));
        state.edit_current_field(KeyCode::Char('o'));
        assert_eq!(state.name, "Bo");

        state.toggle_editing();
        state.next_field();
        state.toggle_editing();
        state.edit_current_field(KeyCode::Right);
        assert_eq!(state.role, Some(Role::FrontendDeveloper));
        state.edit_current_field(KeyCode::Left);
        assert_eq!(state.role, Some(Role::DataEngineer));
    }

    #[test]
    fn space_toggles_the_highlighted_tag() {
        let mut state = TeamMemberWizardState::new("€");
        state.current_field = MemberField::TechStack;
        state.toggle_editing();
        state.edit_current_field(KeyCode::Down);
        state.edit_current_field(KeyCode::Char(' '));
        assert_eq!(state.tech_stack, vec!["Vue.js".to_string()]);
        state.edit_current_field(KeyCode::Char(' '));
        assert!(state.tech_stack.is_empty());
    }
}
