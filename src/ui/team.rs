use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::estimation::hourly_equivalent;
use crate::models::{Availability, CompensationKind, TeamMember};
use crate::ui::components::{next_index, popup::render_delete_confirmation, previous_index};

// Represents the state of the roster screen
pub struct TeamState {
    members: Vec<TeamMember>,
    list_state: ListState,
    show_delete_confirmation: bool,
    currency_symbol: String,
}

impl TeamState {
    pub fn new(members: Vec<TeamMember>, currency_symbol: &str) -> Self {
        let mut list_state = ListState::default();
        if !members.is_empty() {
            list_state.select(Some(0));
        }

        Self {
            members,
            list_state,
            show_delete_confirmation: false,
            currency_symbol: currency_symbol.to_string(),
        }
    }

    pub fn next(&mut self) {
        self.list_state.select(next_index(self.list_state.selected(), self.members.len()));
    }

    pub fn previous(&mut self) {
        self.list_state.select(previous_index(self.list_state.selected(), self.members.len()));
    }

    pub fn toggle_delete_confirmation(&mut self) {
        self.show_delete_confirmation = !self.show_delete_confirmation;
    }

    pub fn selected_member(&self) -> Option<&TeamMember> {
        self.list_state.selected().and_then(|i| self.members.get(i))
    }

    pub fn selected_member_id(&self) -> Option<u32> {
        self.selected_member().map(|m| m.id)
    }
}

pub enum TeamAction {
    Back,
    NewMember,
    EditMember(u32),
    DeleteMember(u32),
}

fn availability_color(availability: Availability) -> Color {
    match availability {
        Availability::Available => Color::Green,
        Availability::Busy => Color::Yellow,
        Availability::Offline => Color::DarkGray,
    }
}

fn member_line<'a>(member: &'a TeamMember, currency_symbol: &str) -> Spans<'a> {
    let rate = format!("{}{}{}", currency_symbol, member.rate, member.compensation.suffix());
    let hourly = match member.compensation {
        CompensationKind::Hourly => String::new(),
        CompensationKind::Monthly => format!(
            " (~{}{:.2}/hr)",
            currency_symbol,
            hourly_equivalent(member.rate, member.compensation)
        ),
    };

    Spans::from(vec![
        Span::styled(format!("[{}] ", member.avatar()), Style::default().fg(Color::Cyan)),
        Span::raw(format!("{:<20}", member.name)),
        Span::raw(format!("{:<22}", member.role.label())),
        Span::raw(format!("{}{:<16}", rate, hourly)),
        Span::styled(
            format!(" {:<10}", member.availability.label()),
            Style::default().fg(availability_color(member.availability)),
        ),
        Span::raw(member.tech_stack.join(", ")),
    ])
}

pub fn render_team<B: Backend>(frame: &mut Frame<B>, state: &mut TeamState) {
    let size = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(3),
        ].as_ref())
        .split(size);

    let items: Vec<ListItem> = state
        .members
        .iter()
        .map(|member| ListItem::new(member_line(member, &state.currency_symbol)))
        .collect();

    let title = format!("Team Members ({})", state.members.len());
    let team_list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(team_list, chunks[0], &mut state.list_state);

    let buttons_text = if state.selected_member().is_some() {
        "<N> New Member | <E> Edit Member | <D> Delete Member | <Esc> Back"
    } else {
        "<N> New Member | <Esc> Back"
    };

    let buttons = Paragraph::new(buttons_text)
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));

    frame.render_widget(buttons, chunks[1]);

    if state.show_delete_confirmation {
        let name = state.selected_member().map(|m| m.name.clone()).unwrap_or_default();
        render_delete_confirmation(
            frame,
            size,
            &format!("Remove {} from the team?", name),
            "Saved projects keep their budgets.",
        );
    }
}

pub fn handle_input(state: &mut TeamState) -> Result<Option<TeamAction>> {
    if let Event::Key(key) = event::read()? {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                if state.show_delete_confirmation {
                    state.toggle_delete_confirmation();
                } else {
                    return Ok(Some(TeamAction::Back));
                }
            }
            KeyCode::Char('n') => {
                if state.show_delete_confirmation {
                    state.toggle_delete_confirmation();
                } else {
                    return Ok(Some(TeamAction::NewMember));
                }
            }
            KeyCode::Char('e') => {
                if !state.show_delete_confirmation {
                    if let Some(id) = state.selected_member_id() {
                        return Ok(Some(TeamAction::EditMember(id)));
                    }
                }
            }
            KeyCode::Char('d') => {
                if !state.show_delete_confirmation && state.selected_member().is_some() {
                    state.toggle_delete_confirmation();
                }
            }
            KeyCode::Char('y') => {
                if state.show_delete_confirmation {
                    if let Some(id) = state.selected_member_id() {
                        state.toggle_delete_confirmation();
                        return Ok(Some(TeamAction::DeleteMember(id)));
                    }
                }
            }
            KeyCode::Down if !state.show_delete_confirmation => state.next(),
            KeyCode::Up if !state.show_delete_confirmation => state.previous(),
            _ => {}
        }
    }
    Ok(None)
}
