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

use crate::ui::components::{next_index, previous_index};

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum MenuEntry {
    Team,
    NewEstimate,
    SavedProjects,
    Quit,
}

impl MenuEntry {
    const ALL: [MenuEntry; 4] = [
        MenuEntry::Team,
        MenuEntry::NewEstimate,
        MenuEntry::SavedProjects,
        MenuEntry::Quit,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::Team => "Team Members",
            Self::NewEstimate => "New Project Estimate",
            Self::SavedProjects => "Saved Projects",
            Self::Quit => "Quit",
        }
    }
}

// Landing screen with roster and project counts
pub struct DashboardState {
    list_state: ListState,
    team_size: usize,
    available_members: usize,
    saved_projects: usize,
}

impl DashboardState {
    pub fn new(team_size: usize, available_members: usize, saved_projects: usize) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            list_state,
            team_size,
            available_members,
            saved_projects,
        }
    }

    pub fn next(&mut self) {
        self.list_state.select(next_index(self.list_state.selected(), MenuEntry::ALL.len()));
    }

    pub fn previous(&mut self) {
        self.list_state.select(previous_index(self.list_state.selected(), MenuEntry::ALL.len()));
    }

    pub fn selected_entry(&self) -> Option<MenuEntry> {
        self.list_state.selected().and_then(|i| MenuEntry::ALL.get(i).copied())
    }
}

pub enum DashboardAction {
    Exit,
    OpenTeam,
    NewEstimate,
    OpenSavedProjects,
}

fn action_for(entry: MenuEntry) -> DashboardAction {
    match entry {
        MenuEntry::Team => DashboardAction::OpenTeam,
        MenuEntry::NewEstimate => DashboardAction::NewEstimate,
        MenuEntry::SavedProjects => DashboardAction::OpenSavedProjects,
        MenuEntry::Quit => DashboardAction::Exit,
    }
}

pub fn render_dashboard<B: Backend>(frame: &mut Frame<B>, state: &mut DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ].as_ref())
        .split(frame.size());

    let title = Paragraph::new("Project Cost Estimator")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let summary = Paragraph::new(Spans::from(vec![
        Span::styled("Team: ", Style::default().fg(Color::Yellow)),
        Span::raw(format!("{} ({} available)", state.team_size, state.available_members)),
        Span::raw("   "),
        Span::styled("Saved projects: ", Style::default().fg(Color::Yellow)),
        Span::raw(state.saved_projects.to_string()),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(summary, chunks[1]);

    let items: Vec<ListItem> = MenuEntry::ALL
        .iter()
        .map(|entry| ListItem::new(entry.label()))
        .collect();

    let menu = List::new(items)
        .block(Block::default().title("Menu").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_stateful_widget(menu, chunks[2], &mut state.list_state);

    let help = Paragraph::new("<Up/Down> Navigate | <Enter> Open | <T> Team | <N> New Estimate | <P> Projects | <Q> Quit")
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));
    frame.render_widget(help, chunks[3]);
}

pub fn handle_input(state: &mut DashboardState) -> Result<Option<DashboardAction>> {
    if let Event::Key(key) = event::read()? {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(Some(DashboardAction::Exit)),
            KeyCode::Char('t') => return Ok(Some(DashboardAction::OpenTeam)),
            KeyCode::Char('n') => return Ok(Some(DashboardAction::NewEstimate)),
            KeyCode::Char('p') => return Ok(Some(DashboardAction::OpenSavedProjects)),
            KeyCode::Down => state.next(),
            KeyCode::Up => state.previous(),
            KeyCode::Enter => {
                if let Some(entry) = state.selected_entry() {
                    return Ok(Some(action_for(entry)));
                }
            }
            _ => {}
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_navigation_wraps() {
        let mut state = DashboardState::new(10, 7, 0);
        assert_eq!(state.selected_entry(), Some(MenuEntry::Team));
        state.previous();
        assert_eq!(state.selected_entry(), Some(MenuEntry::Quit));
        state.next();
        state.next();
        assert_eq!(state.selected_entry(), Some(MenuEntry::NewEstimate));
    }
}
