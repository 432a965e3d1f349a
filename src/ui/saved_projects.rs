use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::models::{ProjectStatus, SavedProject};
use crate::ui::components::{next_index, popup::render_delete_confirmation, previous_index};

// Represents the state of the saved projects screen
pub struct SavedProjectsState {
    projects: Vec<SavedProject>,
    list_state: ListState,
    show_delete_confirmation: bool,
}

impl SavedProjectsState {
    pub fn new(projects: Vec<SavedProject>) -> Self {
        let mut list_state = ListState::default();
        if !projects.is_empty() {
            list_state.select(Some(0));
        }

        Self {
            projects,
            list_state,
            show_delete_confirmation: false,
        }
    }

    pub fn next(&mut self) {
        self.list_state.select(next_index(self.list_state.selected(), self.projects.len()));
    }

    pub fn previous(&mut self) {
        self.list_state.select(previous_index(self.list_state.selected(), self.projects.len()));
    }

    pub fn toggle_delete_confirmation(&mut self) {
        self.show_delete_confirmation = !self.show_delete_confirmation;
    }

    pub fn selected_project(&self) -> Option<&SavedProject> {
        self.list_state.selected().and_then(|i| self.projects.get(i))
    }

    pub fn selected_project_id(&self) -> Option<u32> {
        self.selected_project().map(|p| p.id)
    }
}

pub enum SavedProjectAction {
    Back,
    DeleteProject(u32),
}

fn status_color(status: ProjectStatus) -> Color {
    match status {
        ProjectStatus::Active => Color::Green,
        ProjectStatus::Draft => Color::Gray,
        ProjectStatus::Completed => Color::Magenta,
        ProjectStatus::OnHold => Color::Yellow,
    }
}

pub fn render_saved_projects<B: Backend>(frame: &mut Frame<B>, state: &mut SavedProjectsState) {
    let size = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(6),
            Constraint::Length(3),
        ].as_ref())
        .split(size);

    let items: Vec<ListItem> = state
        .projects
        .iter()
        .map(|project| {
            ListItem::new(Spans::from(vec![
                Span::styled(
                    format!("{:<10}", project.status.label()),
                    Style::default().fg(status_color(project.status)),
                ),
                Span::raw(format!("{:<24}", project.name)),
                Span::raw(format!("{:<18}", project.client)),
                Span::raw(format!("{:>12}", project.budget)),
                Span::raw(format!("  {:>3}%", project.progress)),
            ]))
        })
        .collect();

    let title = format!("Saved Projects ({})", state.projects.len());
    let projects_list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(projects_list, chunks[0], &mut state.list_state);

    render_details(frame, state.selected_project(), chunks[1]);

    let buttons_text = if state.selected_project().is_some() {
        "<D> Delete Project | <Esc> Back"
    } else {
        "No saved projects yet. Save a scenario from a new estimate. | <Esc> Back"
    };

    let buttons = Paragraph::new(buttons_text)
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));

    frame.render_widget(buttons, chunks[2]);

    if state.show_delete_confirmation {
        render_delete_confirmation(
            frame,
            size,
            "Are you sure you want to delete this project?",
            "This cannot be undone.",
        );
    }
}

fn render_details<B: Backend>(frame: &mut Frame<B>, project: Option<&SavedProject>, area: Rect) {
    let label = Style::default().fg(Color::Yellow);
    let lines = match project {
        Some(project) => vec![
            Spans::from(vec![
                Span::styled("Scenario: ", label),
                Span::raw(project.scenario.clone()),
                Span::styled("   Budget: ", label),
                Span::raw(project.budget.clone()),
                Span::styled("   Spent: ", label),
                Span::raw(project.spent.clone()),
            ]),
            Spans::from(vec![
                Span::styled("Timeline: ", label),
                Span::raw(format!(
                    "{} to {} ({})",
                    project.start_date.format("%d %b %Y"),
                    project.end_date.format("%d %b %Y"),
                    project.duration
                )),
            ]),
            Spans::from(vec![
                Span::styled("Status: ", label),
                Span::raw(project.status.as_str()),
                Span::styled("   Progress: ", label),
                Span::raw(format!("{}%", project.progress)),
            ]),
        ],
        None => vec![Spans::from("")],
    };

    let details = Paragraph::new(lines)
        .block(Block::default().title("Details").borders(Borders::ALL));
    frame.render_widget(details, area);
}

pub fn handle_input(state: &mut SavedProjectsState) -> Result<Option<SavedProjectAction>> {
    if let Event::Key(key) = event::read()? {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::Char('n') => {
                if state.show_delete_confirmation {
                    state.toggle_delete_confirmation();
                } else if key.code != KeyCode::Char('n') {
                    return Ok(Some(SavedProjectAction::Back));
                }
            }
            KeyCode::Char('d') => {
                if !state.show_delete_confirmation && state.selected_project().is_some() {
                    state.toggle_delete_confirmation();
                }
            }
            KeyCode::Char('y') => {
                if state.show_delete_confirmation {
                    if let Some(id) = state.selected_project_id() {
                        state.toggle_delete_confirmation();
                        return Ok(Some(SavedProjectAction::DeleteProject(id)));
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
