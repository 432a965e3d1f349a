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

use crate::estimation::{format_currency, ScenarioBreakdown};
use crate::models::{ProjectEstimate, Scenario};
use crate::ui::components::{next_index, previous_index};

// Scenario comparison for a finished estimate
pub struct ResultsState {
    estimate: ProjectEstimate,
    breakdown: ScenarioBreakdown,
    list_state: ListState,
    currency_symbol: String,
}

impl ResultsState {
    pub fn new(estimate: ProjectEstimate, currency_symbol: &str) -> Self {
        let breakdown = ScenarioBreakdown::compute(&estimate.allocations, estimate.duration_months);
        let mut list_state = ListState::default();
        // Realistic is preselected
        list_state.select(Some(1));

        Self {
            estimate,
            breakdown,
            list_state,
            currency_symbol: currency_symbol.to_string(),
        }
    }

    pub fn estimate(&self) -> &ProjectEstimate {
        &self.estimate
    }

    pub fn next(&mut self) {
        self.list_state.select(next_index(self.list_state.selected(), Scenario::ALL.len()));
    }

    pub fn previous(&mut self) {
        self.list_state.select(previous_index(self.list_state.selected(), Scenario::ALL.len()));
    }

    pub fn selected_scenario(&self) -> Option<Scenario> {
        self.list_state.selected().and_then(|i| Scenario::ALL.get(i).copied())
    }

    fn money(&self, amount: f64) -> String {
        format_currency(amount, &self.currency_symbol)
    }
}

pub enum ResultsAction {
    Back,
    Save(Scenario),
}

pub fn render_results<B: Backend>(frame: &mut Frame<B>, state: &mut ResultsState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(7),
            Constraint::Min(5),
            Constraint::Length(3),
        ].as_ref())
        .split(frame.size());

    let estimate = &state.estimate;
    let title = Paragraph::new(Spans::from(vec![
        Span::styled(
            estimate.name.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  Client: {}", estimate.client_label())),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let label = Style::default().fg(Color::Yellow);
    let total_points: u32 = estimate.features.iter().map(|f| f.story_points).sum();
    let summary = Paragraph::new(vec![
        Spans::from(vec![
            Span::styled("Team members: ", label),
            Span::raw(estimate.allocations.len().to_string()),
        ]),
        Spans::from(vec![
            Span::styled("Features: ", label),
            Span::raw(format!("{} ({} story points)", estimate.features.len(), total_points)),
        ]),
        Spans::from(vec![
            Span::styled("Monthly burn rate: ", label),
            Span::raw(state.money(state.breakdown.burn_rate)),
        ]),
        Spans::from(vec![
            Span::styled("Base cost: ", label),
            Span::raw(format!(
                "{} over {} month(s)",
                state.money(state.breakdown.base_cost),
                estimate.duration_months
            )),
        ]),
    ])
    .block(Block::default().title("Summary").borders(Borders::ALL));
    frame.render_widget(summary, chunks[1]);

    let items: Vec<ListItem> = Scenario::ALL
        .iter()
        .map(|scenario| {
            ListItem::new(format!(
                "{:<12} x{:.2}   {}",
                scenario.label(),
                scenario.multiplier(),
                state.money(state.breakdown.cost_for(*scenario))
            ))
        })
        .collect();

    let scenarios = List::new(items)
        .block(Block::default().title("Budget Scenarios").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_stateful_widget(scenarios, chunks[2], &mut state.list_state);

    let buttons = Paragraph::new("<Up/Down> Choose scenario | <Enter> Save project | <O/R/P> Save scenario | <Esc> Back to estimate")
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));
    frame.render_widget(buttons, chunks[3]);
}

pub fn handle_input(state: &mut ResultsState) -> Result<Option<ResultsAction>> {
    if let Event::Key(key) = event::read()? {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Ok(Some(ResultsAction::Back)),
            KeyCode::Down => state.next(),
            KeyCode::Up => state.previous(),
            KeyCode::Enter => {
                if let Some(scenario) = state.selected_scenario() {
                    return Ok(Some(ResultsAction::Save(scenario)));
                }
            }
            KeyCode::Char('o') => return Ok(Some(ResultsAction::Save(Scenario::Optimistic))),
            KeyCode::Char('r') => return Ok(Some(ResultsAction::Save(Scenario::Realistic))),
            KeyCode::Char('p') => return Ok(Some(ResultsAction::Save(Scenario::Pessimistic))),
            _ => {}
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn realistic_is_preselected_and_selection_wraps() {
        let mut state = ResultsState::new(ProjectEstimate::default(), "€");
        assert_eq!(state.selected_scenario(), Some(Scenario::Realistic));
        state.next();
        state.next();
        assert_eq!(state.selected_scenario(), Some(Scenario::Optimistic));
        state.previous();
        assert_eq!(state.selected_scenario(), Some(Scenario::Pessimistic));
    }

    #[test]
    fn empty_estimate_has_a_zero_breakdown() {
        let state = ResultsState::new(ProjectEstimate::default(), "€");
        assert_eq!(state.money(state.breakdown.pessimistic), "€0");
    }
}
