mod config;
mod estimation;
mod models;
mod store;
mod ui;

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::models::Availability;
use crate::ui::{
    dashboard::{DashboardState, DashboardAction, render_dashboard, handle_input as handle_dashboard_input},
    team::{TeamState, TeamAction, render_team, handle_input as handle_team_input},
    team_member_wizard::{TeamMemberWizardState, TeamMemberWizardAction, render_team_member_wizard, handle_input as handle_team_member_wizard_input},
    estimate_wizard::{EstimateWizardState, EstimateWizardAction, render_estimate_wizard, handle_input as handle_estimate_wizard_input},
    results::{ResultsState, ResultsAction, render_results, handle_input as handle_results_input},
    saved_projects::{SavedProjectsState, SavedProjectAction, render_saved_projects, handle_input as handle_saved_projects_input},
};

#[derive(Parser)]
#[command(name = "cost-estimator")]
#[command(about = "Estimate project budgets from your team's rates")]
struct Cli {
    /// Start with an empty roster instead of the demo team
    #[arg(long)]
    no_seed: bool,

    /// Write logs to this file instead of the configured one
    #[arg(long)]
    log_file: Option<String>,
}

// Represents the current screen in the app
enum AppScreen {
    Dashboard,
    Team,
    TeamMemberWizard,
    EstimateWizard,
    Results,
    SavedProjects,
}

// Main application state
struct AppState {
    store: store::Store,
    screen: AppScreen,
    dashboard_state: Option<DashboardState>,
    team_state: Option<TeamState>,
    team_member_wizard_state: Option<TeamMemberWizardState>,
    estimate_wizard_state: Option<EstimateWizardState>,
    results_state: Option<ResultsState>,
    saved_projects_state: Option<SavedProjectsState>,
}

impl AppState {
    fn new(store: store::Store) -> Self {
        Self {
            store,
            screen: AppScreen::Dashboard,
            dashboard_state: None,
            team_state: None,
            team_member_wizard_state: None,
            estimate_wizard_state: None,
            results_state: None,
            saved_projects_state: None,
        }
    }
}

/// Send tracing output to a file; the terminal belongs to the UI
fn init_tracing(log_file: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "cost_estimator=info".into()),
    );
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = config::init()?;
    if cli.no_seed {
        config.seed_roster = false;
    }
    if let Some(log_file) = cli.log_file {
        config.log_file = log_file;
    }

    init_tracing(&config.log_file)?;
    info!(seed_roster = config.seed_roster, currency = %config.currency_symbol, "starting cost estimator");

    let store = store::init(&config);

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app_state = AppState::new(store);
    load_dashboard_screen(&mut app_state);

    let result = run_app(&mut terminal, &mut app_state);

    // Restore terminal
    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(error = %err, "application stopped with an error");
        println!("Error: {}", err);
    }

    info!("cost estimator closed");
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app_state: &mut AppState) -> Result<()> {
    loop {
        terminal.draw(|f| {
            match app_state.screen {
                AppScreen::Dashboard => {
                    if let Some(state) = &mut app_state.dashboard_state {
                        render_dashboard(f, state);
                    }
                }
                AppScreen::Team => {
                    if let Some(state) = &mut app_state.team_state {
                        render_team(f, state);
                    }
                }
                AppScreen::TeamMemberWizard => {
                    if let Some(state) = &mut app_state.team_member_wizard_state {
                        render_team_member_wizard(f, state);
                    }
                }
                AppScreen::EstimateWizard => {
                    if let Some(state) = &mut app_state.estimate_wizard_state {
                        render_estimate_wizard(f, state);
                    }
                }
                AppScreen::Results => {
                    if let Some(state) = &mut app_state.results_state {
                        render_results(f, state);
                    }
                }
                AppScreen::SavedProjects => {
                    if let Some(state) = &mut app_state.saved_projects_state {
                        render_saved_projects(f, state);
                    }
                }
            }
        })?;

        let should_quit = match app_state.screen {
            AppScreen::Dashboard => handle_dashboard_screen(app_state)?,
            AppScreen::Team => handle_team_screen(app_state)?,
            AppScreen::TeamMemberWizard => handle_team_member_wizard_screen(app_state)?,
            AppScreen::EstimateWizard => handle_estimate_wizard_screen(app_state)?,
            AppScreen::Results => handle_results_screen(app_state)?,
            AppScreen::SavedProjects => handle_saved_projects_screen(app_state)?,
        };

        if should_quit {
            break;
        }
    }

    Ok(())
}

fn load_dashboard_screen(app_state: &mut AppState) {
    let members = app_state.store.load_team_members();
    let available = members
        .iter()
        .filter(|m| m.availability == Availability::Available)
        .count();
    let saved = app_state.store.load_saved_projects().len();

    app_state.dashboard_state = Some(DashboardState::new(members.len(), available, saved));
    app_state.screen = AppScreen::Dashboard;
}

fn load_team_screen(app_state: &mut AppState) {
    let members = app_state.store.load_team_members();
    app_state.team_state = Some(TeamState::new(members, app_state.store.currency_symbol()));
    app_state.screen = AppScreen::Team;
}

fn load_saved_projects_screen(app_state: &mut AppState) {
    let projects = app_state.store.load_saved_projects();
    app_state.saved_projects_state = Some(SavedProjectsState::new(projects));
    app_state.screen = AppScreen::SavedProjects;
}

fn handle_dashboard_screen(app_state: &mut AppState) -> Result<bool> {
    if let Some(state) = &mut app_state.dashboard_state {
        match handle_dashboard_input(state)? {
            Some(DashboardAction::Exit) => {
                return Ok(true);
            }
            Some(DashboardAction::OpenTeam) => {
                load_team_screen(app_state);
            }
            Some(DashboardAction::NewEstimate) => {
                // Estimates price members as they are when the wizard opens
                let roster = app_state.store.load_team_members();
                app_state.estimate_wizard_state = Some(EstimateWizardState::new(roster, app_state.store.currency_symbol()));
                app_state.screen = AppScreen::EstimateWizard;
            }
            Some(DashboardAction::OpenSavedProjects) => {
                load_saved_projects_screen(app_state);
            }
            None => {}
        }
    }

    Ok(false)
}

fn handle_team_screen(app_state: &mut AppState) -> Result<bool> {
    if let Some(state) = &mut app_state.team_state {
        match handle_team_input(state)? {
            Some(TeamAction::Back) => {
                load_dashboard_screen(app_state);
            }
            Some(TeamAction::NewMember) => {
                app_state.team_member_wizard_state = Some(TeamMemberWizardState::new(app_state.store.currency_symbol()));
                app_state.screen = AppScreen::TeamMemberWizard;
            }
            Some(TeamAction::EditMember(id)) => {
                let member = app_state.store.get_team_member(id)?;
                app_state.team_member_wizard_state = Some(TeamMemberWizardState::from_existing(member, app_state.store.currency_symbol()));
                app_state.screen = AppScreen::TeamMemberWizard;
            }
            Some(TeamAction::DeleteMember(id)) => {
                app_state.store.delete_team_member(id)?;
                load_team_screen(app_state);
            }
            None => {}
        }
    }

    Ok(false)
}

fn handle_team_member_wizard_screen(app_state: &mut AppState) -> Result<bool> {
    if let Some(state) = &mut app_state.team_member_wizard_state {
        match handle_team_member_wizard_input(state)? {
            Some(TeamMemberWizardAction::Cancel) => {
                load_team_screen(app_state);
            }
            Some(TeamMemberWizardAction::Save(member)) => {
                if member.id == 0 {
                    app_state.store.create_team_member(&member);
                } else {
                    app_state.store.update_team_member(&member)?;
                }
                app_state.team_member_wizard_state = None;
                load_team_screen(app_state);
            }
            None => {}
        }
    }

    Ok(false)
}

fn handle_estimate_wizard_screen(app_state: &mut AppState) -> Result<bool> {
    if let Some(state) = &mut app_state.estimate_wizard_state {
        match handle_estimate_wizard_input(state)? {
            Some(EstimateWizardAction::Cancel) => {
                app_state.estimate_wizard_state = None;
                load_dashboard_screen(app_state);
            }
            Some(EstimateWizardAction::ShowResults(estimate)) => {
                app_state.results_state = Some(ResultsState::new(estimate, app_state.store.currency_symbol()));
                app_state.screen = AppScreen::Results;
            }
            None => {}
        }
    }

    Ok(false)
}

fn handle_results_screen(app_state: &mut AppState) -> Result<bool> {
    if let Some(state) = &mut app_state.results_state {
        match handle_results_input(state)? {
            Some(ResultsAction::Back) => {
                // The wizard state is still held, so the user resumes where they left off
                app_state.screen = AppScreen::EstimateWizard;
            }
            Some(ResultsAction::Save(scenario)) => {
                let today = chrono::Local::now().date_naive();
                app_state.store.save_project(state.estimate(), scenario, today);

                app_state.results_state = None;
                app_state.estimate_wizard_state = None;
                load_saved_projects_screen(app_state);
            }
            None => {}
        }
    }

    Ok(false)
}

fn handle_saved_projects_screen(app_state: &mut AppState) -> Result<bool> {
    if let Some(state) = &mut app_state.saved_projects_state {
        match handle_saved_projects_input(state)? {
            Some(SavedProjectAction::Back) => {
                load_dashboard_screen(app_state);
            }
            Some(SavedProjectAction::DeleteProject(id)) => {
                app_state.store.delete_saved_project(id)?;
                load_saved_projects_screen(app_state);
            }
            None => {}
        }
    }

    Ok(false)
}
