//! Command implementations.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use sprintsheet_api::AppState;
use sprintsheet_core::{Config, Result, Sheet};
use sprintsheet_sheets::SheetService;
use sprintsheet_sprint::{ProgressResponse, SprintRules};
use sprintsheet_table::TableSummary;

use crate::cli::{Cli, Command};
use crate::config_handlers::handle_config_command;

/// Run the parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Config { action } => handle_config_command(config_path, action),
        Command::Serve { host, port } => {
            let mut config = Config::load(config_path)?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            sprintsheet_api::serve(AppState::from_config(config)?).await
        }
        Command::Summary => {
            let config = Config::load(config_path)?;
            let sheet = load_sheet(&config).await?;
            print_json(&summary_report(&config, &sheet))
        }
        Command::Progress { sprint } => {
            let config = Config::load(config_path)?;
            let sheet = load_sheet(&config).await?;
            let today = Local::now().date_naive();
            print_json(&progress_report(&config, &sheet, sprint.as_deref(), today)?)
        }
        Command::Burndown { sprint } => {
            let config = Config::load(config_path)?;
            let sheet = load_sheet(&config).await?;
            let today = Local::now().date_naive();
            print_json(&sprintsheet_sprint::sprint_burndown(&config, &sheet, &sprint, today)?)
        }
    }
}

async fn load_sheet(config: &Config) -> Result<Arc<Sheet>> {
    let service = SheetService::from_config(config)?;
    tracing::debug!("Loading sheet from {}", service.describe());
    service.sheet().await
}

/// Sheet summary for the `summary` command.
pub fn summary_report(config: &Config, sheet: &Sheet) -> TableSummary {
    sprintsheet_table::summary(sheet, &config.sheet.sheet_id, &config.sheet.sheet_name)
}

/// Progress envelope for the `progress` command.
pub fn progress_report(
    config: &Config,
    sheet: &Sheet,
    sprint: Option<&str>,
    today: NaiveDate,
) -> Result<ProgressResponse> {
    let issues = sprintsheet_sprint::issues(sheet);
    let progress = sprintsheet_sprint::sprint_progress(
        &issues,
        sprint,
        &SprintRules::from(&config.sprint),
        today,
        sheet.fetched_at(),
    )?;
    Ok(progress.into())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{rendered}");
    Ok(())
}
