//! Command dispatch

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::Staff;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        None => cmd_show(&build_container(cli)?, None),
        Some(Commands::Show { tab_width }) => cmd_show(&build_container(cli)?, *tab_width),
        Some(Commands::Tree) => cmd_tree(&build_container(cli)?),
        Some(Commands::Total) => cmd_total(&build_container(cli)?),
        Some(Commands::Orphans) => cmd_orphans(&build_container(cli)?),
        Some(Commands::Validate) => cmd_validate(&build_container(cli)?),
        Some(Commands::Config { command }) => cmd_config(cli, command),
        Some(Commands::Completion { shell }) => cmd_completion(*shell),
    }
}

fn project_dir(cli: &Cli) -> CliResult<PathBuf> {
    let dir = match &cli.project_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir().map_err(|e| InfraError::io("determine current directory", e))?,
    };
    if !dir.is_dir() {
        return Err(CliError::InvalidArgs(format!(
            "project directory does not exist: {}",
            dir.display()
        )));
    }
    Ok(dir)
}

/// Layered settings with command line overrides on top.
pub fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let dir = project_dir(cli)?;
    let mut settings = Settings::load(Some(dir.as_path()))?;
    if let Some(roster) = &cli.roster {
        settings.roster = roster.clone();
    }
    if let Some(schema) = &cli.schema {
        settings.schema = Some(schema.clone());
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

fn build_container(cli: &Cli) -> CliResult<ServiceContainer> {
    Ok(ServiceContainer::new(load_settings(cli)?)?)
}

fn write_stdout(text: &str) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.flush())
        .map_err(|e| InfraError::io("write output", e))?;
    Ok(())
}

#[instrument(level = "debug", skip(container))]
fn cmd_show(container: &ServiceContainer, tab_width: Option<usize>) -> CliResult<()> {
    let staff = container.roster.load(&container.settings.roster)?;
    let width = tab_width.unwrap_or(container.settings.tab_width);
    write_stdout(&show_report(&staff, width))
}

/// The listing followed by the salary total.
fn show_report(staff: &Staff, tab_width: usize) -> String {
    format!(
        "{}Total salary: {}\n",
        staff.render_with(tab_width),
        staff.total_salary()
    )
}

#[instrument(level = "debug", skip(container))]
fn cmd_tree(container: &ServiceContainer) -> CliResult<()> {
    let staff = container.roster.load(&container.settings.roster)?;
    let rendered: String = staff.to_tree().iter().map(|tree| tree.to_string()).collect();
    write_stdout(&rendered)
}

#[instrument(level = "debug", skip(container))]
fn cmd_total(container: &ServiceContainer) -> CliResult<()> {
    let staff = container.roster.load(&container.settings.roster)?;
    write_stdout(&format!("{}\n", staff.total_salary()))
}

#[instrument(level = "debug", skip(container))]
fn cmd_orphans(container: &ServiceContainer) -> CliResult<()> {
    let staff = container.roster.load(&container.settings.roster)?;
    let orphans = staff.orphans();
    if orphans.is_empty() {
        output::success("every employee is reachable from a root");
        return Ok(());
    }

    output::header(&format!("{} unreachable employees:", orphans.len()));
    for employee in orphans.into_iter().filter_map(|idx| staff.get(idx)) {
        let manager = employee
            .manager
            .map(|m| m.to_string())
            .unwrap_or_else(|| "none".to_string());
        output::failure(&format!(
            "{} (id {}, manager {})",
            employee.name, employee.id, manager
        ));
    }
    Ok(())
}

#[instrument(level = "debug", skip(container))]
fn cmd_validate(container: &ServiceContainer) -> CliResult<()> {
    let roster = &container.settings.roster;
    let count = container.roster.validate_file(roster)?;
    if count == 0 {
        output::warning(&format!("{} has no employees", roster.display()));
    }
    output::success(&format!("{}: {} employees valid", roster.display(), count));
    Ok(())
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            write_stdout(&settings.to_toml()?)
        }
        ConfigCommands::Path => {
            let dir = project_dir(cli)?;
            output::header("Config files:");
            match global_config_path() {
                Some(path) => output::detail(&describe_path("global", &path)),
                None => output::detail(&"global: unavailable (no home directory)"),
            }
            output::detail(&describe_path("local", &local_config_path(&dir)));
            Ok(())
        }
    }
}

fn describe_path(label: &str, path: &std::path::Path) -> String {
    let state = if path.exists() { "" } else { " (not found)" };
    format!("{}: {}{}", label, path.display(), state)
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
