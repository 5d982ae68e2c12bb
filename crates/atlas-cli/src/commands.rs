use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use atlas_cli::render::{write_countries, write_statistics};
use atlas_cli::settings::{DisplaySettings, Settings, settings_path};
use atlas_cli::shell::Shell;
use atlas_core::RawCountry;
use atlas_ingest::Session;
use atlas_model::{Filter, SortField};
use tracing::info;

use crate::cli::{AddArgs, FilterCommand, UpdateArgs};

/// Run the interactive menu. The session is handed back even on failure so
/// the caller can still close it.
pub fn run_menu(session: Session, display: DisplaySettings) -> (Session, Result<()>) {
    let mut shell = Shell::new(session, display, io::stdin().lock(), io::stdout().lock());
    let outcome = shell.run().context("interactive menu");
    (shell.into_session(), outcome)
}

pub fn run_add(session: &mut Session, args: &AddArgs) -> Result<()> {
    let raw = RawCountry::new(&args.name, &args.population, &args.area, &args.continent);
    session
        .add_from_text(&raw)
        .map_err(|error| anyhow!(error.user_message()))?;
    println!("País agregado correctamente.");
    Ok(())
}

pub fn run_update(session: &mut Session, args: &UpdateArgs) -> Result<()> {
    session
        .update_from_text(&args.name, args.population.as_deref(), args.area.as_deref())
        .map_err(|error| anyhow!(error.user_message()))?;
    println!("Datos actualizados.");
    Ok(())
}

pub fn run_search(session: &Session, pattern: &str, display: DisplaySettings) -> Result<()> {
    let results = session.store().search(pattern);
    info!(pattern, matches = results.len(), "search");
    print_countries(|out| write_countries(out, &results, display.style))
}

pub fn run_filter(
    session: &Session,
    command: &FilterCommand,
    display: DisplaySettings,
) -> Result<()> {
    let filter = match command {
        FilterCommand::Continent { name } => Filter::Continent { name: name.clone() },
        FilterCommand::Population(range) => Filter::Population {
            min: range.min,
            max: range.max,
        },
        FilterCommand::Area(range) => Filter::Area {
            min: range.min,
            max: range.max,
        },
    };
    let results = session
        .store()
        .filter(&filter)
        .map_err(|error| anyhow!("Error: {error}"))?;
    print_countries(|out| write_countries(out, &results, display.style))
}

pub fn run_sort(
    session: &Session,
    field: SortField,
    descending: bool,
    display: DisplaySettings,
) -> Result<()> {
    let sorted = session.store().sorted(field, descending);
    print_countries(|out| write_countries(out, &sorted, display.style))
}

pub fn run_stats(session: &Session, json: bool, display: DisplaySettings) -> Result<()> {
    let stats = session.store().statistics();
    if json {
        let text = serde_json::to_string_pretty(&stats).context("serialize statistics")?;
        println!("{text}");
        return Ok(());
    }
    print_countries(|out| write_statistics(out, &stats, display))
}

pub fn run_config(settings: &Settings, config_path: Option<&Path>, init: bool) -> Result<()> {
    let path = config_path
        .map(Path::to_path_buf)
        .or_else(settings_path)
        .context("no settings location available on this platform")?;
    if init {
        settings.save_to(&path).map_err(|message| anyhow!(message))?;
        println!("Configuración guardada en {}", path.display());
        return Ok(());
    }
    println!("# {}", path.display());
    print!("{}", settings.to_toml().map_err(|message| anyhow!(message))?);
    Ok(())
}

fn print_countries(
    render: impl FnOnce(&mut io::StdoutLock<'static>) -> io::Result<()>,
) -> Result<()> {
    let mut out = io::stdout().lock();
    render(&mut out).context("write output")?;
    out.flush().context("flush output")
}
