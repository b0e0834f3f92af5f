//! Kinoteka command-line organizer
//!
//! Sorts a downloads directory into Jellyfin-style movie and series
//! libraries, looking titles up on TMDB when a key is configured.

mod classify;
mod config;
mod logging;
mod prompt;
mod relocate;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use walkdir::WalkDir;

use kinoteka::{
    Catalog, FileOutcome, KinotekaError, Organizer, OrganizerConfig, Relocator, TmdbClient,
};

use crate::config::{Overrides, Settings};
use crate::prompt::TerminalSelector;
use crate::relocate::{FsRelocator, Ownership};

/// CLI arguments
#[derive(Parser)]
#[command(name = "kinoteka")]
#[command(about = "Organize downloaded movies and TV episodes into a Jellyfin library")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Settings file (default: first of ~/.config/kinoteka, /etc/kinoteka, ./config.json)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Rehearsal: report what would be moved without touching files
    #[arg(long, global = true)]
    test: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(flatten)]
    overrides: Overrides,
}

#[derive(Subcommand)]
enum Commands {
    /// Organize the downloads directory (default)
    Organize,
    /// Print a JSON verdict for every filename read from stdin
    Classify,
    /// Write a settings template
    InitConfig {
        /// Where to write the template
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::InitConfig { path }) = &cli.command {
        Settings::write_template(path)?;
        println!("Configuration template created at: {}", path.display());
        return Ok(());
    }

    let mut settings = match Settings::locate(cli.config.as_deref()) {
        Some(path) => {
            let settings = Settings::load(&path)?;
            if !cli.quiet {
                println!("Configuration loaded from: {}", path.display());
            }
            settings
        }
        None => Settings::default(),
    };
    settings.apply(&cli.overrides);

    let quiet = cli.quiet || !settings.logging.verbose;
    logging::init(quiet, settings.logging.log_file.as_deref());

    match cli.command {
        Some(Commands::Classify) => {
            let config = OrganizerConfig::new().with_known_shows(settings.options.known_shows.clone());
            let mut organizer = Organizer::new(config, None)?;
            classify::run(&mut organizer, io::stdin().lock(), io::stdout().lock())
        }
        _ => organize(&settings, cli.test),
    }
}

fn organize(settings: &Settings, rehearsal: bool) -> Result<()> {
    if !rehearsal && !relocate::is_root() {
        warn!("not running as root; setting ownership of moved files will likely fail");
        eprintln!("Warning: not running as root. Use sudo, or --test for a rehearsal run.");
    }

    print_header(settings, rehearsal);

    let downloads = settings.downloads();
    if !downloads.is_dir() {
        anyhow::bail!("Downloads directory does not exist: {}", downloads.display());
    }

    let catalog = build_catalog(settings)?;
    let id_tag = catalog
        .as_ref()
        .map_or_else(|| "tmdbid".to_string(), |c| c.id_tag().to_string());
    let mut organizer = Organizer::new(settings.organizer_config(), catalog)
        .context("Invalid library configuration")?;

    let mut relocator = FsRelocator::new(rehearsal);
    if !rehearsal {
        relocator = relocator.with_owner(Ownership {
            user: settings.permissions.user.clone(),
            group: settings.permissions.group.clone(),
        });
    }
    relocator.ensure_dir(&settings.series())?;
    relocator.ensure_dir(&settings.films())?;

    let mut selector = TerminalSelector::stdio(id_tag);
    match run(&mut organizer, &downloads, &mut relocator, &mut selector) {
        Ok(()) => {}
        Err(KinotekaError::Aborted) => {
            println!("Operation cancelled by user");
            info!(stats = %organizer.stats(), "run aborted");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    println!();
    println!("PROCESS COMPLETED: {}", organizer.stats());
    info!(stats = %organizer.stats(), "run finished");
    if let Some(log) = &settings.logging.log_file {
        println!("A detailed log has been saved at: {}", log.display());
    }
    Ok(())
}

fn build_catalog(settings: &Settings) -> Result<Option<Box<dyn Catalog>>> {
    if !settings.tmdb.enabled {
        return Ok(None);
    }
    let Some(key) = settings.tmdb_api_key() else {
        warn!("TMDB API key not configured; catalog lookups disabled");
        return Ok(None);
    };
    let client = TmdbClient::new(key).context("Failed to create TMDB client")?;
    Ok(Some(Box::new(client)))
}

/// Loose files first, then every sub-directory as one series.
fn run(
    organizer: &mut Organizer,
    downloads: &Path,
    relocator: &mut FsRelocator,
    selector: &mut TerminalSelector<io::StdinLock<'static>, io::Stdout>,
) -> kinoteka::Result<()> {
    let entries = sorted_entries(downloads).map_err(|source| KinotekaError::Relocation {
        path: downloads.to_path_buf(),
        source,
    })?;

    println!("=== PROCESSING INDIVIDUAL FILES ===");
    for path in entries.iter().filter(|p| p.is_file()) {
        match organizer.process_file(path, relocator, selector)? {
            FileOutcome::Skipped(reason) => println!("Skipped: {} ({reason})", path.display()),
            FileOutcome::Failed(error) => println!("Failed: {} ({error})", path.display()),
            FileOutcome::Ignored | FileOutcome::Moved { .. } => {}
        }
    }

    println!();
    println!("=== PROCESSING SERIES DIRECTORIES ===");
    for dir in entries.iter().filter(|p| p.is_dir()) {
        let files: Vec<PathBuf> = WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .collect();
        let report = organizer.process_directory(dir, &files, relocator, selector)?;
        for file in &report.unmatched {
            println!("No episode number, left in place: {}", file.display());
        }
        for file in &report.failed {
            println!("Failed: {}", file.display());
        }
    }
    Ok(())
}

fn sorted_entries(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()?;
    entries.sort();
    Ok(entries)
}

fn print_header(settings: &Settings, rehearsal: bool) {
    println!("KINOTEKA MEDIA ORGANIZER");
    if rehearsal {
        println!("MODE: TEST - No actual file operations will be performed");
    } else {
        println!("MODE: MOVE - Files will be moved and empty directories removed");
    }
    println!();
    println!("Downloads directory: {}", settings.downloads().display());
    println!("Movies directory:    {}", settings.films().display());
    println!("TV Shows directory:  {}", settings.series().display());
    println!(
        "Media ownership:     {}:{}",
        settings.permissions.user, settings.permissions.group
    );
    let tmdb = match (settings.tmdb.enabled, settings.tmdb_api_key().is_some()) {
        (false, _) => "Disabled",
        (true, true) => "Enabled (configured)",
        (true, false) => "Enabled (no API key)",
    };
    println!("TMDB integration:    {tmdb}");
    println!("Catalog selection:   {}", settings.resolve_mode());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_parse_without_subcommand() {
        let cli = Cli::try_parse_from([
            "kinoteka",
            "--test",
            "--media-dir",
            "/srv/media",
            "--disable-tmdb",
            "--semi-interactive",
        ])
        .unwrap();
        assert!(cli.test);
        assert!(cli.command.is_none());
        assert_eq!(cli.overrides.media_dir, Some(PathBuf::from("/srv/media")));
        assert!(cli.overrides.disable_tmdb);
        assert!(cli.overrides.semi_interactive);
    }

    #[test]
    fn interactive_modes_conflict() {
        assert!(
            Cli::try_parse_from(["kinoteka", "--non-interactive", "--semi-interactive"]).is_err()
        );
    }

    #[test]
    fn init_config_takes_a_path() {
        let cli = Cli::try_parse_from(["kinoteka", "init-config", "/tmp/k.json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::InitConfig { ref path }) if path == Path::new("/tmp/k.json")));
    }

    #[test]
    fn entries_are_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["b.mkv", "a.mkv", "c"] {
            fs::write(tmp.path().join(name), b"").unwrap();
        }
        let names: Vec<String> = sorted_entries(tmp.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.mkv", "b.mkv", "c"]);
    }
}
