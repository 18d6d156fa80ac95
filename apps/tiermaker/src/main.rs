use std::{fs, path::Path, path::PathBuf};

use anyhow::{bail, Context};
use base64::Engine;
use clap::{Parser, Subcommand};
use shared::{
    domain::{ContainerId, EntryId, UNASSIGNED_CONTAINER},
    error::{BoundaryError, ErrorReport},
};
use snapshot::{load_board, write_export_archive, write_records_file};
use tier_engine::{AssignmentCoordinator, Board, Outcome};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::load_settings;
use render::render_board;

#[derive(Parser, Debug)]
#[command(name = "tiermaker", about = "Tier list editing over an entries file")]
struct Cli {
    /// Config file; defaults to `tiermaker.toml` in the working directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every tier and the unassigned pool.
    Show { file: PathBuf },
    /// Move an entry into a tier (by id or name) or into `unassigned`.
    Move {
        file: PathBuf,
        entry: String,
        target: String,
        #[arg(long)]
        index: Option<usize>,
    },
    /// Add a new entry to the unassigned pool.
    Add {
        file: PathBuf,
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, required_unless_present = "cover_file", conflicts_with = "cover_file")]
        cover: Option<String>,
        /// Image file embedded as a data URL.
        #[arg(long)]
        cover_file: Option<PathBuf>,
    },
    /// Delete an entry.
    Remove { file: PathBuf, entry: String },
    /// Write the zip export (tiers.json plus one page per non-empty tier).
    Export { file: PathBuf, archive: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_filter.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut coordinator = AssignmentCoordinator::new(settings.defaults);

    match cli.command {
        Command::Show { file } => {
            load_into(&mut coordinator, &file)?;
            print!("{}", render_board(coordinator.board()));
        }
        Command::Move {
            file,
            entry,
            target,
            index,
        } => {
            load_into(&mut coordinator, &file)?;
            let entry = EntryId::new(entry);
            let Some(source) = coordinator.board().locate(&entry) else {
                bail!("no entry with id '{entry}' in '{}'", file.display());
            };
            let target = resolve_container(coordinator.board(), &target)?;
            let outcome = coordinator.move_entry(&entry, &source, &target, index);
            commit(&coordinator, &file, outcome)?;
        }
        Command::Add {
            file,
            title,
            cover,
            cover_file,
        } => {
            load_into(&mut coordinator, &file)?;
            let cover = match (cover, cover_file) {
                (Some(cover), _) => cover,
                (None, Some(path)) => cover_data_url(&path)?,
                (None, None) => bail!("either --cover or --cover-file is required"),
            };
            let id = coordinator.add_new_entry(&title, cover);
            write_records_file(&file, coordinator.board())?;
            println!("{id}");
        }
        Command::Remove { file, entry } => {
            load_into(&mut coordinator, &file)?;
            let outcome = coordinator.delete_entry(&EntryId::new(entry));
            commit(&coordinator, &file, outcome)?;
        }
        Command::Export { file, archive } => {
            load_into(&mut coordinator, &file)?;
            write_export_archive(&archive, coordinator.board())?;
            info!(archive = %archive.display(), "export written");
        }
    }

    Ok(())
}

/// Loads the entries file. A rejected file is reported on stderr as an
/// `ErrorReport` before the error propagates.
fn load_into(coordinator: &mut AssignmentCoordinator, file: &Path) -> anyhow::Result<()> {
    let summary = load_board(coordinator, file).map_err(report)?;
    info!(
        placed = summary.placed,
        unassigned = summary.unassigned,
        duplicates = summary.duplicates,
        "entries loaded"
    );
    Ok(())
}

fn report(err: BoundaryError) -> BoundaryError {
    match serde_json::to_string(&ErrorReport::from(&err)) {
        Ok(json) => eprintln!("{json}"),
        Err(encode_err) => error!(%encode_err, "failed to encode error report"),
    }
    err
}

fn commit(
    coordinator: &AssignmentCoordinator,
    file: &Path,
    outcome: Outcome,
) -> anyhow::Result<()> {
    match outcome {
        Outcome::Applied => Ok(write_records_file(file, coordinator.board())?),
        Outcome::Unchanged(reason) => {
            println!("nothing changed ({reason:?})");
            Ok(())
        }
    }
}

/// Accepts `unassigned`, a tier id, or a tier name.
fn resolve_container(board: &Board, raw: &str) -> anyhow::Result<ContainerId> {
    if raw == UNASSIGNED_CONTAINER {
        return Ok(ContainerId::Unassigned);
    }
    if let Some(tier) = board.tiers().iter().find(|t| t.id.as_str() == raw) {
        return Ok(ContainerId::Tier(tier.id.clone()));
    }
    match board.tiers().iter().find(|t| t.name == raw) {
        Some(tier) => Ok(ContainerId::Tier(tier.id.clone())),
        None => bail!("no tier named '{raw}'"),
    }
}

fn cover_data_url(path: &Path) -> anyhow::Result<String> {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.type_() != mime_guess::mime::IMAGE {
        bail!("'{}' is not an image file", path.display());
    }
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read cover '{}'", path.display()))?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:{mime};base64,{encoded}"))
}
