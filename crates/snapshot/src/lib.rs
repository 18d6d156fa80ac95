//! Snapshot codec: import payload parsing and export packaging around the
//! tier engine.

use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
};

use shared::{domain::Entry, error::BoundaryError, protocol::BoardLayout};
use tier_engine::{AssignmentCoordinator, Board, ImportSummary};
use tracing::debug;

pub mod archive;
pub mod codec;

pub use archive::{export_archive_bytes, write_export_archive, TIERS_FILE};
pub use codec::{
    export_json, export_records, layout_json, parse_import, parse_layout, ratings_from_export,
    records_json, rerate_from_export,
};

/// Reads and filters an import file. Nothing is returned unless the whole
/// file parses.
pub fn read_import_file(path: &Path) -> Result<Vec<Entry>, BoundaryError> {
    let raw = fs::read_to_string(path).map_err(|err| BoundaryError::io(path, err))?;
    parse_import(&raw)
}

/// `list.json` keeps its membership in `list.layout.json`.
pub fn layout_path(records: &Path) -> PathBuf {
    records.with_extension("layout.json")
}

/// Reads the layout saved next to `records`; `None` when there is none yet.
pub fn read_layout_file(records: &Path) -> Result<Option<BoardLayout>, BoundaryError> {
    let path = layout_path(records);
    match fs::read_to_string(&path) {
        Ok(raw) => parse_layout(&raw).map(Some),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(BoundaryError::io(path, err)),
    }
}

/// Loads an entries file into the coordinator.
///
/// With a saved layout, tier members are re-rated from their saved tier and
/// saved pool members stay in the pool even when they still carry a tier
/// rating. Entries the layout does not mention, or every entry when there is
/// no layout, are placed by rating.
pub fn load_board(
    coordinator: &mut AssignmentCoordinator,
    records: &Path,
) -> Result<ImportSummary, BoundaryError> {
    let entries = read_import_file(records)?;
    let summary = match read_layout_file(records)? {
        Some(layout) => {
            debug!(path = %records.display(), "restoring saved layout");
            let pool: HashSet<_> = layout.unassigned.iter().cloned().collect();
            let entries = rerate_from_export(&layout.snapshot, entries);
            coordinator.restore_entries(entries, &pool)
        }
        None => coordinator.import_entries(entries),
    };
    Ok(summary)
}

/// Writes the board back out in import format, with its layout alongside.
pub fn write_records_file(records: &Path, board: &Board) -> Result<(), BoundaryError> {
    fs::write(records, records_json(board)?).map_err(|err| BoundaryError::io(records, err))?;
    let path = layout_path(records);
    fs::write(&path, layout_json(board)?).map_err(|err| BoundaryError::io(path, err))?;
    Ok(())
}
