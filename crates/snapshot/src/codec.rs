use std::collections::HashMap;

use serde_json::Value;
use shared::{
    domain::{Entry, EntryId},
    error::BoundaryError,
    protocol::{BoardLayout, ExportSnapshot, ImportRecord},
};
use tier_engine::Board;
use tracing::warn;

/// Largest integer an f64 rating can carry exactly.
const MAX_EXACT_RATING: f64 = 9_007_199_254_740_992.0;

/// Parses an import payload into entries ready for `import_entries`.
///
/// The top level must be a JSON array. Records that do not deserialize, or that
/// lack a non-empty `id`, `title` or `cover`, are skipped. A rating that is not
/// a whole number is dropped while the entry itself is kept.
pub fn parse_import(raw: &str) -> Result<Vec<Entry>, BoundaryError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|err| BoundaryError::Validation(format!("invalid JSON: {err}")))?;
    let Value::Array(records) = value else {
        return Err(BoundaryError::Validation("expected an array of entries".into()));
    };

    let mut entries = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<ImportRecord>(record) {
            Ok(record) => entries.extend(record_to_entry(index, record)),
            Err(err) => warn!(index, %err, "discarding malformed import record"),
        }
    }
    Ok(entries)
}

fn record_to_entry(index: usize, record: ImportRecord) -> Option<Entry> {
    let (Some(id), Some(title), Some(cover)) = (
        non_empty(record.id),
        non_empty(record.title),
        non_empty(record.cover),
    ) else {
        warn!(index, "discarding import record without id, title or cover");
        return None;
    };

    Some(Entry {
        id: EntryId(id),
        title,
        cover,
        rating: record.rating.and_then(|rating| whole_rating(index, rating)),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn whole_rating(index: usize, rating: f64) -> Option<i64> {
    if rating.is_finite() && rating.fract() == 0.0 && rating.abs() <= MAX_EXACT_RATING {
        Some(rating as i64)
    } else {
        warn!(index, rating, "ignoring non-integer rating");
        None
    }
}

/// Board contents in import-record shape: tiers top to bottom, then the pool.
/// Feeding the result back through `parse_import` and `import_entries`
/// rebuilds tier membership for every entry whose rating still matches its
/// container; pool entries that kept a tier rating need the layout as well.
pub fn export_records(board: &Board) -> Vec<ImportRecord> {
    board
        .containers()
        .flat_map(|(_, items)| items.iter())
        .map(ImportRecord::from)
        .collect()
}

pub fn records_json(board: &Board) -> Result<String, BoundaryError> {
    serde_json::to_string_pretty(&export_records(board)).map_err(encoding)
}

/// Pretty `{ "tiers": [...] }` document for the archive.
pub fn export_json(snapshot: &ExportSnapshot) -> Result<String, BoundaryError> {
    serde_json::to_string_pretty(snapshot).map_err(encoding)
}

pub fn layout_json(board: &Board) -> Result<String, BoundaryError> {
    serde_json::to_string_pretty(&board.layout()).map_err(encoding)
}

pub fn parse_layout(raw: &str) -> Result<BoardLayout, BoundaryError> {
    serde_json::from_str(raw)
        .map_err(|err| BoundaryError::Validation(format!("invalid layout: {err}")))
}

fn encoding(err: serde_json::Error) -> BoundaryError {
    BoundaryError::Encoding(err.to_string())
}

/// Rating implied by each entry's tier position in an export structure.
pub fn ratings_from_export(snapshot: &ExportSnapshot) -> HashMap<EntryId, i64> {
    let count = snapshot.tiers.len() as i64;
    snapshot
        .tiers
        .iter()
        .enumerate()
        .flat_map(|(position, tier)| {
            let rating = count - 1 - position as i64;
            tier.items.iter().map(move |id| (id.clone(), rating))
        })
        .collect()
}

/// Re-rates `entries` from an export structure and orders them the way the
/// export lists them, followed by entries the export does not mention.
pub fn rerate_from_export(snapshot: &ExportSnapshot, entries: Vec<Entry>) -> Vec<Entry> {
    let ratings = ratings_from_export(snapshot);
    let mut by_id: HashMap<EntryId, Entry> = HashMap::with_capacity(entries.len());
    let mut unlisted = Vec::new();
    for entry in entries {
        if ratings.contains_key(&entry.id) {
            by_id.insert(entry.id.clone(), entry);
        } else {
            unlisted.push(entry);
        }
    }

    let mut ordered: Vec<Entry> = snapshot
        .tiers
        .iter()
        .flat_map(|tier| tier.items.iter())
        .filter_map(|id| {
            by_id.remove(id).map(|mut entry| {
                entry.rating = ratings.get(id).copied();
                entry
            })
        })
        .collect();
    ordered.extend(unlisted);
    ordered
}

#[cfg(test)]
#[path = "tests/codec_tests.rs"]
mod tests;
