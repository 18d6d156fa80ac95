//! Export packaging: a zip archive with the tier structure and one HTML page
//! per non-empty tier.

use std::{
    collections::HashSet,
    fs,
    io::{Cursor, Write},
    path::Path,
};

use shared::{domain::Tier, error::BoundaryError};
use tier_engine::Board;
use tracing::info;
use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

use crate::codec::export_json;

pub const TIERS_FILE: &str = "tiers.json";

/// Builds the archive in memory.
pub fn export_archive_bytes(board: &Board) -> Result<Vec<u8>, BoundaryError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    let tiers_json = export_json(&board.export())?;
    zip.start_file(TIERS_FILE, file_options()).map_err(packaging)?;
    zip.write_all(tiers_json.as_bytes()).map_err(packaging)?;

    let mut used_names = HashSet::from([TIERS_FILE.to_string()]);
    for tier in board.tiers().iter().filter(|tier| !tier.items.is_empty()) {
        let name = page_name(&tier.name, &mut used_names);
        zip.start_file(name, file_options()).map_err(packaging)?;
        zip.write_all(render_tier_page(tier).as_bytes())
            .map_err(packaging)?;
    }

    let cursor = zip.finish().map_err(packaging)?;
    Ok(cursor.into_inner())
}

pub fn write_export_archive(path: &Path, board: &Board) -> Result<(), BoundaryError> {
    let bytes = export_archive_bytes(board)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| BoundaryError::io(parent, err))?;
    }
    fs::write(path, &bytes).map_err(|err| BoundaryError::io(path, err))?;
    info!(path = %path.display(), bytes = bytes.len(), "export archive written");
    Ok(())
}

fn file_options() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
}

fn packaging(err: impl std::fmt::Display) -> BoundaryError {
    BoundaryError::Packaging(err.to_string())
}

/// `<tier name>.html`, with path separators replaced and repeats suffixed.
fn page_name(tier_name: &str, used: &mut HashSet<String>) -> String {
    let stem: String = tier_name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let stem = match stem.trim() {
        "" => "tier".to_string(),
        trimmed => trimmed.to_string(),
    };

    let mut candidate = format!("{stem}.html");
    let mut suffix = 2;
    while !used.insert(candidate.clone()) {
        candidate = format!("{stem}-{suffix}.html");
        suffix += 1;
    }
    candidate
}

fn render_tier_page(tier: &Tier) -> String {
    let name = escape_html(&tier.name);
    let color = escape_html(&tier.color);
    let items: String = tier
        .items
        .iter()
        .map(|entry| {
            let title = escape_html(&entry.title);
            format!(
                r#"
      <div class="entry">
        <img class="entry-cover" src="{cover}" alt="{title}">
        <div class="entry-title">{title}</div>
      </div>"#,
                cover = escape_html(&entry.cover),
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{name} - Tier list</title>
  <style>
    body {{ font-family: Arial, sans-serif; margin: 0; padding: 20px; }}
    .tier-header {{ background-color: {color}; color: white; padding: 10px; font-size: 24px; font-weight: bold; border-radius: 5px 5px 0 0; }}
    .tier-content {{ display: flex; flex-wrap: wrap; padding: 10px; background-color: #f5f5f5; border: 1px solid #ddd; border-top: none; border-radius: 0 0 5px 5px; }}
    .entry {{ width: 120px; margin: 10px; background: white; border-radius: 5px; overflow: hidden; box-shadow: 0 2px 5px rgba(0,0,0,0.1); }}
    .entry-cover {{ width: 100%; height: 160px; object-fit: cover; }}
    .entry-title {{ padding: 5px; text-align: center; font-size: 12px; white-space: nowrap; overflow: hidden; text-overflow: ellipsis; }}
  </style>
</head>
<body>
  <div class="tier-header">{name}</div>
  <div class="tier-content">{items}
  </div>
</body>
</html>
"#
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
