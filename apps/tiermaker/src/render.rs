use std::fmt::Write;

use shared::domain::{Entry, UNASSIGNED_CONTAINER};
use tier_engine::Board;

/// Plain-text listing of every tier followed by the pool.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    for tier in board.tiers() {
        let _ = writeln!(out, "[{}] {} {}", tier.name, tier.id, tier.color);
        render_entries(&mut out, &tier.items);
    }
    let _ = writeln!(out, "[{UNASSIGNED_CONTAINER}]");
    render_entries(&mut out, board.unassigned());
    out
}

fn render_entries(out: &mut String, entries: &[Entry]) {
    if entries.is_empty() {
        out.push_str("  (empty)\n");
        return;
    }
    for entry in entries {
        let _ = match entry.rating {
            Some(rating) => writeln!(out, "  - {} {} (rating {rating})", entry.id, entry.title),
            None => writeln!(out, "  - {} {}", entry.id, entry.title),
        };
    }
}
