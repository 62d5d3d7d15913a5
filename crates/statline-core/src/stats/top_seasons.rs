// Individual-season ranking: the best single seasons across all players.

use super::season::SeasonRow;

/// Number of seasons shown when the caller does not ask for a specific count.
pub const DEFAULT_TOP_SEASONS: usize = 10;

/// Rank individual seasons by effective points, best first.
///
/// Did-not-play rows are dropped using
/// [`SeasonRow::eligible_for_top_seasons`]. Ties keep their source order.
/// The source slice is left untouched; the result is an owned copy of at
/// most `limit` rows.
pub fn top_seasons(rows: &[SeasonRow], limit: usize) -> Vec<SeasonRow> {
    let mut played: Vec<&SeasonRow> = rows
        .iter()
        .filter(|row| row.eligible_for_top_seasons())
        .collect();

    // `sort_by` is stable.
    played.sort_by(|a, b| b.effective_points().cmp(&a.effective_points()));

    played.into_iter().take(limit).cloned().collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
