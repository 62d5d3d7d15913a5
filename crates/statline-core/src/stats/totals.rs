// Career totals: one summary line per player, aggregated from season rows.

use std::collections::HashMap;

use super::season::SeasonRow;

/// Career totals for a single player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerTotal {
    pub player_id: String,
    /// Display name taken from the player's first row.
    pub player_name: String,
    /// Number of rows that count toward the totals.
    pub seasons: u32,
    pub goals: i64,
    pub assists: i64,
    pub points: i64,
    /// `points / seasons`, or 0 when the player has no counted seasons.
    pub points_per_season: f64,
}

impl PlayerTotal {
    fn empty(row: &SeasonRow) -> Self {
        PlayerTotal {
            player_id: row.player_id.clone(),
            player_name: row.display_name(),
            seasons: 0,
            goals: 0,
            assists: 0,
            points: 0,
            points_per_season: 0.0,
        }
    }

    fn add_season(&mut self, row: &SeasonRow) {
        self.seasons += 1;
        self.goals = self.goals.saturating_add(row.goals);
        self.assists = self.assists.saturating_add(row.assists);
        self.points = self.points.saturating_add(row.effective_points());
    }
}

/// Aggregate season rows into career totals.
///
/// Players appear in order of their first row. A player whose rows are all
/// did-not-play still gets a line, with every sum at 0. The input is not
/// modified and a fresh vector is returned on each call.
pub fn build_player_totals(rows: &[SeasonRow]) -> Vec<PlayerTotal> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<PlayerTotal> = Vec::new();

    for row in rows {
        let slot = *index.entry(row.player_id.as_str()).or_insert_with(|| {
            totals.push(PlayerTotal::empty(row));
            totals.len() - 1
        });
        if row.qualifies_for_totals() {
            totals[slot].add_season(row);
        }
    }

    for total in &mut totals {
        total.points_per_season = if total.seasons > 0 {
            total.points as f64 / f64::from(total.seasons)
        } else {
            0.0
        };
    }

    totals
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
