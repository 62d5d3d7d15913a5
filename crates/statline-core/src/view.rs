// Sort and search state for the career-totals table.
//
// Sorting and searching are independent: the totals list is sorted in place,
// and the search is a read-only filter over whatever order the list is in.
// Every state change recombines the two; the aggregation is never re-run.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::stats::totals::PlayerTotal;

// ---------------------------------------------------------------------------
// Sort key / direction
// ---------------------------------------------------------------------------

/// A sortable column of the totals table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    PlayerName,
    Goals,
    Assists,
    Points,
    Seasons,
    PointsPerSeason,
}

impl SortKey {
    /// All keys, in table column order.
    pub const ALL: [SortKey; 6] = [
        SortKey::PlayerName,
        SortKey::Goals,
        SortKey::Assists,
        SortKey::Points,
        SortKey::Seasons,
        SortKey::PointsPerSeason,
    ];

    /// Column header text.
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::PlayerName => "Player",
            SortKey::Goals => "Goals",
            SortKey::Assists => "Assists",
            SortKey::Points => "Points",
            SortKey::Seasons => "Seasons",
            SortKey::PointsPerSeason => "PTS/S",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn toggled(self) -> SortDir {
        match self {
            SortDir::Asc => SortDir::Desc,
            SortDir::Desc => SortDir::Asc,
        }
    }

    /// Arrow drawn next to the active column header.
    pub fn indicator(self) -> &'static str {
        match self {
            SortDir::Desc => "▼",
            SortDir::Asc => "▲",
        }
    }
}

/// The active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub key: SortKey,
    pub dir: SortDir,
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Current sort and search settings for the totals table.
///
/// Starts unsorted (first-appearance order) with no search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    sort: Option<SortState>,
    search: String,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The active sort, if any column has been chosen yet.
    pub fn sort(&self) -> Option<SortState> {
        self.sort
    }

    /// The active search text, already case-folded. Empty means no filter.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Choose a sort column and re-sort `list` in place.
    ///
    /// Choosing the active column again flips the direction; choosing a new
    /// column starts descending. Returns the new sort state.
    pub fn apply_sort(&mut self, list: &mut [PlayerTotal], key: SortKey) -> SortState {
        let next = match self.sort {
            Some(current) if current.key == key => SortState {
                key,
                dir: current.dir.toggled(),
            },
            _ => SortState {
                key,
                dir: SortDir::Desc,
            },
        };
        self.sort = Some(next);
        sort_totals(list, next);
        next
    }

    /// Replace the search text. The stored text is case-folded.
    pub fn set_search(&mut self, text: &str) {
        self.search = text.to_lowercase();
    }

    /// The rows to display: `list` in its current order, filtered by the
    /// active search.
    pub fn visible<'a>(&self, list: &'a [PlayerTotal]) -> Vec<&'a PlayerTotal> {
        apply_search(list, &self.search)
    }
}

// ---------------------------------------------------------------------------
// Sorting / filtering primitives
// ---------------------------------------------------------------------------

/// Compare two totals on one column, ascending.
///
/// The name column compares case-insensitively; every other column compares
/// numerically.
pub fn compare_totals(a: &PlayerTotal, b: &PlayerTotal, key: SortKey) -> Ordering {
    match key {
        SortKey::PlayerName => compare_text(&a.player_name, &b.player_name),
        SortKey::Goals => a.goals.cmp(&b.goals),
        SortKey::Assists => a.assists.cmp(&b.assists),
        SortKey::Points => a.points.cmp(&b.points),
        SortKey::Seasons => a.seasons.cmp(&b.seasons),
        SortKey::PointsPerSeason => a.points_per_season.total_cmp(&b.points_per_season),
    }
}

/// Stable in-place sort by the given column and direction.
pub fn sort_totals(list: &mut [PlayerTotal], sort: SortState) {
    list.sort_by(|a, b| {
        let cmp = compare_totals(a, b, sort.key);
        match sort.dir {
            SortDir::Asc => cmp,
            SortDir::Desc => cmp.reverse(),
        }
    });
}

/// Base-letter text ordering: case and accents are ignored, so "Émile",
/// "emile" and "EMILE" compare equal and a stable sort leaves them in their
/// prior order. Accented names sort next to their unaccented spelling.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    base_letters(a).cmp(base_letters(b))
}

/// Canonical decomposition with combining marks dropped, then lowercased.
fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

/// Filter totals by a case-insensitive substring of the player name.
///
/// An empty `text` keeps every row, in order.
pub fn apply_search<'a>(list: &'a [PlayerTotal], text: &str) -> Vec<&'a PlayerTotal> {
    if text.is_empty() {
        return list.iter().collect();
    }
    let needle = text.to_lowercase();
    list.iter()
        .filter(|p| p.player_name.to_lowercase().contains(&needle))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn total(name: &str, points: i64) -> PlayerTotal {
        PlayerTotal {
            player_id: name.to_lowercase(),
            player_name: name.to_string(),
            seasons: 1,
            goals: 0,
            assists: 0,
            points,
            points_per_season: points as f64,
        }
    }

    fn names(list: &[PlayerTotal]) -> Vec<&str> {
        list.iter().map(|p| p.player_name.as_str()).collect()
    }

    fn visible_names<'a>(list: &[&'a PlayerTotal]) -> Vec<&'a str> {
        list.iter().map(|p| p.player_name.as_str()).collect()
    }

    #[test]
    fn starts_unsorted_without_search() {
        let view = ViewState::new();
        assert_eq!(view.sort(), None);
        assert_eq!(view.search(), "");
    }

    #[test]
    fn sort_toggle() {
        let mut list = vec![total("A", 5), total("B", 10)];
        let mut view = ViewState::new();

        let state = view.apply_sort(&mut list, SortKey::Points);
        assert_eq!(state.dir, SortDir::Desc);
        assert_eq!(names(&list), vec!["B", "A"]);

        let state = view.apply_sort(&mut list, SortKey::Points);
        assert_eq!(state.dir, SortDir::Asc);
        assert_eq!(names(&list), vec!["A", "B"]);
    }

    #[test]
    fn new_key_resets_to_descending() {
        let mut list = vec![total("Ann", 5), total("bob", 10), total("Cara", 1)];
        let mut view = ViewState::new();
        view.apply_sort(&mut list, SortKey::Points);
        view.apply_sort(&mut list, SortKey::Points);

        let state = view.apply_sort(&mut list, SortKey::PlayerName);
        assert_eq!(
            state,
            SortState {
                key: SortKey::PlayerName,
                dir: SortDir::Desc
            }
        );
        assert_eq!(names(&list), vec!["Cara", "bob", "Ann"]);
    }

    #[test]
    fn name_sort_ignores_case() {
        let mut list = vec![total("bob", 0), total("Alice", 0), total("carl", 0)];
        sort_totals(
            &mut list,
            SortState {
                key: SortKey::PlayerName,
                dir: SortDir::Asc,
            },
        );
        assert_eq!(names(&list), vec!["Alice", "bob", "carl"]);
        assert_eq!(compare_text("ANN", "ann"), Ordering::Equal);
    }

    #[test]
    fn name_sort_ignores_accents() {
        let mut list = vec![
            total("Zoe", 0),
            total("Émile", 0),
            total("Eva", 0),
            total("Ólafur", 0),
            total("Oscar", 0),
        ];
        sort_totals(
            &mut list,
            SortState {
                key: SortKey::PlayerName,
                dir: SortDir::Asc,
            },
        );
        assert_eq!(names(&list), vec!["Émile", "Eva", "Ólafur", "Oscar", "Zoe"]);
        assert_eq!(compare_text("Émile", "Emile"), Ordering::Equal);
        assert_eq!(compare_text("ÉMILE", "emile"), Ordering::Equal);
        assert_eq!(compare_text("Åsa", "Ann"), Ordering::Greater);
    }

    #[test]
    fn accent_equal_names_keep_prior_order() {
        let mut list = vec![total("Jose", 0), total("José", 0), total("Ann", 0)];
        sort_totals(
            &mut list,
            SortState {
                key: SortKey::PlayerName,
                dir: SortDir::Asc,
            },
        );
        assert_eq!(names(&list), vec!["Ann", "Jose", "José"]);
    }

    #[test]
    fn ties_keep_prior_order() {
        let mut list = vec![total("First", 3), total("Second", 3), total("Top", 9)];
        sort_totals(
            &mut list,
            SortState {
                key: SortKey::Points,
                dir: SortDir::Desc,
            },
        );
        assert_eq!(names(&list), vec!["Top", "First", "Second"]);
        sort_totals(
            &mut list,
            SortState {
                key: SortKey::Points,
                dir: SortDir::Asc,
            },
        );
        assert_eq!(names(&list), vec!["First", "Second", "Top"]);
    }

    #[test]
    fn points_per_season_sorts_numerically() {
        let mut a = total("A", 10);
        a.seasons = 4;
        a.points_per_season = 2.5;
        let mut b = total("B", 3);
        b.points_per_season = 3.0;
        let mut list = vec![a, b];
        let mut view = ViewState::new();
        view.apply_sort(&mut list, SortKey::PointsPerSeason);
        assert_eq!(names(&list), vec!["B", "A"]);
    }

    #[test]
    fn search_composes_with_sort() {
        let mut list = vec![total("Ann", 5), total("Bob", 1), total("Cara", 3)];
        let mut view = ViewState::new();
        view.apply_sort(&mut list, SortKey::Points);
        view.set_search("a");
        assert_eq!(visible_names(&view.visible(&list)), vec!["Ann", "Cara"]);

        // Re-sorting keeps the filter applied.
        view.apply_sort(&mut list, SortKey::Points);
        assert_eq!(visible_names(&view.visible(&list)), vec!["Cara", "Ann"]);
    }

    #[test]
    fn search_is_case_insensitive() {
        let list = vec![total("ANNA", 1), total("bob", 2)];
        assert_eq!(visible_names(&apply_search(&list, "nn")), vec!["ANNA"]);
        assert_eq!(visible_names(&apply_search(&list, "BO")), vec!["bob"]);
    }

    #[test]
    fn empty_search_is_identity() {
        let list = vec![total("A", 1), total("B", 2)];
        let all = apply_search(&list, "");
        assert_eq!(all.len(), 2);
        assert!(std::ptr::eq(all[0], &list[0]));
        assert!(std::ptr::eq(all[1], &list[1]));
    }

    #[test]
    fn search_is_idempotent() {
        let list = vec![total("Ann", 1), total("Bob", 2), total("Hannah", 3)];
        let once: Vec<PlayerTotal> = apply_search(&list, "an").into_iter().cloned().collect();
        let twice = apply_search(&once, "an");
        assert_eq!(visible_names(&twice), names(&once));
    }

    #[test]
    fn set_search_folds_case() {
        let mut view = ViewState::new();
        view.set_search("AnN");
        assert_eq!(view.search(), "ann");
    }

    #[test]
    fn labels_and_indicators() {
        assert_eq!(SortKey::PointsPerSeason.label(), "PTS/S");
        assert_eq!(SortDir::Desc.indicator(), "▼");
        assert_eq!(SortDir::Asc.indicator(), "▲");
    }
}
