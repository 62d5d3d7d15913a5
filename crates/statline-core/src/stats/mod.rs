// Season data pipeline: normalization, ingestion, aggregation, ranking.

pub mod normalize;
pub mod season;
pub mod top_seasons;
pub mod totals;

pub use season::{DataFormat, SeasonError, SeasonRow};
pub use top_seasons::{top_seasons, DEFAULT_TOP_SEASONS};
pub use totals::{build_player_totals, PlayerTotal};
