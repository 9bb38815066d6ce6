pub mod head_to_head;
pub mod managers;
pub mod standings;
pub mod summary;

pub use head_to_head::{
    HeadToHeadReport, Meeting, MeetingPhase, Outcome, playoff_round_label, reconcile,
};
pub use managers::{ManagerDirectory, resolve_managers};
pub use standings::{LeagueSkip, SeasonPerformance, StandingsReport, compute_standings};
pub use summary::{CareerSummary, SeriesLeader, SeriesSummary, format_stat};
