pub mod dashas;
pub mod nakshatra;

pub use dashas::{
    build_antardasha_cycle, build_mahadasha_cycle, query_active_phase, subdivide, verify_cycle,
    ActivePhase, CycleVerification, DashaPeriod, PeriodEntry, PeriodStatus, PeriodTier, PeriodTimeline,
};
pub use nakshatra::{find_nakshatra, get_nakshatra_for_longitude, nakshatra_lord, NakshatraMetadata};
