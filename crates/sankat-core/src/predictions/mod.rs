pub mod engine;
pub mod guidance;
pub mod themes;
pub mod types;

pub use engine::PredictionEngine;
pub use guidance::{daily_guidance, weekday_info, DailyGuidance, WeekdayInfo};
pub use themes::{default_themes, PhaseTheme};
pub use types::{AccuracyRecord, AccuracyReport, OutcomeRecord, Statement, Support};
