pub mod catalog;
pub mod detector;
pub mod types;

pub use catalog::default_rules;
pub use detector::{PatternMatcher, MATCH_THRESHOLD};
pub use types::{PatternMatch, PatternRule, PatternStatistics, RuleFeedback, RuleStatistics};
