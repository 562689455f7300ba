//! Targeting decisions and their diagnostic log line.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info};

use crate::matcher::{TargetMatch, TargetMatcher};

/// Outcome of checking one campaign's targeting for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum TargetingDecision {
    /// The campaign has no target countries and is shown to everyone.
    Global,
    /// The campaign is targeted but the user has no known country.
    MissingUserCountry,
    /// The user's country satisfied a target entry.
    Matched(TargetMatch),
    /// The user's country satisfied none of the target entries.
    NoMatch,
}

impl TargetingDecision {
    /// Whether the campaign may be shown to the user.
    pub fn is_eligible(&self) -> bool {
        matches!(self, TargetingDecision::Global | TargetingDecision::Matched(_))
    }
}

impl fmt::Display for TargetingDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetingDecision::Global => write!(f, "global (no target countries)"),
            TargetingDecision::MissingUserCountry => write!(f, "no country on user record"),
            TargetingDecision::Matched(found) => {
                write!(f, "match via {} on {:?}", found.rule, found.target)
            }
            TargetingDecision::NoMatch => write!(f, "no match"),
        }
    }
}

/// Decide whether a campaign applies to a user.
///
/// An empty target list is global regardless of the user's country.
pub fn evaluate<S: AsRef<str>>(user_country: Option<&str>, targets: &[S]) -> TargetingDecision {
    if targets.is_empty() {
        return TargetingDecision::Global;
    }
    match TargetMatcher::new(user_country) {
        Some(matcher) => evaluate_with(&matcher, targets),
        None => TargetingDecision::MissingUserCountry,
    }
}

/// Like [`evaluate`], reusing an already normalized user country.
pub fn evaluate_with<S: AsRef<str>>(matcher: &TargetMatcher, targets: &[S]) -> TargetingDecision {
    if targets.is_empty() {
        return TargetingDecision::Global;
    }
    match matcher.find(targets) {
        Some(found) => TargetingDecision::Matched(found),
        None => TargetingDecision::NoMatch,
    }
}

/// Emit one log event describing a targeting decision.
pub fn log_decision<S: AsRef<str>>(
    campaign_id: &str,
    targets: &[S],
    user_country: Option<&str>,
    decision: &TargetingDecision,
) {
    match decision {
        TargetingDecision::Global => {
            debug!(campaign = campaign_id, "Campaign {} is global", campaign_id);
        }
        TargetingDecision::MissingUserCountry => {
            info!(
                campaign = campaign_id,
                targets = %join_targets(targets),
                "Campaign {} is targeted but user has no country",
                campaign_id
            );
        }
        _ => {
            info!(
                campaign = campaign_id,
                targets = %join_targets(targets),
                user_country = user_country.unwrap_or_default(),
                eligible = decision.is_eligible(),
                "Campaign {}: {}",
                campaign_id,
                decision
            );
        }
    }
}

fn join_targets<S: AsRef<str>>(targets: &[S]) -> String {
    targets
        .iter()
        .map(|t| t.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}
