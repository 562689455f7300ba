//! Target country matching.

use std::fmt;

use serde::Serialize;

use crate::countries;
use crate::normalize::{normalize, normalize_str, NormalizedCountry};

/// The equivalence rule that matched a user to a target entry.
///
/// Rules are tried in declaration order for each target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    /// Trimmed, lowercased strings are identical.
    ExactNormalized,
    /// Both sides carry the same ISO code.
    Code,
    /// Both sides carry the same name, ignoring case.
    Name,
    /// The user's name maps to the target's code.
    UserNameToTargetCode,
    /// The user's code maps to the target's name.
    UserCodeToTargetName,
}

impl MatchRule {
    /// Short label used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchRule::ExactNormalized => "exact",
            MatchRule::Code => "code",
            MatchRule::Name => "name",
            MatchRule::UserNameToTargetCode => "user_name_to_target_code",
            MatchRule::UserCodeToTargetName => "user_code_to_target_name",
        }
    }
}

impl fmt::Display for MatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A successful match against one entry of a target list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetMatch {
    pub rule: MatchRule,
    /// The target entry as configured on the campaign.
    pub target: String,
    /// Position of the entry in the target list.
    pub index: usize,
}

/// A user country, normalized once, ready to test against many target lists.
#[derive(Debug, Clone)]
pub struct TargetMatcher {
    user: NormalizedCountry,
}

impl TargetMatcher {
    /// Normalize the user's country. Returns `None` when it is absent or blank.
    pub fn new(user_country: Option<&str>) -> Option<Self> {
        let user = normalize(user_country);
        if user.is_empty() {
            None
        } else {
            Some(Self { user })
        }
    }

    /// The user's normalized country.
    pub fn user(&self) -> &NormalizedCountry {
        &self.user
    }

    /// Find the first target entry the user satisfies.
    pub fn find<S: AsRef<str>>(&self, targets: &[S]) -> Option<TargetMatch> {
        targets.iter().enumerate().find_map(|(index, raw)| {
            let target = normalize_str(raw.as_ref());
            match_rule(&self.user, &target).map(|rule| TargetMatch {
                rule,
                target: raw.as_ref().to_string(),
                index,
            })
        })
    }

    /// Check whether the user satisfies any target entry.
    pub fn matches<S: AsRef<str>>(&self, targets: &[S]) -> bool {
        self.find(targets).is_some()
    }
}

/// Test one normalized user country against one normalized target.
pub fn match_rule(user: &NormalizedCountry, target: &NormalizedCountry) -> Option<MatchRule> {
    if user.is_empty() || target.is_empty() {
        return None;
    }

    if user.normalized == target.normalized {
        return Some(MatchRule::ExactNormalized);
    }

    if let (Some(user_code), Some(target_code)) = (&user.code, &target.code) {
        if user_code == target_code {
            return Some(MatchRule::Code);
        }
    }

    if let (Some(user_name), Some(target_name)) = (&user.name, &target.name) {
        if names_equal(user_name, target_name) {
            return Some(MatchRule::Name);
        }
    }

    if let (Some(user_name), Some(target_code)) = (&user.name, &target.code) {
        if countries::country_code(user_name) == Some(target_code.as_str()) {
            return Some(MatchRule::UserNameToTargetCode);
        }
    }

    if let (Some(user_code), Some(target_name)) = (&user.code, &target.name) {
        if let Some(mapped) = countries::country_name(user_code) {
            if names_equal(mapped, target_name) {
                return Some(MatchRule::UserCodeToTargetName);
            }
        }
    }

    None
}

/// Find which target entry, and by which rule, the user matches.
///
/// Returns `None` when the user country is absent/blank or the list is empty.
pub fn find_match<S: AsRef<str>>(user_country: Option<&str>, targets: &[S]) -> Option<TargetMatch> {
    if targets.is_empty() {
        return None;
    }
    TargetMatcher::new(user_country)?.find(targets)
}

/// Decide whether a user's country is in a campaign's target list.
///
/// An empty list never matches here; treating it as "global" is the job of
/// [`crate::decision::evaluate`].
pub fn is_targeted<S: AsRef<str>>(user_country: Option<&str>, targets: &[S]) -> bool {
    find_match(user_country, targets).is_some()
}

fn names_equal(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
