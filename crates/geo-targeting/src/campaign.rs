//! Campaign records and feed eligibility.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GeoTargetingConfig;
use crate::decision::{evaluate, evaluate_with, log_decision, TargetingDecision};
use crate::location::{resolve_user_country, FallbackCountries, SessionContext, UserProfile};
use crate::matcher::TargetMatcher;

/// An ad or boosted post with its country targeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Target countries as names or ISO codes. Empty means global.
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default)]
    pub boosted: bool,
}

impl Campaign {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            countries: Vec::new(),
            boosted: false,
        }
    }

    pub fn with_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.countries = countries.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_global(&self) -> bool {
        self.countries.is_empty()
    }

    /// Decide this campaign for a user country.
    pub fn decide(&self, user_country: Option<&str>) -> TargetingDecision {
        evaluate(user_country, &self.countries)
    }

    /// Render a one-line summary of the campaign and a decision.
    pub fn render_decision(&self, decision: &TargetingDecision) -> String {
        let label = if self.title.is_empty() {
            self.id.clone()
        } else {
            format!("{} ({})", self.id, self.title)
        };
        let verdict = if decision.is_eligible() { "show" } else { "skip" };
        format!("{}: {} - {}", label, verdict, decision)
    }
}

/// Filters campaigns down to those a user is eligible to see.
#[derive(Debug, Clone, Default)]
pub struct CampaignFilter {
    config: GeoTargetingConfig,
    fallback: FallbackCountries,
}

impl CampaignFilter {
    pub fn new(config: GeoTargetingConfig, fallback: FallbackCountries) -> Self {
        Self { config, fallback }
    }

    /// Resolve the user's country and decide every campaign, in order.
    pub fn decide_all<'c>(
        &self,
        user: &UserProfile,
        session: Option<&SessionContext>,
        campaigns: &'c [Campaign],
    ) -> Vec<(&'c Campaign, TargetingDecision)> {
        let user_country = resolve_user_country(user, session, &self.fallback).map(|(c, _)| c);
        let matcher = TargetMatcher::new(user_country);

        campaigns
            .iter()
            .map(|campaign| {
                let decision = match &matcher {
                    Some(matcher) => evaluate_with(matcher, &campaign.countries),
                    None => evaluate(None, &campaign.countries),
                };
                if self.config.log_decisions {
                    log_decision(&campaign.id, &campaign.countries, user_country, &decision);
                }
                (campaign, decision)
            })
            .collect()
    }

    /// Campaigns the user is eligible to see, in their original order.
    pub fn eligible<'c>(
        &self,
        user: &UserProfile,
        session: Option<&SessionContext>,
        campaigns: &'c [Campaign],
    ) -> Vec<&'c Campaign> {
        let eligible: Vec<_> = self
            .decide_all(user, session, campaigns)
            .into_iter()
            .filter(|(_, decision)| decision.is_eligible())
            .map(|(campaign, _)| campaign)
            .collect();

        debug!(
            user = %user.id,
            "{} of {} campaigns eligible",
            eligible.len(),
            campaigns.len()
        );
        eligible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campaigns() -> Vec<Campaign> {
        vec![
            Campaign::new("global"),
            Campaign::new("na").with_countries(["US", "Canada"]),
            Campaign::new("eu").with_countries(["Germany", "FR"]),
        ]
    }

    fn ids(found: &[&Campaign]) -> Vec<String> {
        found.iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn test_eligible_by_profile_country() {
        let filter = CampaignFilter::default();
        let all = campaigns();
        let user = UserProfile::new("u1").with_country("united states");
        assert_eq!(ids(&filter.eligible(&user, None, &all)), vec!["global", "na"]);

        let user = UserProfile::new("u2").with_country("de");
        assert_eq!(ids(&filter.eligible(&user, None, &all)), vec!["global", "eu"]);
    }

    #[test]
    fn test_unknown_user_sees_only_global() {
        let filter = CampaignFilter::default();
        let all = campaigns();
        let user = UserProfile::new("u3");
        assert_eq!(ids(&filter.eligible(&user, None, &all)), vec!["global"]);
    }

    #[test]
    fn test_session_and_fallback_used() {
        let fallback: FallbackCountries = [("demo", "CA")].into_iter().collect();
        let filter = CampaignFilter::new(GeoTargetingConfig::default(), fallback);
        let all = campaigns();

        let user = UserProfile::new("demo");
        assert_eq!(ids(&filter.eligible(&user, None, &all)), vec!["global", "na"]);

        let session = SessionContext {
            country: Some("France".to_string()),
        };
        assert_eq!(
            ids(&filter.eligible(&user, Some(&session), &all)),
            vec!["global", "eu"]
        );
    }

    #[test]
    fn test_decide_all_keeps_every_campaign() {
        let filter = CampaignFilter::new(
            GeoTargetingConfig::default().with_log_decisions(false),
            FallbackCountries::new(),
        );
        let all = campaigns();
        let decisions = filter.decide_all(&UserProfile::new("u4").with_country("Brazil"), None, &all);
        assert_eq!(decisions.len(), 3);
        assert_eq!(decisions[0].1, TargetingDecision::Global);
        assert_eq!(decisions[1].1, TargetingDecision::NoMatch);
        assert_eq!(decisions[2].1, TargetingDecision::NoMatch);
    }

    #[test]
    fn test_campaign_deserialize_defaults() {
        let campaign: Campaign = serde_json::from_str(r#"{"id": "c1"}"#).unwrap();
        assert!(campaign.is_global());
        assert!(!campaign.boosted);
        assert_eq!(campaign.decide(None), TargetingDecision::Global);
    }

    #[test]
    fn test_render_decision() {
        let mut campaign = Campaign::new("c2").with_countries(["US"]);
        assert_eq!(
            campaign.render_decision(&campaign.decide(Some("France"))),
            "c2: skip - no match"
        );
        campaign.title = "Summer stays".to_string();
        assert_eq!(
            campaign.render_decision(&campaign.decide(None)),
            "c2 (Summer stays): skip - no country on user record"
        );
    }
}
