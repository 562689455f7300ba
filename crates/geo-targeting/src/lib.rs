//! Country normalization and campaign geo-targeting.
//!
//! Country identifiers arrive as full names or ISO alpha-2 codes with
//! arbitrary casing and whitespace. This crate normalizes them against a
//! static table and decides whether a user falls inside a campaign's target
//! countries.
//!
//! # Example
//!
//! ```rust
//! use geo_targeting::{evaluate, is_targeted, TargetingDecision};
//!
//! assert!(is_targeted(Some("United States"), &["US"]));
//! assert!(!is_targeted(Some("France"), &["US", "GB"]));
//!
//! let no_targets: &[&str] = &[];
//! assert_eq!(evaluate(Some("France"), no_targets), TargetingDecision::Global);
//! ```

pub mod campaign;
pub mod config;
pub mod countries;
pub mod decision;
pub mod error;
pub mod location;
pub mod matcher;
pub mod normalize;

pub use campaign::{Campaign, CampaignFilter};
pub use config::GeoTargetingConfig;
pub use countries::{country_code, country_name, is_known_code};
pub use decision::{evaluate, evaluate_with, log_decision, TargetingDecision};
pub use error::{GeoTargetingError, Result};
pub use location::{resolve_user_country, CountrySource, FallbackCountries, SessionContext, UserProfile};
pub use matcher::{find_match, is_targeted, MatchRule, TargetMatch, TargetMatcher};
pub use normalize::{normalize, normalize_str, NormalizedCountry};
