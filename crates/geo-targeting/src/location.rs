//! Resolution of a user's country from the records available to a request.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;

/// The parts of a user profile relevant to targeting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub country: Option<String>,
}

impl UserProfile {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            country: None,
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }
}

/// Location data attached to the current session, e.g. from sign-in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    #[serde(default)]
    pub country: Option<String>,
}

/// Static country assignments keyed by user id, used for seeded and demo users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FallbackCountries {
    entries: HashMap<String, String>,
}

impl FallbackCountries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON object of `{ "<user id>": "<country>" }`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)?;
        let table: Self = serde_json::from_str(&data)?;
        info!("Loaded {} fallback countries from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn insert(&mut self, user_id: impl Into<String>, country: impl Into<String>) {
        self.entries.insert(user_id.into(), country.into());
    }

    pub fn get(&self, user_id: &str) -> Option<&str> {
        self.entries.get(user_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FallbackCountries {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Where a resolved country came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountrySource {
    Profile,
    Session,
    Fallback,
}

/// Resolve a user's country.
///
/// Precedence: profile field, then session, then the fallback table keyed by
/// user id. Blank values are skipped.
pub fn resolve_user_country<'a>(
    profile: &'a UserProfile,
    session: Option<&'a SessionContext>,
    fallback: &'a FallbackCountries,
) -> Option<(&'a str, CountrySource)> {
    let resolved = non_blank(profile.country.as_deref())
        .map(|c| (c, CountrySource::Profile))
        .or_else(|| {
            non_blank(session.and_then(|s| s.country.as_deref()))
                .map(|c| (c, CountrySource::Session))
        })
        .or_else(|| non_blank(fallback.get(&profile.id)).map(|c| (c, CountrySource::Fallback)));

    match resolved {
        Some((country, source)) => {
            debug!(user = %profile.id, ?source, "Resolved user country {}", country)
        }
        None => debug!(user = %profile.id, "No country for user"),
    }

    resolved
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fallback() -> FallbackCountries {
        [("demo-1", "Japan"), ("demo-2", "  ")].into_iter().collect()
    }

    #[test]
    fn test_profile_wins() {
        let profile = UserProfile::new("demo-1").with_country("Canada");
        let session = SessionContext {
            country: Some("FR".to_string()),
        };
        assert_eq!(
            resolve_user_country(&profile, Some(&session), &fallback()),
            Some(("Canada", CountrySource::Profile))
        );
    }

    #[test]
    fn test_session_before_fallback() {
        let profile = UserProfile::new("demo-1").with_country(" ");
        let session = SessionContext {
            country: Some(" FR ".to_string()),
        };
        assert_eq!(
            resolve_user_country(&profile, Some(&session), &fallback()),
            Some(("FR", CountrySource::Session))
        );
    }

    #[test]
    fn test_fallback_table() {
        let profile = UserProfile::new("demo-1");
        assert_eq!(
            resolve_user_country(&profile, None, &fallback()),
            Some(("Japan", CountrySource::Fallback))
        );
    }

    #[test]
    fn test_nothing_known() {
        let table = fallback();
        assert_eq!(resolve_user_country(&UserProfile::new("demo-2"), None, &table), None);
        assert_eq!(resolve_user_country(&UserProfile::new("stranger"), None, &table), None);
        let empty_session = SessionContext::default();
        assert_eq!(
            resolve_user_country(&UserProfile::new("stranger"), Some(&empty_session), &table),
            None
        );
    }

    #[test]
    fn test_fallback_from_path() {
        let path = std::env::temp_dir().join(format!("geo-fallback-{}.json", std::process::id()));
        fs::write(&path, r#"{"u1": "Germany", "u2": "BR"}"#).unwrap();

        let table = FallbackCountries::from_path(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("u1"), Some("Germany"));
        assert_eq!(table.get("u3"), None);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_fallback_from_missing_path() {
        assert!(FallbackCountries::from_path("/nonexistent/geo-fallback.json").is_err());
    }

    #[test]
    fn test_profile_deserialize_without_country() {
        let profile: UserProfile = serde_json::from_str(r#"{"id": "u9"}"#).unwrap();
        assert_eq!(profile, UserProfile::new("u9"));
    }
}
