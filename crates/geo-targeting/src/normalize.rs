//! Country normalization helpers.

use serde::{Deserialize, Serialize};

use crate::countries;

/// Canonical form of a raw country identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedCountry {
    /// Full country name, if the input was a known name or a known code.
    pub name: Option<String>,
    /// ISO alpha-2 code, if the input looked like a code or was a known name.
    pub code: Option<String>,
    /// Trimmed, lowercased input. Empty when the input was blank.
    pub normalized: String,
}

impl NormalizedCountry {
    /// True when nothing was supplied.
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}

impl From<&str> for NormalizedCountry {
    fn from(raw: &str) -> Self {
        normalize_str(raw)
    }
}

/// Normalize an optional country identifier. `None` behaves like "".
pub fn normalize(raw: Option<&str>) -> NormalizedCountry {
    raw.map(normalize_str).unwrap_or_default()
}

/// Normalize a country identifier.
///
/// Two-character input is treated as an ISO code and always keeps the
/// uppercased code, known or not. Anything longer or shorter is treated as a
/// name and looked up case-insensitively; unknown names are kept as typed.
pub fn normalize_str(raw: &str) -> NormalizedCountry {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return NormalizedCountry::default();
    }

    let normalized = trimmed.to_lowercase();

    if trimmed.chars().count() == 2 {
        let code = trimmed.to_uppercase();
        let name = countries::country_name(&code).map(str::to_string);
        return NormalizedCountry {
            name,
            code: Some(code),
            normalized,
        };
    }

    match countries::canonical_entry(trimmed) {
        Some((name, code)) => NormalizedCountry {
            name: Some(name.to_string()),
            code: Some(code.to_string()),
            normalized,
        },
        None => NormalizedCountry {
            name: Some(trimmed.to_string()),
            code: None,
            normalized,
        },
    }
}
