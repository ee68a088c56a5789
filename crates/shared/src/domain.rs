use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(DealId);

/// Fixed set of target sites an operator can authenticate against.
///
/// Static configuration: the selectable sites are known ahead of time and
/// carry the wire identifier the endpoint expects plus a display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Site {
    #[serde(rename = "fo1.altius.finance")]
    Fo1,
    #[serde(rename = "fo2.altius.finance")]
    Fo2,
}

impl Site {
    pub const ALL: [Site; 2] = [Site::Fo1, Site::Fo2];

    /// Wire identifier sent as the `website` field.
    pub fn identifier(self) -> &'static str {
        match self {
            Site::Fo1 => "fo1.altius.finance",
            Site::Fo2 => "fo2.altius.finance",
        }
    }

    /// Human-readable label for selectors and logs.
    pub fn label(self) -> &'static str {
        match self {
            Site::Fo1 => "FO1 (fo1.altius.finance)",
            Site::Fo2 => "FO2 (fo2.altius.finance)",
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported website: {0}")]
pub struct UnknownSite(pub String);

impl FromStr for Site {
    type Err = UnknownSite;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Site::ALL
            .into_iter()
            .find(|site| site.identifier() == s)
            .ok_or_else(|| UnknownSite(s.to_string()))
    }
}

/// A financial opportunity record returned by the crawler service.
///
/// Upstream sites expose these with loosely populated metadata, so every
/// field beyond id/title is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub id: DealId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_ticket: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_site_identifiers() {
        assert_eq!("fo1.altius.finance".parse::<Site>(), Ok(Site::Fo1));
        assert_eq!("fo2.altius.finance".parse::<Site>(), Ok(Site::Fo2));
    }

    #[test]
    fn rejects_unknown_site_identifier() {
        let err = "fo3.altius.finance".parse::<Site>().unwrap_err();
        assert_eq!(err, UnknownSite("fo3.altius.finance".to_string()));
        assert_eq!(err.to_string(), "unsupported website: fo3.altius.finance");
    }

    #[test]
    fn every_site_label_names_its_identifier() {
        for site in Site::ALL {
            assert!(site.label().contains(site.identifier()));
        }
    }
}
