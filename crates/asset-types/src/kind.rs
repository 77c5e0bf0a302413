//! Asset kinds

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of user-facing asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    /// Metric file (versioned)
    #[serde(rename = "metric_file")]
    Metric,
    /// Dashboard file (versioned)
    #[serde(rename = "dashboard_file")]
    Dashboard,
    /// Report file (versioned)
    #[serde(rename = "report_file")]
    Report,
    /// Chat thread
    #[serde(rename = "chat")]
    Chat,
    /// Collection of assets
    #[serde(rename = "collection")]
    Collection,
}

impl AssetKind {
    /// All kinds, versioned first
    pub const ALL: [AssetKind; 5] = [
        AssetKind::Metric,
        AssetKind::Dashboard,
        AssetKind::Report,
        AssetKind::Chat,
        AssetKind::Collection,
    ];

    /// Wire name
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Metric => "metric_file",
            AssetKind::Dashboard => "dashboard_file",
            AssetKind::Report => "report_file",
            AssetKind::Chat => "chat",
            AssetKind::Collection => "collection",
        }
    }

    /// Whether this kind carries a version history
    #[inline]
    #[must_use]
    pub const fn is_versioned(&self) -> bool {
        matches!(
            self,
            AssetKind::Metric | AssetKind::Dashboard | AssetKind::Report
        )
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseError::new("asset kind", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versioned_kinds() {
        assert!(AssetKind::Metric.is_versioned());
        assert!(AssetKind::Dashboard.is_versioned());
        assert!(AssetKind::Report.is_versioned());
        assert!(!AssetKind::Chat.is_versioned());
        assert!(!AssetKind::Collection.is_versioned());
    }

    #[test]
    fn wire_names_match_serde() {
        for kind in AssetKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            assert_eq!(kind.as_str().parse::<AssetKind>().unwrap(), kind);
        }
    }

    #[test]
    fn rejects_unknown_kind() {
        assert!("metric".parse::<AssetKind>().is_err());
        assert!("METRIC_FILE".parse::<AssetKind>().is_err());
    }
}
