//! Report letterhead (kop laporan) models

use serde::{Deserialize, Serialize};

/// Horizontal alignment of the letterhead block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LetterheadAlignment {
    Left,
    #[default]
    Center,
    Right,
}

/// Scope a letterhead config applies to: the global default or one
/// report type's override.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LetterheadScope {
    Global,
    Report(String),
}

impl LetterheadScope {
    /// Wire spelling of the scope (`"global"` or the report type name)
    pub fn as_str(&self) -> &str {
        match self {
            Self::Global => "global",
            Self::Report(name) => name,
        }
    }

    pub fn from_wire(value: &str) -> Self {
        match value.trim() {
            "" | "global" => Self::Global,
            name => Self::Report(name.to_string()),
        }
    }
}

impl Serialize for LetterheadScope {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LetterheadScope {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&raw))
    }
}

/// Configurable header block applied to generated reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetterheadConfig {
    pub scope: LetterheadScope,
    /// Institution text lines, rendered top to bottom
    pub lines: Vec<String>,
    pub logo_left: Option<i64>,
    pub logo_right: Option<i64>,
    #[serde(default)]
    pub alignment: LetterheadAlignment,
}

impl LetterheadConfig {
    /// Empty global default
    pub fn global_default() -> Self {
        Self {
            scope: LetterheadScope::Global,
            lines: Vec::new(),
            logo_left: None,
            logo_right: None,
            alignment: LetterheadAlignment::default(),
        }
    }
}

/// Stored letterhead image metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LetterheadImage {
    pub id: i64,
    pub filename: String,
    pub size: usize,
    pub format: String,
    pub width: u32,
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_wire_roundtrip() {
        assert_eq!(LetterheadScope::from_wire("global"), LetterheadScope::Global);
        assert_eq!(LetterheadScope::from_wire(""), LetterheadScope::Global);
        assert_eq!(
            LetterheadScope::from_wire("rekap_bulanan"),
            LetterheadScope::Report("rekap_bulanan".into())
        );
        let json = serde_json::to_string(&LetterheadScope::Report("rekap_bulanan".into())).unwrap();
        assert_eq!(json, "\"rekap_bulanan\"");
        let parsed: LetterheadScope = serde_json::from_str("\"global\"").unwrap();
        assert_eq!(parsed, LetterheadScope::Global);
    }

    #[test]
    fn config_defaults() {
        let config = LetterheadConfig::global_default();
        assert_eq!(config.alignment, LetterheadAlignment::Center);
        assert!(config.lines.is_empty());
    }
}
