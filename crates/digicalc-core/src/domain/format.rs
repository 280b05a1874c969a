//! Rendering of evaluation results.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

/// How a numeric result is written to the display surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultFormat {
    /// Always shows a fractional part: `11.0`, `0.5`, `1e21`.
    #[default]
    Decimal,
    /// Shortest form: `11`, `0.5`.
    Compact,
}

impl ResultFormat {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Decimal => "decimal",
            Self::Compact => "compact",
        }
    }

    pub fn format(self, value: f64) -> String {
        // never show "-0"
        let value = if value == 0.0 { 0.0 } else { value };
        match self {
            Self::Decimal => format!("{value:?}"),
            Self::Compact => format!("{value}"),
        }
    }
}

impl fmt::Display for ResultFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResultFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "decimal" => Ok(Self::Decimal),
            "compact" => Ok(Self::Compact),
            other => Err(DomainError::InvalidSetting {
                setting: "result format",
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_keeps_fractional_part() {
        assert_eq!(ResultFormat::Decimal.format(11.0), "11.0");
        assert_eq!(ResultFormat::Decimal.format(120.0), "120.0");
        assert_eq!(ResultFormat::Decimal.format(0.25), "0.25");
    }

    #[test]
    fn compact_drops_trailing_zero() {
        assert_eq!(ResultFormat::Compact.format(11.0), "11");
        assert_eq!(ResultFormat::Compact.format(-2.5), "-2.5");
    }

    #[test]
    fn negative_zero_prints_as_zero() {
        assert_eq!(ResultFormat::Decimal.format(-0.0), "0.0");
        assert_eq!(ResultFormat::Compact.format(-0.0), "0");
    }

    #[test]
    fn parses_names() {
        assert_eq!("COMPACT".parse::<ResultFormat>().unwrap(), ResultFormat::Compact);
        assert!("hex".parse::<ResultFormat>().is_err());
    }
}
