use std::fmt;

use crate::utils::fmt_number;

/// Edge weight: a number when the text parses as one, otherwise a free-form label.
#[derive(Debug, Clone, PartialEq)]
pub enum Weight {
    Number(f64),
    Label(String),
}

impl Weight {
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => Self::Number(v),
            _ => Self::Label(text.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Label(_) => None,
        }
    }
}

impl Default for Weight {
    fn default() -> Self {
        Self::Number(0.0)
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => f.write_str(&fmt_number(*v)),
            Self::Label(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Weight {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Weight {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for Weight {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for Weight {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}
