use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A tracked card type: how many copies sit in the deck and how many
/// the opening hand needs to count as a success
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardType {
    pub name: String,
    pub count: u32,
    #[serde(default)]
    pub required: u32,
}

impl CardType {
    pub fn new(name: impl Into<String>, count: u32, required: u32) -> Self {
        CardType {
            name: name.into(),
            count,
            required,
        }
    }

    /// A requirement above the deck count can never be met
    pub fn is_reachable(&self) -> bool {
        self.required <= self.count
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.name, self.count, self.required)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CardTypeParseError {
    #[error("Expected format 'NAME:COUNT[:REQUIRED]', got '{0}'")]
    InvalidFormat(String),
    #[error("Card type name must not be empty")]
    EmptyName,
    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),
}

/// Parse "NAME:COUNT[:REQUIRED]", splitting from the right so names may
/// contain colons
impl FromStr for CardType {
    type Err = CardTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.rsplitn(3, ':').collect();
        let (name, count, required) = match parts.as_slice() {
            [required, count, name] => (*name, *count, Some(*required)),
            [count, name] => (*name, *count, None),
            _ => return Err(CardTypeParseError::InvalidFormat(s.to_string())),
        };

        let name = name.trim();
        if name.is_empty() {
            return Err(CardTypeParseError::EmptyName);
        }

        let parse = |value: &str| -> Result<u32, CardTypeParseError> {
            value
                .trim()
                .parse()
                .map_err(|_| CardTypeParseError::InvalidNumber(value.to_string()))
        };

        Ok(CardType {
            name: name.to_string(),
            count: parse(count)?,
            required: required.map(parse).transpose()?.unwrap_or(0),
        })
    }
}

/// Minimum copies per card type for a hand to count as a success.
/// Names that are absent carry no requirement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuccessCriteria {
    requirements: BTreeMap<String, u32>,
}

impl SuccessCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_card_types(types: &[CardType]) -> Self {
        types
            .iter()
            .map(|t| (t.name.clone(), t.required))
            .collect()
    }

    pub fn with(mut self, name: impl Into<String>, required: u32) -> Self {
        self.requirements.insert(name.into(), required);
        self
    }

    pub fn required(&self, name: &str) -> u32 {
        self.requirements.get(name).copied().unwrap_or(0)
    }

    /// Card types with a positive requirement, in name order
    pub fn active(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.requirements
            .iter()
            .filter(|(_, required)| **required > 0)
            .map(|(name, required)| (name.as_str(), *required))
    }

    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for SuccessCriteria {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        SuccessCriteria {
            requirements: iter
                .into_iter()
                .map(|(name, required)| (name.into(), required))
                .collect(),
        }
    }
}
