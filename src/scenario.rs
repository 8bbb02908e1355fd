use crate::card::{CardType, Deck, DeckError, DeckSize, SuccessCriteria};
use crate::engine::mulligan::MAX_MULLIGANS;
use crate::engine::CalcRequest;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Deck error: {0}")]
    Deck(#[from] DeckError),
    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),
}

fn default_hand_size() -> u32 {
    7
}

fn default_mulligans() -> u32 {
    2
}

fn default_extra_draws() -> u32 {
    3
}

/// Everything the calculator needs, as loaded from a JSON file or the
/// command line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub deck_size: DeckSize,
    /// Untracked cards, only read for a custom deck size
    #[serde(default)]
    pub other_cards: Option<u32>,
    pub cards: Vec<CardType>,
    #[serde(default = "default_hand_size")]
    pub hand_size: u32,
    #[serde(default = "default_mulligans")]
    pub mulligans: u32,
    #[serde(default = "default_extra_draws")]
    pub extra_draws: u32,
}

impl Scenario {
    /// Load a scenario from a JSON file
    pub fn from_file(path: &str) -> Result<Self, ScenarioError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = serde_json::from_str(content)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// At least one tracked card type is required, and at most
    /// `MAX_MULLIGANS` mulligans
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.cards.is_empty() {
            return Err(ScenarioError::InvalidScenario(
                "at least one card type must be tracked".to_string(),
            ));
        }
        if self.mulligans > MAX_MULLIGANS {
            return Err(ScenarioError::InvalidScenario(format!(
                "at most {} mulligans are supported, got {}",
                MAX_MULLIGANS, self.mulligans
            )));
        }
        Ok(())
    }

    pub fn deck(&self) -> Result<Deck, DeckError> {
        self.deck_size.build_deck(&self.cards, self.other_cards)
    }

    pub fn criteria(&self) -> SuccessCriteria {
        SuccessCriteria::from_card_types(&self.cards)
    }

    pub fn card(&self, name: &str) -> Option<&CardType> {
        self.cards.iter().find(|c| c.name == name)
    }

    /// Same scenario with one tracked type's deck count replaced
    pub fn with_count(&self, name: &str, count: u32) -> Result<Self, ScenarioError> {
        let mut scenario = self.clone();
        let card = scenario
            .cards
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| {
                ScenarioError::InvalidScenario(format!("no tracked card type named '{}'", name))
            })?;
        card.count = count;
        Ok(scenario)
    }

    pub fn request(&self) -> Result<CalcRequest, ScenarioError> {
        self.validate()?;
        Ok(CalcRequest {
            deck: self.deck()?,
            criteria: self.criteria(),
            hand_size: self.hand_size,
            mulligans: self.mulligans,
            extra_draws: self.extra_draws,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let scenario = Scenario::from_json(r#"{"cards": [{"name": "Lands", "count": 24, "required": 3}]}"#)
            .expect("should parse");
        assert_eq!(scenario.deck_size, DeckSize::Sixty);
        assert_eq!(scenario.hand_size, 7);
        assert_eq!(scenario.mulligans, 2);
        assert_eq!(scenario.extra_draws, 3);
        assert_eq!(scenario.other_cards, None);
    }

    #[test]
    fn test_required_defaults_to_zero() {
        let scenario = Scenario::from_json(
            r#"{"deck_size": "40", "cards": [{"name": "Lands", "count": 17}]}"#,
        )
        .expect("should parse");
        assert_eq!(scenario.cards[0].required, 0);
        assert!(scenario.criteria().is_empty());
    }

    #[test]
    fn test_empty_cards_rejected() {
        let result = Scenario::from_json(r#"{"cards": []}"#);
        assert!(matches!(result, Err(ScenarioError::InvalidScenario(_))));
    }

    #[test]
    fn test_too_many_mulligans_rejected() {
        let result = Scenario::from_json(
            r#"{"mulligans": 4294967295, "cards": [{"name": "Lands", "count": 24, "required": 3}]}"#,
        );
        assert!(matches!(result, Err(ScenarioError::InvalidScenario(_))));

        let at_limit = Scenario::from_json(
            r#"{"mulligans": 20, "cards": [{"name": "Lands", "count": 24, "required": 3}]}"#,
        )
        .expect("should parse");
        let calc = at_limit.request().expect("valid request").run().expect("fits");
        assert_eq!(calc.mulligan_curve.len(), 21);
    }

    #[test]
    fn test_bad_json() {
        let result = Scenario::from_json(r#"{"cards": "#);
        assert!(matches!(result, Err(ScenarioError::JsonError(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = Scenario::from_file("scenarios/does-not-exist.json");
        assert!(matches!(result, Err(ScenarioError::IoError(_))));
    }

    #[test]
    fn test_request_builds_deck() {
        let scenario = Scenario::from_json(
            r#"{"deck_size": "100", "cards": [{"name": "Lands", "count": 17, "required": 3}]}"#,
        )
        .expect("should parse");
        let request = scenario.request().expect("valid request");
        assert_eq!(request.deck.total(), 100);
        assert_eq!(request.deck.other_cards(), 83);
        assert_eq!(request.criteria.required("Lands"), 3);
    }

    #[test]
    fn test_request_rejects_full_deck() {
        let scenario = Scenario::from_json(
            r#"{"deck_size": "40", "cards": [{"name": "Lands", "count": 40, "required": 3}]}"#,
        )
        .expect("should parse");
        let result = scenario.request();
        assert!(matches!(
            result,
            Err(ScenarioError::Deck(DeckError::InvalidDeckComposition {
                tracked: 40,
                deck_size: 40
            }))
        ));
    }

    #[test]
    fn test_custom_deck_size() {
        let scenario = Scenario::from_json(
            r#"{"deck_size": "custom", "other_cards": 46, "cards": [{"name": "Lands", "count": 10, "required": 1}]}"#,
        )
        .expect("should parse");
        assert_eq!(scenario.deck().expect("valid deck").total(), 56);
    }

    #[test]
    fn test_with_count() {
        let scenario = Scenario::from_json(r#"{"cards": [{"name": "Lands", "count": 24, "required": 3}]}"#)
            .expect("should parse");
        let changed = scenario.with_count("Lands", 20).expect("known card");
        assert_eq!(changed.card("Lands").map(|c| c.count), Some(20));
        assert!(scenario.with_count("Dragons", 2).is_err());
    }
}
