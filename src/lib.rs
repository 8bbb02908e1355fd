pub mod card;
pub mod engine;
pub mod report;
pub mod scenario;
pub mod sweep;


pub use card::{CardType, Deck, DeckError, DeckSize, SuccessCriteria, OTHER_CARDS};
pub use engine::{calculate_probabilities, CalcRequest, Calculation, CountOverflow};
pub use scenario::{Scenario, ScenarioError};
