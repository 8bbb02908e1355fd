pub mod deck;
pub mod presets;
pub mod types;

pub use deck::{Deck, DeckError, MAX_TRACKED_TYPES, OTHER_CARDS};
pub use presets::DeckSize;
pub use types::{CardType, CardTypeParseError, SuccessCriteria};
