use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The person a card belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Display name shown on the card
    pub name: String,
    /// Avatar image URL
    pub avatar_url: String,
}

/// A single card in the deck
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    /// Opaque identifier, unique within the deck
    pub id: String,
    /// Card image URL
    pub image_url: String,
    /// Owner identity
    pub owner: UserIdentity,
}

/// An ordered, immutable sequence of cards
///
/// Indices are stable for the lifetime of a session: no insertion or removal
/// happens after construction. Construction rejects empty decks so the
/// carousel never has to deal with undefined progress math.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

/// On-disk deck file layout (`[[card]]` array of tables)
#[derive(Debug, Deserialize)]
struct DeckFile {
    #[serde(default)]
    card: Vec<Card>,
}

impl Deck {
    /// Create a deck from a list of cards
    ///
    /// Fails fast on an empty list, duplicate ids, or unparseable image URLs.
    pub fn new(cards: Vec<Card>) -> Result<Self> {
        if cards.is_empty() {
            return Err(Error::EmptyDeck);
        }

        let mut seen = HashSet::new();
        for card in &cards {
            if !seen.insert(card.id.as_str()) {
                return Err(Error::Deck(format!("duplicate card id: {}", card.id)));
            }
            if url::Url::parse(&card.image_url).is_err() {
                return Err(Error::InvalidImageUrl(card.image_url.clone()));
            }
        }

        Ok(Self { cards })
    }

    /// Load a deck from a TOML file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a deck from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: DeckFile =
            toml::from_str(content).map_err(|e| Error::Deck(e.to_string()))?;
        Self::new(file.card)
    }

    /// Number of cards in the deck
    #[inline]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// A deck is never empty once constructed
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Get a card by index
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Iterate over cards in order
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str) -> Card {
        Card {
            id: id.to_string(),
            image_url: format!("https://example.com/{}.jpg", id),
            owner: UserIdentity {
                name: format!("user-{}", id),
                avatar_url: format!("https://example.com/{}-avatar.jpg", id),
            },
        }
    }

    #[test]
    fn test_empty_deck_rejected() {
        assert!(matches!(Deck::new(Vec::new()), Err(Error::EmptyDeck)));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Deck::new(vec![card("a"), card("a")]);
        assert!(matches!(result, Err(Error::Deck(_))));
    }

    #[test]
    fn test_invalid_image_url_rejected() {
        let mut bad = card("a");
        bad.image_url = "not a url".to_string();
        assert!(matches!(
            Deck::new(vec![bad]),
            Err(Error::InvalidImageUrl(_))
        ));
    }

    #[test]
    fn test_indices_are_stable() {
        let deck = Deck::new(vec![card("a"), card("b"), card("c")]).unwrap();
        assert_eq!(deck.len(), 3);
        assert_eq!(deck.get(0).unwrap().id, "a");
        assert_eq!(deck.get(2).unwrap().id, "c");
        assert!(deck.get(3).is_none());
    }

    #[test]
    fn test_from_toml_str() {
        let deck = Deck::from_toml_str(
            r#"
            [[card]]
            id = "1"
            image_url = "https://example.com/1.jpg"
            owner = { name = "Sarah", avatar_url = "https://example.com/sarah.jpg" }

            [[card]]
            id = "2"
            image_url = "https://example.com/2.jpg"
            owner = { name = "James", avatar_url = "https://example.com/james.jpg" }
            "#,
        )
        .unwrap();

        assert_eq!(deck.len(), 2);
        assert_eq!(deck.get(1).unwrap().owner.name, "James");
    }

    #[test]
    fn test_empty_toml_rejected() {
        assert!(matches!(Deck::from_toml_str(""), Err(Error::EmptyDeck)));
    }
}
