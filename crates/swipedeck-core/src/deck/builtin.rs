//! Built-in sample deck used when no deck file is configured.

use super::models::{Card, Deck, UserIdentity};

impl Deck {
    /// The bundled three-card deck
    pub fn builtin() -> Self {
        let cards = vec![
            Card {
                id: "1".to_string(),
                image_url:
                    "https://images.unsplash.com/photo-1517841905240-472988babdf9?auto=format&fit=crop&q=80&w=800"
                        .to_string(),
                owner: UserIdentity {
                    name: "Sarah".to_string(),
                    avatar_url: "https://i.pravatar.cc/150?u=sarah".to_string(),
                },
            },
            Card {
                id: "2".to_string(),
                image_url:
                    "https://images.unsplash.com/photo-1539571696357-5a69c17a67c6?auto=format&fit=crop&q=80&w=800"
                        .to_string(),
                owner: UserIdentity {
                    name: "James".to_string(),
                    avatar_url: "https://i.pravatar.cc/150?u=james".to_string(),
                },
            },
            Card {
                id: "3".to_string(),
                image_url:
                    "https://images.unsplash.com/photo-1524504388940-b1c1722653e1?auto=format&fit=crop&q=80&w=800"
                        .to_string(),
                owner: UserIdentity {
                    name: "Emma".to_string(),
                    avatar_url: "https://i.pravatar.cc/150?u=emma".to_string(),
                },
            },
        ];

        Self::new(cards).expect("builtin deck is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_deck() {
        let deck = Deck::builtin();
        assert_eq!(deck.len(), 3);
        assert_eq!(deck.get(0).unwrap().owner.name, "Sarah");
    }
}
