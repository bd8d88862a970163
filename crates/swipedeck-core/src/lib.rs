pub mod config;
pub mod deck;
pub mod error;

pub use config::{AppConfig, CarouselConfig, EasingType};
pub use deck::{Card, Deck, UserIdentity};
pub use error::{Error, Result};
