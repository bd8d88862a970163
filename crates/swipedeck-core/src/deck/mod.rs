pub mod models;

mod builtin;

pub use models::{Card, Deck, UserIdentity};
