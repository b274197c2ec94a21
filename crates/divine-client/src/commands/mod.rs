pub mod deck;
pub mod messaging;
pub mod settings;
