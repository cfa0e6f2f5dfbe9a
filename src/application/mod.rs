//! Application layer - use-case handlers and the card service facade.

mod card_service;
pub mod handlers;

pub use card_service::CardService;
