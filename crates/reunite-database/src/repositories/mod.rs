//! Repository implementations for the Reunite entities.

pub mod refresh_token;
pub mod user;

pub use refresh_token::RefreshTokenRepository;
pub use user::UserRepository;
