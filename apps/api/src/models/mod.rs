pub mod hotel;
pub mod news;
pub mod slide;
pub mod user;
