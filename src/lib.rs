pub mod bot;
pub mod config;
pub mod handlers;
pub mod keyboard;
pub mod localization;
pub mod membership;
pub mod utils;
pub mod verification;
