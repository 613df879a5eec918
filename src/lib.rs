pub mod config;
pub mod epic;
pub mod global;
pub mod message;
pub mod relay;
pub mod telegram;
