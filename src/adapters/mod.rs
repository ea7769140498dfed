//! Infrastructure adapters. Implement ports.
//!
//! Telegram Bot API, scratch filesystem, terminal UI. Map errors to DomainError.

pub mod persistence;
pub mod telegram;
pub mod ui;
