//! Telegram Bot API adapters. Implement BotGateway.

pub mod bot_api;
pub mod dry_run;

pub use bot_api::BotApiGateway;
pub use dry_run::DryRunGateway;
