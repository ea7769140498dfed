//! tg-uploader: relay a local file to a Telegram chat as a document, with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
