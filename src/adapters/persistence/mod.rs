//! Local storage adapters.

pub mod fs_scratch;

pub use fs_scratch::FsScratch;
