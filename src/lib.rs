pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod finder;
pub mod package;
pub mod repository;
pub mod ui;

pub use error::{ReleaseError, Result};
