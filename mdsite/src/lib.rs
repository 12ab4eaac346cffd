//! Library side of mdsite, shared by the binary and the integration tests.
pub mod cli;
pub mod config;
pub mod error;
pub mod index;
pub mod page;
pub mod paths;
pub mod walker;

pub use crate::{
  config::Config,
  error::SiteError,
  walker::{BuildSummary, build_site},
};
