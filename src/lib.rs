pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{FailingClipboard, FileStore, HeadlessPage, MemoryClipboard, MemoryStore};
pub use crate::config::{Scenario, SiteConfig};
pub use crate::core::{dispatcher::Dispatcher, mailto::MailClientHandoff, runtime::SiteRuntime};
pub use crate::domain::model::{EventOutcome, FormSubmission, PageEvent};
pub use crate::utils::error::{Result, SiteError, ValidationError};
