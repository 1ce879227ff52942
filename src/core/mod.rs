pub mod contact_form;
pub mod dispatcher;
pub mod mailto;
pub mod nav;
pub mod reveal;
pub mod runtime;
pub mod scroll;
pub mod theme;

pub use crate::domain::model::{EventOutcome, FormSubmission, PageEvent};
pub use crate::domain::ports::{Clipboard, KeyValueStore, Page, Submitter};
pub use crate::utils::error::Result;
