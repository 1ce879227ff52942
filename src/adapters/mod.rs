// Adapters layer: concrete page, storage and clipboard implementations behind the domain ports.

pub mod clipboard;
pub mod headless_page;
pub mod storage;

pub use clipboard::{FailingClipboard, MemoryClipboard};
pub use headless_page::{Element, HeadlessPage};
pub use storage::{FileStore, MemoryStore};
