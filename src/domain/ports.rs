use crate::domain::model::{Bounds, FormSubmission, Handoff, ScrollBlock};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Element handle as understood by a `Page`.
pub type ElementId = String;

/// The rendered document. Selectors are simple: `tag`, `#id`, `.class`,
/// `[attr]` and `[attr=value]`, combinable within one compound.
pub trait Page {
    fn query_all(&self, selector: &str) -> Vec<ElementId>;

    fn query(&self, selector: &str) -> Option<ElementId> {
        self.query_all(selector).into_iter().next()
    }

    fn descendants(&self, root: &str) -> Vec<ElementId>;
    fn parent(&self, element: &str) -> Option<ElementId>;
    fn tag(&self, element: &str) -> Option<String>;

    fn has_class(&self, element: &str, class: &str) -> bool;
    fn set_class(&mut self, element: &str, class: &str, present: bool);
    /// Replaces the whole class list.
    fn set_class_list(&mut self, element: &str, classes: &str);

    fn attribute(&self, element: &str, name: &str) -> Option<String>;
    fn set_attribute(&mut self, element: &str, name: &str, value: &str);

    fn text(&self, element: &str) -> Option<String>;
    fn set_text(&mut self, element: &str, text: &str);

    fn value(&self, element: &str) -> Option<String>;
    fn set_value(&mut self, element: &str, value: &str);
    fn set_disabled(&mut self, element: &str, disabled: bool);
    /// Clears every control below `form`.
    fn reset_form(&mut self, form: &str);
    fn focus(&mut self, element: &str);

    fn bounds(&self, element: &str) -> Option<Bounds>;
    fn viewport_height(&self) -> f64;
    /// Records where the visitor scrolled to.
    fn set_scroll_y(&mut self, offset_y: f64);
    fn scroll_into_view(&mut self, element: &str, block: ScrollBlock);
    fn scroll_to_top(&mut self);

    fn current_path(&self) -> String;
    fn navigate(&mut self, location: &str);
    fn alert(&mut self, text: &str);
    fn print(&mut self);
}

/// Durable string store scoped to the site origin.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// The boundary a validated contact request crosses.
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, submission: &FormSubmission) -> Result<Handoff>;
}

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<()>;
}
