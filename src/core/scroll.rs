use crate::domain::ports::Page;

/// A class that is present exactly when the last scroll offset was past a threshold.
#[derive(Debug, Clone)]
pub struct ThresholdToggle {
    selector: String,
    class: String,
    threshold: f64,
    active: bool,
}

impl ThresholdToggle {
    pub fn new(selector: impl Into<String>, class: impl Into<String>, threshold: f64) -> Self {
        Self {
            selector: selector.into(),
            class: class.into(),
            threshold,
            active: false,
        }
    }

    /// Strictly greater than the threshold turns the class on.
    pub fn evaluate<P: Page + ?Sized>(&mut self, page: &mut P, offset_y: f64) -> bool {
        self.active = offset_y > self.threshold;
        if let Some(target) = page.query(&self.selector) {
            page.set_class(&target, &self.class, self.active);
        }
        self.active
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// In-page anchor target for an `href`, or `None` when the browser should
/// follow the link itself.
pub fn anchor_target(href: &str) -> Option<&str> {
    if href.starts_with('#') && href != "#" {
        Some(href)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_target() {
        assert_eq!(anchor_target("#about"), Some("#about"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target(""), None);
        assert_eq!(anchor_target("projects.html"), None);
        assert_eq!(anchor_target("https://github.com/#readme"), None);
    }
}
