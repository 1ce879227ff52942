use crate::adapters::HeadlessPage;
use crate::domain::model::PageEvent;
use crate::utils::error::{Result, SiteError};
use serde::Deserialize;
use std::path::Path;

/// A scripted visit: the document to start from and the events to replay on it.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    pub page: HeadlessPage,
    #[serde(default)]
    pub events: Vec<PageEvent>,
}

impl Scenario {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| SiteError::ConfigValidationError {
            field: "scenario".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scenario() {
        let scenario = Scenario::from_toml_str(
            r#"
name = "scroll and toggle"

[page]
path = "/index.html"
viewport_height = 600

[[page.elements]]
id = "body"
tag = "body"

[[page.elements]]
id = "nav"
tag = "nav"
classes = ["navbar"]

[[page.elements]]
id = "card"
classes = ["project-card"]
bounds = { top = 900, height = 200 }

[[events]]
type = "loaded"
path = "/index.html"

[[events]]
type = "scrolled"
offset_y = 400

[[events]]
type = "toggle_dark_mode"
"#,
        )
        .unwrap();

        assert_eq!(scenario.name.as_deref(), Some("scroll and toggle"));
        assert_eq!(scenario.page.elements.len(), 3);
        assert_eq!(scenario.page.elements[2].tag, "div");
        assert_eq!(scenario.page.viewport_height, 600.0);
        assert_eq!(scenario.events.len(), 3);
        assert_eq!(scenario.events[1], PageEvent::Scrolled { offset_y: 400.0 });
        assert_eq!(scenario.events[2], PageEvent::ToggleDarkMode);
    }

    #[test]
    fn test_scenario_requires_page() {
        assert!(Scenario::from_toml_str("[[events]]\ntype = \"toggle_dark_mode\"").is_err());
    }
}
