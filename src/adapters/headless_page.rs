use crate::domain::model::{Bounds, ScrollBlock};
use crate::domain::ports::{ElementId, Page};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

fn default_tag() -> String {
    "div".to_string()
}

fn default_path() -> String {
    "/".to_string()
}

fn default_viewport_height() -> f64 {
    800.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: String,
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default)]
    pub classes: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
    #[serde(default)]
    pub disabled: bool,
}

impl Element {
    pub fn new(id: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag: tag.into(),
            classes: BTreeSet::new(),
            attributes: BTreeMap::new(),
            text: String::new(),
            value: None,
            parent: None,
            bounds: None,
            disabled: false,
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_string());
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }

    pub fn child_of(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    pub fn at(mut self, top: f64, height: f64) -> Self {
        self.bounds = Some(Bounds { top, height });
        self
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        if name == "id" {
            Some(&self.id)
        } else {
            self.attributes.get(name).map(String::as_str)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScrollRecord {
    IntoView { element: String, block: ScrollBlock },
    ToTop,
}

/// A document model with no renderer, good enough to drive every page
/// behavior and to inspect the result afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlessPage {
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f64,
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub scroll_y: f64,
    #[serde(default)]
    pub focused: Option<String>,
    #[serde(default)]
    pub navigations: Vec<String>,
    #[serde(default)]
    pub alerts: Vec<String>,
    #[serde(default)]
    pub prints: usize,
    #[serde(default)]
    pub scrolls: Vec<ScrollRecord>,
}

impl Default for HeadlessPage {
    fn default() -> Self {
        Self::new("/")
    }
}

impl HeadlessPage {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            viewport_height: default_viewport_height(),
            elements: Vec::new(),
            scroll_y: 0.0,
            focused: None,
            navigations: Vec::new(),
            alerts: Vec::new(),
            prints: 0,
            scrolls: Vec::new(),
        }
    }

    pub fn with_viewport_height(mut self, height: f64) -> Self {
        self.viewport_height = height;
        self
    }

    /// Appends in document order. A repeated id replaces the earlier element.
    pub fn insert(&mut self, element: Element) -> &mut Self {
        match self.elements.iter_mut().find(|e| e.id == element.id) {
            Some(existing) => *existing = element,
            None => self.elements.push(element),
        }
        self
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    fn is_descendant_of(&self, element: &Element, root: &str) -> bool {
        let mut current = element.parent.as_deref();
        // Bounded walk so a malformed parent cycle cannot spin forever.
        for _ in 0..self.elements.len() {
            match current {
                Some(p) if p == root => return true,
                Some(p) => current = self.element(p).and_then(|e| e.parent.as_deref()),
                None => return false,
            }
        }
        false
    }
}

/// One compound selector: `tag#id.class[attr=value]`, every part optional.
#[derive(Debug, Default, PartialEq)]
struct SimpleSelector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, Option<String>)>,
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

impl SimpleSelector {
    fn parse(selector: &str) -> Option<Self> {
        let mut parsed = SimpleSelector::default();
        let mut rest = selector.trim();

        let tag_len = rest.find(|c: char| !is_ident_char(c)).unwrap_or(rest.len());
        if tag_len > 0 {
            parsed.tag = Some(rest[..tag_len].to_ascii_lowercase());
            rest = &rest[tag_len..];
        }

        while let Some(marker) = rest.chars().next() {
            rest = &rest[marker.len_utf8()..];
            match marker {
                '#' | '.' => {
                    let len = rest.find(|c: char| !is_ident_char(c)).unwrap_or(rest.len());
                    if len == 0 {
                        return None;
                    }
                    let ident = rest[..len].to_string();
                    if marker == '#' {
                        parsed.id = Some(ident);
                    } else {
                        parsed.classes.push(ident);
                    }
                    rest = &rest[len..];
                }
                '[' => {
                    let end = rest.find(']')?;
                    let body = &rest[..end];
                    let attribute = match body.split_once('=') {
                        Some((name, value)) => (
                            name.trim().to_string(),
                            Some(value.trim().trim_matches(|c| c == '"' || c == '\'').to_string()),
                        ),
                        None => (body.trim().to_string(), None),
                    };
                    parsed.attributes.push(attribute);
                    rest = &rest[end + 1..];
                }
                _ => return None,
            }
        }

        if parsed == SimpleSelector::default() {
            return None;
        }
        Some(parsed)
    }

    fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if !element.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if &element.id != id {
                return false;
            }
        }
        if !self.classes.iter().all(|c| element.classes.contains(c)) {
            return false;
        }
        self.attributes.iter().all(|(name, expected)| {
            match (element.attribute(name), expected) {
                (Some(actual), Some(expected)) => actual == expected,
                (Some(_), None) => true,
                (None, _) => false,
            }
        })
    }
}

impl Page for HeadlessPage {
    fn query_all(&self, selector: &str) -> Vec<ElementId> {
        let Some(parsed) = SimpleSelector::parse(selector) else {
            tracing::debug!(selector, "Unsupported selector");
            return Vec::new();
        };
        self.elements
            .iter()
            .filter(|e| parsed.matches(e))
            .map(|e| e.id.clone())
            .collect()
    }

    fn descendants(&self, root: &str) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|e| self.is_descendant_of(e, root))
            .map(|e| e.id.clone())
            .collect()
    }

    fn parent(&self, element: &str) -> Option<ElementId> {
        self.element(element)?.parent.clone()
    }

    fn tag(&self, element: &str) -> Option<String> {
        self.element(element).map(|e| e.tag.clone())
    }

    fn has_class(&self, element: &str, class: &str) -> bool {
        self.element(element).is_some_and(|e| e.classes.contains(class))
    }

    fn set_class(&mut self, element: &str, class: &str, present: bool) {
        if let Some(e) = self.element_mut(element) {
            if present {
                e.classes.insert(class.to_string());
            } else {
                e.classes.remove(class);
            }
        }
    }

    fn set_class_list(&mut self, element: &str, classes: &str) {
        if let Some(e) = self.element_mut(element) {
            e.classes = classes.split_whitespace().map(str::to_string).collect();
        }
    }

    fn attribute(&self, element: &str, name: &str) -> Option<String> {
        self.element(element)?.attribute(name).map(str::to_string)
    }

    fn set_attribute(&mut self, element: &str, name: &str, value: &str) {
        if let Some(e) = self.element_mut(element) {
            e.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn text(&self, element: &str) -> Option<String> {
        self.element(element).map(|e| e.text.clone())
    }

    fn set_text(&mut self, element: &str, text: &str) {
        if let Some(e) = self.element_mut(element) {
            e.text = text.to_string();
        }
    }

    fn value(&self, element: &str) -> Option<String> {
        self.element(element)?.value.clone()
    }

    fn set_value(&mut self, element: &str, value: &str) {
        if let Some(e) = self.element_mut(element) {
            e.value = Some(value.to_string());
        }
    }

    fn set_disabled(&mut self, element: &str, disabled: bool) {
        if let Some(e) = self.element_mut(element) {
            e.disabled = disabled;
        }
    }

    fn reset_form(&mut self, form: &str) {
        let controls = self.descendants(form);
        for id in controls {
            if let Some(e) = self.element_mut(&id) {
                if e.value.is_some() {
                    e.value = Some(String::new());
                }
            }
        }
    }

    fn focus(&mut self, element: &str) {
        if self.element(element).is_some() {
            self.focused = Some(element.to_string());
        }
    }

    fn bounds(&self, element: &str) -> Option<Bounds> {
        self.element(element)?.bounds
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn set_scroll_y(&mut self, offset_y: f64) {
        self.scroll_y = offset_y;
    }

    fn scroll_into_view(&mut self, element: &str, block: ScrollBlock) {
        if let (ScrollBlock::Start, Some(bounds)) = (block, self.bounds(element)) {
            self.scroll_y = bounds.top.max(0.0);
        }
        self.scrolls.push(ScrollRecord::IntoView {
            element: element.to_string(),
            block,
        });
    }

    fn scroll_to_top(&mut self) {
        self.scroll_y = 0.0;
        self.scrolls.push(ScrollRecord::ToTop);
    }

    fn current_path(&self) -> String {
        self.path.clone()
    }

    fn navigate(&mut self, location: &str) {
        self.navigations.push(location.to_string());
    }

    fn alert(&mut self, text: &str) {
        self.alerts.push(text.to_string());
    }

    fn print(&mut self) {
        self.prints += 1;
    }
}
