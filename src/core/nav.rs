use crate::config::site_config::{FooterConfig, NavConfig};
use crate::domain::ports::Page;

/// Last path segment, falling back to the configured default page.
pub fn current_page<'a>(path: &'a str, default_page: &'a str) -> &'a str {
    match path.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment,
        _ => default_page,
    }
}

/// Marks nav links that point at the current page. Returns how many matched.
pub fn mark_active_links<P: Page + ?Sized>(page: &mut P, config: &NavConfig) -> usize {
    let path = page.current_path();
    let current = current_page(&path, &config.default_page);

    let mut marked = 0;
    for link in page.query_all(&config.link_selector) {
        if page.attribute(&link, "href").as_deref() == Some(current) {
            page.set_class(&link, &config.active_class, true);
            marked += 1;
        }
    }
    marked
}

/// Replaces the first placeholder year in each copyright element.
pub fn stamp_copyright<P: Page + ?Sized>(page: &mut P, config: &FooterConfig, year: i32) -> usize {
    let mut stamped = 0;
    for el in page.query_all(&config.copyright_selector) {
        let Some(text) = page.text(&el) else { continue };
        if text.contains(&config.copyright_placeholder) {
            let updated = text.replacen(&config.copyright_placeholder, &year.to_string(), 1);
            page.set_text(&el, &updated);
            stamped += 1;
        }
    }
    stamped
}
