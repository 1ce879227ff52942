use crate::config::site_config::ThemeConfig;
use crate::domain::model::DarkModePreference;
use crate::domain::ports::{KeyValueStore, Page};

/// Reads the saved preference. Storage trouble means "off".
pub fn load_preference<K: KeyValueStore + ?Sized>(store: &K, config: &ThemeConfig) -> DarkModePreference {
    match store.get(&config.storage_key) {
        Ok(value) => DarkModePreference::from_stored(value.as_deref()),
        Err(e) => {
            tracing::warn!("Could not read dark mode preference: {}", e);
            DarkModePreference::default()
        }
    }
}

/// Load-time application: only ever adds the class, so markup that ships
/// with it keeps it.
pub fn apply<P: Page + ?Sized>(page: &mut P, body_selector: &str, preference: DarkModePreference, config: &ThemeConfig) {
    if preference.enabled() {
        set_body_class(page, body_selector, true, config);
    }
}

fn set_body_class<P: Page + ?Sized>(page: &mut P, body_selector: &str, present: bool, config: &ThemeConfig) {
    if let Some(body) = page.query(body_selector) {
        page.set_class(&body, &config.class, present);
    }
}

/// Flips the preference, updates the body class and saves the result.
pub fn toggle<P, K>(
    page: &mut P,
    store: &mut K,
    body_selector: &str,
    current: DarkModePreference,
    config: &ThemeConfig,
) -> DarkModePreference
where
    P: Page + ?Sized,
    K: KeyValueStore + ?Sized,
{
    let next = current.toggled();
    set_body_class(page, body_selector, next.enabled(), config);

    if let Err(e) = store.set(&config.storage_key, next.as_stored()) {
        tracing::warn!("Could not save dark mode preference: {}", e);
    }
    tracing::info!("Dark mode {}", if next.enabled() { "enabled" } else { "disabled" });
    next
}
