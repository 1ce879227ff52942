use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern compiles"));

const MAX_DELAY_MS: u64 = 60_000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub site: SiteSection,
    pub contact: ContactConfig,
    pub scroll: ScrollConfig,
    pub reveal: RevealConfig,
    pub lazy_images: LazyImageConfig,
    pub theme: ThemeConfig,
    pub nav: NavConfig,
    pub footer: FooterConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    pub owner: String,
    pub github_url: String,
    pub body_selector: String,
    pub search_selector: String,
    pub accordion_settle_ms: u64,
    pub focused_class: String,
    pub collapsed_class: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            owner: "Yirui Hu".to_string(),
            github_url: "https://github.com/YiruiHu".to_string(),
            body_selector: "body".to_string(),
            search_selector: "input[type=search]".to_string(),
            accordion_settle_ms: 350,
            focused_class: "focused".to_string(),
            collapsed_class: "collapsed".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub recipient: String,
    /// Cosmetic pause before the mail client opens. Zero skips it.
    pub submit_delay_ms: u64,
    pub success_dismiss_ms: u64,
    pub form_selector: String,
    pub message_selector: String,
    pub hidden_class: String,
    pub field_ids: FieldIds,
    pub idle_label: String,
    pub busy_label: String,
    /// `{recipient}` is replaced with the recipient address.
    pub success_text: String,
    pub copied_text: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            recipient: "yhu691@gatech.edu".to_string(),
            submit_delay_ms: 1000,
            success_dismiss_ms: 5000,
            form_selector: "#contactForm".to_string(),
            message_selector: "#formMessage".to_string(),
            hidden_class: "d-none".to_string(),
            field_ids: FieldIds::default(),
            idle_label: "Send Message".to_string(),
            busy_label: "Sending...".to_string(),
            success_text: "Thank you for your message! Opening your email client... \
                           Alternatively, you can email me directly at {recipient}"
                .to_string(),
            copied_text: "Email address copied to clipboard!".to_string(),
        }
    }
}

impl ContactConfig {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn success_dismiss(&self) -> Duration {
        Duration::from_millis(self.success_dismiss_ms)
    }

    pub fn success_message(&self) -> String {
        self.success_text.replace("{recipient}", &self.recipient)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldIds {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl Default for FieldIds {
    fn default() -> Self {
        Self {
            first_name: "firstName".to_string(),
            last_name: "lastName".to_string(),
            email: "email".to_string(),
            phone: "phone".to_string(),
            subject: "subject".to_string(),
            message: "message".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub navbar_selector: String,
    pub navbar_class: String,
    pub navbar_threshold: f64,
    pub back_to_top_selector: String,
    pub back_to_top_class: String,
    pub back_to_top_threshold: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            navbar_selector: ".navbar".to_string(),
            navbar_class: "navbar-scrolled".to_string(),
            navbar_threshold: 50.0,
            back_to_top_selector: "#backToTop".to_string(),
            back_to_top_class: "show".to_string(),
            back_to_top_threshold: 300.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub selectors: Vec<String>,
    pub class: String,
    /// Fraction of the element that must be on screen.
    pub threshold: f64,
    /// Shrinks the viewport from the bottom before intersecting.
    pub bottom_margin_px: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selectors: vec![
                ".project-card".to_string(),
                ".overview-card".to_string(),
                ".skill-category".to_string(),
                ".timeline-item".to_string(),
            ],
            class: "animate-in".to_string(),
            threshold: 0.1,
            bottom_margin_px: 50.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LazyImageConfig {
    pub selector: String,
    pub source_attribute: String,
    pub loaded_class: String,
}

impl Default for LazyImageConfig {
    fn default() -> Self {
        Self {
            selector: "img[data-src]".to_string(),
            source_attribute: "data-src".to_string(),
            loaded_class: "loaded".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub storage_key: String,
    pub class: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "darkMode".to_string(),
            class: "dark-mode".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub link_selector: String,
    pub active_class: String,
    pub default_page: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            link_selector: ".nav-link".to_string(),
            active_class: "active".to_string(),
            default_page: "index.html".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    pub copyright_selector: String,
    pub copyright_placeholder: String,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            copyright_selector: ".copyright".to_string(),
            copyright_placeholder: "2024".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: "./.portfolio-site/local-storage.json".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SiteError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| SiteError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// `${NAME}` is replaced by the environment value; unknown names stay as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        if !validation::is_valid_email(&self.contact.recipient) {
            return Err(SiteError::InvalidConfigValueError {
                field: "contact.recipient".to_string(),
                value: self.contact.recipient.clone(),
                reason: "Recipient must look like local@domain.tld".to_string(),
            });
        }

        validation::validate_range("contact.submit_delay_ms", self.contact.submit_delay_ms, 0, MAX_DELAY_MS)?;
        validation::validate_range(
            "contact.success_dismiss_ms",
            self.contact.success_dismiss_ms,
            0,
            MAX_DELAY_MS,
        )?;
        validation::validate_range(
            "site.accordion_settle_ms",
            self.site.accordion_settle_ms,
            0,
            MAX_DELAY_MS,
        )?;

        validation::validate_range("scroll.navbar_threshold", self.scroll.navbar_threshold, 0.0, f64::MAX)?;
        validation::validate_range(
            "scroll.back_to_top_threshold",
            self.scroll.back_to_top_threshold,
            0.0,
            f64::MAX,
        )?;
        validation::validate_range("reveal.threshold", self.reveal.threshold, 0.0, 1.0)?;
        validation::validate_range("reveal.bottom_margin_px", self.reveal.bottom_margin_px, 0.0, f64::MAX)?;

        let selectors = [
            ("site.body_selector", &self.site.body_selector),
            ("site.search_selector", &self.site.search_selector),
            ("contact.form_selector", &self.contact.form_selector),
            ("contact.message_selector", &self.contact.message_selector),
            ("scroll.navbar_selector", &self.scroll.navbar_selector),
            ("scroll.back_to_top_selector", &self.scroll.back_to_top_selector),
            ("lazy_images.selector", &self.lazy_images.selector),
            ("nav.link_selector", &self.nav.link_selector),
            ("footer.copyright_selector", &self.footer.copyright_selector),
        ];
        for (field, selector) in selectors {
            validation::validate_selector(field, selector)?;
        }
        for selector in &self.reveal.selectors {
            validation::validate_selector("reveal.selectors", selector)?;
        }

        validation::validate_non_empty_string("theme.storage_key", &self.theme.storage_key)?;
        validation::validate_non_empty_string("theme.class", &self.theme.class)?;
        validation::validate_non_empty_string("nav.default_page", &self.nav.default_page)?;
        validation::validate_path("storage.path", &self.storage.path)?;

        Ok(())
    }

    pub fn accordion_settle(&self) -> Duration {
        Duration::from_millis(self.site.accordion_settle_ms)
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = SiteConfig::from_toml_str("").unwrap();

        assert_eq!(config.contact.recipient, "yhu691@gatech.edu");
        assert_eq!(config.contact.submit_delay(), Duration::from_secs(1));
        assert_eq!(config.contact.success_dismiss(), Duration::from_secs(5));
        assert_eq!(config.scroll.navbar_threshold, 50.0);
        assert_eq!(config.scroll.back_to_top_threshold, 300.0);
        assert_eq!(config.theme.storage_key, "darkMode");
        assert_eq!(config.reveal.selectors.len(), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_section_overrides() {
        let config = SiteConfig::from_toml_str(
            r#"
[contact]
recipient = "me@example.org"
submit_delay_ms = 0

[scroll]
navbar_threshold = 80
"#,
        )
        .unwrap();

        assert_eq!(config.contact.recipient, "me@example.org");
        assert_eq!(config.contact.submit_delay(), Duration::ZERO);
        assert_eq!(config.contact.form_selector, "#contactForm");
        assert_eq!(config.scroll.navbar_threshold, 80.0);
        assert_eq!(config.scroll.navbar_class, "navbar-scrolled");
    }

    #[test]
    fn test_success_message_mentions_recipient() {
        let config = SiteConfig::default();
        assert!(config
            .contact
            .success_message()
            .ends_with("email me directly at yhu691@gatech.edu"));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PORTFOLIO_TEST_RECIPIENT", "env@example.com");

        let config = SiteConfig::from_toml_str(
            r#"
[contact]
recipient = "${PORTFOLIO_TEST_RECIPIENT}"
"#,
        )
        .unwrap();
        assert_eq!(config.contact.recipient, "env@example.com");

        std::env::remove_var("PORTFOLIO_TEST_RECIPIENT");
    }

    #[test]
    fn test_config_validation_rejects_bad_values() {
        let bad_recipient = SiteConfig::from_toml_str("[contact]\nrecipient = \"nobody\"").unwrap();
        assert!(bad_recipient.validate().is_err());

        let bad_threshold = SiteConfig::from_toml_str("[reveal]\nthreshold = 1.5").unwrap();
        assert!(bad_threshold.validate().is_err());

        let bad_selector = SiteConfig::from_toml_str("[scroll]\nnavbar_selector = \"\"").unwrap();
        assert!(bad_selector.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = SiteConfig::from_toml_str("[contact\nrecipient = 1").unwrap_err();
        assert!(matches!(err, SiteError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[site]\nowner = \"Jane Doe\"\n")
            .unwrap();

        let config = SiteConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.site.owner, "Jane Doe");
    }
}
