use portfolio_site::core::{KeyValueStore, Page};
use portfolio_site::{Dispatcher, FileStore, MailClientHandoff, MemoryClipboard, Scenario, SiteConfig, SiteRuntime};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

const VISIT: &str = r#"
name = "visitor writes in"

[page]
path = "/index.html"
viewport_height = 800

[[page.elements]]
id = "body"
tag = "body"

[[page.elements]]
id = "mainNav"
tag = "nav"
classes = ["navbar"]

[[page.elements]]
id = "card-1"
classes = ["project-card"]
bounds = { top = 1000, height = 300 }

[[page.elements]]
id = "contactForm"
tag = "form"

[[page.elements]]
id = "firstName"
tag = "input"
value = ""
parent = "contactForm"

[[page.elements]]
id = "lastName"
tag = "input"
value = ""
parent = "contactForm"

[[page.elements]]
id = "email"
tag = "input"
value = ""
parent = "contactForm"

[[page.elements]]
id = "subject"
tag = "input"
value = ""
parent = "contactForm"

[[page.elements]]
id = "message"
tag = "textarea"
value = ""
parent = "contactForm"

[[page.elements]]
id = "send"
tag = "button"
text = "Send Message"
attributes = { type = "submit" }
parent = "contactForm"

[[page.elements]]
id = "formMessage"
classes = ["d-none"]

[[events]]
type = "loaded"
path = "/index.html"

[[events]]
type = "scrolled"
offset_y = 600

[[events]]
type = "toggle_dark_mode"

[[events]]
type = "input"
element = "firstName"
value = "Jane"

[[events]]
type = "input"
element = "lastName"
value = "Doe"

[[events]]
type = "input"
element = "email"
value = "jane@example.com"

[[events]]
type = "input"
element = "subject"
value = "Hello"

[[events]]
type = "input"
element = "message"
value = "Hi there"

[[events]]
type = "submit_contact_form"
"#;

#[tokio::test(start_paused = true)]
async fn test_replay_scenario_from_file() {
    let mut scenario_file = NamedTempFile::new().unwrap();
    scenario_file.write_all(VISIT.as_bytes()).unwrap();
    let scenario = Scenario::from_file(scenario_file.path()).unwrap();

    let dir = TempDir::new().unwrap();
    let store_path = dir.path().join("storage.json");

    let config = SiteConfig::default();
    let submitter = MailClientHandoff::new(config.contact.recipient.clone(), config.contact.submit_delay());
    let dispatcher = Dispatcher::new(config, scenario.page, FileStore::new(&store_path), submitter)
        .with_clipboard(MemoryClipboard::new());
    let mut runtime = SiteRuntime::new(dispatcher);
    for event in scenario.events {
        runtime.push(event);
    }
    runtime.run_until_idle().await;

    assert_eq!(runtime.outcomes().len(), 11);
    let names: Vec<&str> = runtime.outcomes().iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(&names[8..], ["submit_contact_form", "submission_finished", "dismiss_form_message"]);

    let (page, store) = runtime.into_dispatcher().into_parts();
    assert!(page.has_class("mainNav", "navbar-scrolled"));
    assert_eq!(page.scroll_y, 600.0);
    assert!(page.has_class("card-1", "animate-in"));
    assert!(page.has_class("body", "dark-mode"));
    assert!(page.has_class("formMessage", "d-none"));
    assert_eq!(page.navigations.len(), 1);
    assert!(page.navigations[0].starts_with("mailto:yhu691@gatech.edu?subject=Hello&body="));
    assert_eq!(page.value("firstName").as_deref(), Some(""));

    assert_eq!(store.get("darkMode").unwrap().as_deref(), Some("true"));
    let on_disk = std::fs::read_to_string(&store_path).unwrap();
    assert!(on_disk.contains("\"darkMode\": \"true\""));
}

#[tokio::test]
async fn test_final_page_state_serializes() {
    let scenario = Scenario::from_toml_str(VISIT).unwrap();
    let json = serde_json::to_value(&scenario.page).unwrap();

    assert_eq!(json["path"], "/index.html");
    assert_eq!(json["elements"].as_array().unwrap().len(), 11);
    assert_eq!(json["elements"][9]["attributes"]["type"], "submit");
}
