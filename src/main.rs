use anyhow::Context;
use clap::Parser;
use portfolio_site::config::{CliConfig, Command};
use portfolio_site::core::{contact_form, mailto::MailtoUri};
use portfolio_site::utils::error::{ErrorSeverity, SiteError};
use portfolio_site::utils::{logger, validation::Validate};
use portfolio_site::{
    Dispatcher, FileStore, MailClientHandoff, MemoryClipboard, Scenario, SiteConfig, SiteRuntime,
};

fn exit_code(e: &SiteError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(e: SiteError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(&e));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let config = cli.load_site_config().unwrap_or_else(|e| fail(e));
    if let Err(e) = config.validate() {
        fail(e);
    }

    match cli.command {
        Command::Compose(args) => {
            let submission = contact_form::validate(&args.fields())
                .map_err(SiteError::from)
                .unwrap_or_else(|e| fail(e));
            let uri = MailtoUri::compose(&config.contact.recipient, &submission);
            uri.parse().unwrap_or_else(|e| fail(e));
            println!("{}", uri);
        }
        Command::Replay { scenario, store } => {
            let scenario = Scenario::from_file(&scenario).unwrap_or_else(|e| fail(e));
            let store_path = store.unwrap_or_else(|| config.storage.path.clone().into());
            replay(config, scenario, FileStore::new(store_path)).await?;
        }
    }

    Ok(())
}

async fn replay(config: SiteConfig, scenario: Scenario, store: FileStore) -> anyhow::Result<()> {
    tracing::info!(
        "🚀 Replaying {} event(s){}",
        scenario.events.len(),
        scenario
            .name
            .as_deref()
            .map(|n| format!(" from '{}'", n))
            .unwrap_or_default()
    );
    tracing::info!("📁 Preferences stored at {}", store.path().display());

    let submitter = MailClientHandoff::new(config.contact.recipient.clone(), config.contact.submit_delay());
    let dispatcher =
        Dispatcher::new(config, scenario.page, store, submitter).with_clipboard(MemoryClipboard::new());
    let mut runtime = SiteRuntime::new(dispatcher);

    for event in scenario.events {
        runtime.push(event);
    }
    runtime.run_until_idle().await;

    for (name, outcome) in runtime.outcomes() {
        tracing::debug!(
            event = %name,
            default_prevented = outcome.default_prevented,
            deferred = outcome.deferred.len(),
            submitted = outcome.submission.is_some(),
            "Event handled"
        );
    }

    let dispatcher = runtime.into_dispatcher();
    let page_json =
        serde_json::to_string_pretty(dispatcher.page()).context("serializing final page state")?;
    println!("{}", page_json);

    tracing::info!("✅ Replay finished");
    Ok(())
}
