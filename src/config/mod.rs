pub mod scenario;
pub mod site_config;

pub use scenario::Scenario;
pub use site_config::SiteConfig;

#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "portfolio-site")]
#[command(about = "Headless driver for the portfolio page behaviors")]
pub struct CliConfig {
    /// Site configuration (TOML). Built-in defaults when omitted.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Validate contact details and print the mailto URI they produce
    Compose(ComposeArgs),
    /// Replay a scripted page visit and print the resulting page state
    Replay {
        scenario: PathBuf,

        /// Overrides `storage.path` from the config
        #[arg(long)]
        store: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct ComposeArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    #[arg(long)]
    pub subject: String,
    #[arg(long)]
    pub message: String,
}

#[cfg(feature = "cli")]
impl ComposeArgs {
    pub fn fields(&self) -> crate::domain::model::FormFields {
        crate::domain::model::FormFields {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            subject: self.subject.clone(),
            message: self.message.clone(),
        }
    }
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn load_site_config(&self) -> crate::utils::error::Result<SiteConfig> {
        match &self.config {
            Some(path) => SiteConfig::from_file(path),
            None => Ok(SiteConfig::default()),
        }
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compose() {
        let cli = CliConfig::try_parse_from([
            "portfolio-site",
            "compose",
            "--first-name",
            "Jane",
            "--last-name",
            "Doe",
            "--email",
            "jane@example.com",
            "--subject",
            "Hello",
            "--message",
            "Hi there",
        ])
        .unwrap();

        let Command::Compose(args) = cli.command else {
            panic!("expected compose");
        };
        assert_eq!(args.fields().phone, "");
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_replay_with_global_flags() {
        let cli = CliConfig::try_parse_from([
            "portfolio-site",
            "replay",
            "visit.toml",
            "--store",
            "/tmp/store.json",
            "--verbose",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Command::Replay { scenario, store } => {
                assert_eq!(scenario, PathBuf::from("visit.toml"));
                assert_eq!(store, Some(PathBuf::from("/tmp/store.json")));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
