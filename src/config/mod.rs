pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::error::{Result, SiteError};
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "site-fx")]
#[command(about = "Replay and check the interactive behaviour of a marketing page")]
pub struct CliConfig {
    /// Path to a TOML file with page settings (defaults apply when omitted)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Replay a visit against the page and print the final state
    Simulate {
        /// JSON visit script; the built-in travel demo is used when omitted
        #[arg(long)]
        script: Option<String>,

        /// Length of the visit in milliseconds
        #[arg(long, default_value = "15000")]
        duration_ms: u64,

        /// Run on real tokio timers instead of the virtual clock
        #[arg(long)]
        realtime: bool,

        /// Print the final page state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a contact form and send it through the simulated backend
    Contact {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long, default_value = "")]
        phone: String,

        #[arg(long)]
        message: String,
    },
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validation::validate_non_empty_string("config", path)?;
        }
        if let Command::Simulate {
            script: Some(path), ..
        } = &self.command
        {
            if path.contains('\0') {
                return Err(SiteError::InvalidConfigValueError {
                    field: "script".to_string(),
                    value: path.clone(),
                    reason: "Path contains null bytes".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simulate() {
        let cli = CliConfig::parse_from(["site-fx", "simulate", "--duration-ms", "3000", "--json"]);
        match &cli.command {
            Command::Simulate {
                duration_ms,
                json,
                realtime,
                script,
            } => {
                assert_eq!(*duration_ms, 3000);
                assert!(*json);
                assert!(!*realtime);
                assert!(script.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = CliConfig::parse_from([
            "site-fx", "contact", "--name", "Amaya", "--email", "a@b.lk", "--message", "hello there!", "-v",
        ]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Contact { .. }));
    }

    #[test]
    fn test_empty_config_path_rejected() {
        let cli = CliConfig::parse_from(["site-fx", "--config", " ", "simulate"]);
        assert!(cli.validate().is_err());
    }
}
