pub mod letters;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_range, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "meal-subscriptions")]
#[command(about = "Manage meal subscriptions for a fixed set of subscribers")]
pub struct CliConfig {
    /// Load settings from a TOML file instead of the flags below
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, default_value = "input_data.txt")]
    pub seed_file: String,

    #[arg(long, default_value = "letters.txt")]
    pub letters_file: String,

    #[arg(long, help = "Append to the letters file instead of truncating it")]
    pub append_letters: bool,

    #[arg(long, default_value = toml_config::DEFAULT_ORGANIZATION)]
    pub organization: String,

    #[arg(long, default_value = "2", help = "Failed lookups before the valid names are listed")]
    pub reminder_after: u32,

    #[arg(long, help = "Skip the random greeting")]
    pub no_greeting: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn seed_path(&self) -> &str {
        &self.seed_file
    }

    fn letters_path(&self) -> &str {
        &self.letters_file
    }

    fn append_letters(&self) -> bool {
        self.append_letters
    }

    fn organization(&self) -> &str {
        &self.organization
    }

    fn reminder_after(&self) -> u32 {
        self.reminder_after
    }

    fn show_greeting(&self) -> bool {
        !self.no_greeting
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("seed_file", &self.seed_file)?;
        validate_path("letters_file", &self.letters_file)?;
        validate_non_empty_string("organization", &self.organization)?;
        validate_range("reminder_after", self.reminder_after, 1, 10)?;
        Ok(())
    }
}
