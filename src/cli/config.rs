use std::path::Path;

use suncare::{Config, Protection, SkinClass};
use tracing::instrument;

use super::Context;

const KEYS: &str = "skin_class, protection, owner, color";

#[derive(Debug, clap::Parser)]
/// Show or modify configuration settings
///
/// Configuration is stored in config.toml inside the data directory.
///
/// Available configuration keys:
///   `skin_class`  Default skin sensitivity class, 1-6 (default: 3)
///   protection    Default sunscreen rating, e.g. SPF30 or PA+++ (default: SPF30)
///   owner         User that new products are recorded against (default: unset)
///   color         auto, always or never (default: auto)
pub struct Command {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Debug, clap::Subcommand)]
enum ConfigCommand {
    /// Show all configuration values
    Show,

    /// Get a specific configuration value
    Get {
        /// Configuration key to retrieve
        key: String,
    },

    /// Set a configuration value
    ///
    /// Examples:
    ///   suncare config set protection PA++++
    ///   suncare config set owner alice
    ///   suncare config set owner ""   (unset)
    Set {
        /// Configuration key to set
        key: String,

        /// Value to set
        value: String,
    },
}

impl Command {
    #[instrument(level = "debug", skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let config_path = context.config_path();

        match self.command {
            ConfigCommand::Show => {
                Self::show_config(context, &context.config);
                Ok(())
            }
            ConfigCommand::Get { key } => Self::get_config(&context.config, &key),
            ConfigCommand::Set { key, value } => {
                Self::set_config(context, &config_path, &key, &value)
            }
        }
    }

    fn show_config(context: &Context, config: &Config) {
        let palette = context.palette;
        println!("Configuration:");
        println!("  skin_class: {}", config.skin_class);
        println!("  protection: {}", config.protection);
        match &config.owner {
            Some(owner) => println!("  owner: {owner}"),
            None => println!("  owner: {}", palette.dim("(unset, all products listed)")),
        }
        println!("  color: {}", config.color);
    }

    fn get_config(config: &Config, key: &str) -> anyhow::Result<()> {
        let value = match key {
            "skin_class" => config.skin_class.to_string(),
            "protection" => config.protection.to_string(),
            "owner" => config.owner.clone().unwrap_or_default(),
            "color" => config.color.to_string(),
            _ => anyhow::bail!("Unknown configuration key: '{key}'\n\nAvailable keys: {KEYS}"),
        };
        println!("{value}");
        Ok(())
    }

    fn set_config(
        context: &Context,
        config_path: &Path,
        key: &str,
        value: &str,
    ) -> anyhow::Result<()> {
        update_file(config_path, key, value)?;

        tracing::info!("Set {key} in {}", config_path.display());
        println!("{}", context.palette.success(&format!("Set {key}")));
        Ok(())
    }
}

/// Applies a single change to the configuration file at `path`.
///
/// The file is re-read rather than taken from the command context, so a file
/// that fails to parse is reported instead of being overwritten.
fn update_file(path: &Path, key: &str, value: &str) -> anyhow::Result<Config> {
    let mut config = if path.exists() {
        Config::load(path).map_err(|e| anyhow::anyhow!("{e}"))?
    } else {
        Config::default()
    };
    apply(&mut config, key, value)?;
    config.save(path).map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(config)
}

/// Applies a single `key = value` change to a configuration.
fn apply(config: &mut Config, key: &str, value: &str) -> anyhow::Result<()> {
    match key {
        "skin_class" => {
            let class: u8 = value
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("Skin class must be a number from 1 to 6"))?;
            let class = SkinClass::new(class);
            if !class.is_recognised() {
                anyhow::bail!("Skin class must be a number from 1 to 6");
            }
            config.skin_class = class;
        }
        "protection" => {
            let protection: Protection = value.parse()?;
            if !protection.is_recognised() {
                anyhow::bail!(
                    "{protection} is outside the supported range (SPF 5-75, PA+ to PA++++++)"
                );
            }
            config.protection = protection;
        }
        "owner" => {
            let owner = value.trim();
            config.owner = (!owner.is_empty()).then(|| owner.to_string());
        }
        "color" => {
            config.color = value.parse().map_err(|e: String| anyhow::anyhow!(e))?;
        }
        _ => anyhow::bail!("Unknown configuration key: '{key}'\nSupported keys: {KEYS}"),
    }
    Ok(())
}
