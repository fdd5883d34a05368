use std::{io::BufRead, path::PathBuf};

mod config;
mod products;
mod status;
mod terminal;
mod timer;

use chrono::NaiveDate;
use clap::ArgAction;
use suncare::{Catalogue, Config};
use terminal::Palette;

/// The configuration file, relative to the data directory.
const CONFIG_FILE: &str = "config.toml";

/// The product catalogue, relative to the data directory.
const CATALOGUE_FILE: &str = "products.yaml";

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global=true)]
    verbose: u8,

    /// The directory holding the configuration and product catalogue
    #[arg(short, long, default_value = ".suncare", global = true)]
    root: PathBuf,

    /// Evaluate expiration dates as of this date instead of today
    /// (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", global = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let context = Context::new(self.root, self.today);
        self.command.unwrap_or_default().run(&context)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false)
            .with_writer(std::io::stderr);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// Everything a command needs from the environment.
///
/// Built once by [`Cli::run`] and handed to every command.
#[derive(Debug)]
pub struct Context {
    root: PathBuf,
    config: Config,
    today: NaiveDate,
    palette: Palette,
}

impl Context {
    fn new(root: PathBuf, today: Option<NaiveDate>) -> Self {
        let config = Config::load_or_default(&root.join(CONFIG_FILE));
        let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
        let palette = Palette::new(config.color);
        tracing::debug!(root = %root.display(), %today, "resolved context");
        Self {
            root,
            config,
            today,
            palette,
        }
    }

    fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    fn open_catalogue(&self) -> anyhow::Result<Catalogue> {
        Ok(Catalogue::open(self.root.join(CATALOGUE_FILE))?)
    }

    /// The owner used to filter the catalogue, if one is configured.
    fn owner(&self) -> Option<&str> {
        self.config.owner.as_deref()
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Summarise product expiration (default)
    Status(status::Command),

    /// Compute when to reapply sunscreen
    Timer(timer::Command),

    /// Manage tracked products
    #[command(subcommand)]
    Products(products::Command),

    /// Show or modify configuration settings
    Config(config::Command),
}

impl Default for Command {
    fn default() -> Self {
        Self::Status(status::Command::default())
    }
}

impl Command {
    fn run(self, context: &Context) -> anyhow::Result<()> {
        match self {
            Self::Status(command) => command.run(context)?,
            Self::Timer(command) => command.run(context)?,
            Self::Products(command) => command.run(context)?,
            Self::Config(command) => command.run(context)?,
        }
        Ok(())
    }
}

/// Output formats shared by the reporting commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

fn prompt_to_proceed() -> std::io::Result<()> {
    eprint!("\nProceed? (y/N) ");
    let stdin = std::io::stdin();
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;
    if !line.trim().eq_ignore_ascii_case("y") {
        println!("Cancelled");
        std::process::exit(130);
    }
    Ok(())
}

/// The short form of a product identifier shown in listings.
fn short_id(id: uuid::Uuid) -> String {
    id.simple().to_string()[..8].to_string()
}
