mod add;
mod list;
mod remove;
mod show;
mod update;

pub use list::describe_days;

use tracing::instrument;

use super::Context;

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// List tracked products, most urgent first
    List(list::Command),

    /// Start tracking a newly opened product
    Add(add::Command),

    /// Edit a tracked product
    Update(update::Command),

    /// Stop tracking a product
    Remove(remove::Command),

    /// Show the details of a product
    Show(show::Command),
}

impl Command {
    #[instrument(level = "debug", skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        match self {
            Self::List(command) => command.run(context),
            Self::Add(command) => command.run(context),
            Self::Update(command) => command.run(context),
            Self::Remove(command) => command.run(context),
            Self::Show(command) => command.run(context),
        }
    }
}
