use clap::Parser;
use tracing::instrument;

use crate::cli::{Context, prompt_to_proceed, short_id};

#[derive(Debug, Parser)]
pub struct Command {
    /// The product identifier, or a unique prefix of it
    id: String,

    /// Skip confirmation prompts
    #[arg(long, short)]
    yes: bool,
}

impl Command {
    #[instrument(level = "debug", skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let mut catalogue = context.open_catalogue()?;

        if !self.yes {
            let product = catalogue.find(&self.id)?;
            eprintln!(
                "Removing {} {} (opened {})",
                short_id(product.id()),
                product.name(),
                product.opened()
            );
            prompt_to_proceed()?;
        }

        let removed = catalogue.remove(&self.id)?;
        catalogue.flush()?;

        println!("Removed product {}", removed.name());
        Ok(())
    }
}
