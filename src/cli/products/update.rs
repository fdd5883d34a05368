use chrono::NaiveDate;
use clap::Parser;
use tracing::instrument;

use super::add::parse_pao;
use crate::cli::{Context, short_id};

#[derive(Debug, Parser)]
pub struct Command {
    /// The product identifier, or a unique prefix of it
    id: String,

    /// A new name for the product
    #[arg(long)]
    name: Option<String>,

    /// A new opening date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    opened: Option<NaiveDate>,

    /// A new period after opening, in days or as a symbol (e.g. 6M)
    #[arg(long, value_name = "DAYS", value_parser = parse_pao)]
    pao: Option<u32>,
}

impl Command {
    #[instrument(level = "debug", skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        if self.name.is_none() && self.opened.is_none() && self.pao.is_none() {
            anyhow::bail!("Nothing to update: pass at least one of --name, --opened or --pao");
        }

        let mut catalogue = context.open_catalogue()?;
        let product = catalogue.find_mut(&self.id)?;

        if let Some(name) = self.name {
            product.set_name(name)?;
        }
        if let Some(opened) = self.opened {
            product.set_opened(opened, context.today)?;
        }
        if let Some(pao) = self.pao {
            product.set_pao_days(pao)?;
        }

        let summary = format!(
            "Updated product {} {} (expires {})",
            short_id(product.id()),
            product.name(),
            product.expiration_date()
        );
        catalogue.flush()?;

        println!("{summary}");
        Ok(())
    }
}
