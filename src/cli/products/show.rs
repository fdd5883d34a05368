use clap::Parser;
use serde_json::json;
use tracing::instrument;

use super::list::describe_days;
use crate::cli::{Context, OutputFormat};

#[derive(Debug, Parser)]
pub struct Command {
    /// The product identifier, or a unique prefix of it
    id: String,

    /// Output format (table, json)
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl Command {
    #[instrument(level = "debug", skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let catalogue = context.open_catalogue()?;
        let product = catalogue.find(&self.id)?;
        let report = product.expiration(context.today);

        match self.output {
            OutputFormat::Json => {
                let output = json!({
                    "id": product.id(),
                    "name": product.name(),
                    "owner": product.owner(),
                    "opened": product.opened(),
                    "pao_days": product.pao_days().get(),
                    "expiration_date": report.expiration_date,
                    "days_until_expiration": report.days_until_expiration,
                    "status": report.status,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Table => {
                let palette = context.palette;
                println!("{}", product.name());
                println!("{}", palette.dim(&product.id().to_string()));
                println!();
                println!("Opened:   {}", product.opened());
                println!("PAO:      {} days", product.pao_days());
                println!("Expires:  {}", report.expiration_date);
                println!(
                    "Status:   {} ({})",
                    palette.status(report.status, report.status.as_str()),
                    describe_days(report.days_until_expiration)
                );
                if let Some(owner) = product.owner() {
                    println!("Owner:    {owner}");
                }
            }
        }
        Ok(())
    }
}
