use std::{collections::BTreeMap, process};

use clap::Parser;
use suncare::ExpirationStatus;
use tracing::instrument;

use super::{Context, OutputFormat, products::describe_days, terminal::is_narrow};

#[derive(Debug, Parser, Default)]
#[command(about = "Show product counts by expiration status")]
pub struct Command {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", value_enum, default_value_t)]
    output: OutputFormat,

    /// Suppress headers and format for scripting
    #[arg(long)]
    quiet: bool,
}

impl Command {
    #[instrument(level = "debug", skip(self, context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let catalogue = context.open_catalogue()?;
        let entries = catalogue.by_urgency(context.owner(), context.today);

        if entries.is_empty() {
            println!("No products tracked yet. Add one with 'suncare products add'.");
            return Ok(());
        }

        let mut counts: BTreeMap<u8, (ExpirationStatus, usize)> = ExpirationStatus::ALL
            .into_iter()
            .map(|status| (status.urgency(), (status, 0)))
            .collect();
        for (_, report) in &entries {
            counts.entry(report.status.urgency()).or_insert((report.status, 0)).1 += 1;
        }
        let counts: Vec<(ExpirationStatus, usize)> = counts.into_values().rev().collect();

        let total = entries.len();
        let expired = entries
            .iter()
            .filter(|(_, report)| report.status == ExpirationStatus::Expired)
            .count();
        let next = entries
            .iter()
            .find(|(_, report)| report.status != ExpirationStatus::Expired)
            .map(|(product, report)| (product.name(), report.days_until_expiration));

        match self.output {
            OutputFormat::Json => Self::output_json(&counts, total, next)?,
            OutputFormat::Table => {
                if self.quiet {
                    Self::output_quiet(&counts, total);
                } else {
                    Self::output_table(context, &counts, total, next);
                }
            }
        }

        // Exit with a non-zero code when something has already expired.
        if expired > 0 {
            process::exit(2);
        }

        Ok(())
    }

    fn output_json(
        counts: &[(ExpirationStatus, usize)],
        total: usize,
        next: Option<(&str, i64)>,
    ) -> anyhow::Result<()> {
        use serde_json::json;

        let statuses: serde_json::Map<String, serde_json::Value> = counts
            .iter()
            .map(|(status, count)| (status.to_string(), json!(count)))
            .collect();

        let output = json!({
            "statuses": statuses,
            "total": total,
            "next_to_expire": next.map(|(name, days)| json!({
                "name": name,
                "days_until_expiration": days,
            })),
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn output_quiet(counts: &[(ExpirationStatus, usize)], total: usize) {
        let fields: Vec<String> = counts
            .iter()
            .map(|(status, count)| format!("{status}={count}"))
            .collect();
        println!("total={total} {}", fields.join(" "));
    }

    fn output_table(
        context: &Context,
        counts: &[(ExpirationStatus, usize)],
        total: usize,
        next: Option<(&str, i64)>,
    ) {
        let palette = context.palette;

        println!("Product status");
        println!("{}", palette.dim("──────────────"));

        if is_narrow() {
            for (status, count) in counts {
                println!("{}: {count}", palette.status(*status, status.as_str()));
            }
            println!("Total: {total}");
        } else {
            for (status, count) in counts {
                let label = format!("{:<10}", status.as_str());
                println!("{} {count:>4}", palette.status(*status, &label));
            }
            println!("{:<10} {total:>4}", "Total");
        }

        println!();

        let expired = counts
            .iter()
            .find(|(status, _)| *status == ExpirationStatus::Expired)
            .map_or(0, |(_, count)| *count);
        if expired == 0 {
            println!("Expired: {} ✅", palette.success("0"));
        } else {
            println!("Expired: {} ⚠️", palette.danger(&expired.to_string()));
            println!(
                "{}",
                palette.dim("Run 'suncare products list --status expired' to see them.")
            );
        }

        if let Some((name, days)) = next {
            println!("Next to expire: {name}, {}", describe_days(days));
        }
    }
}
