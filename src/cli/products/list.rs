use clap::Parser;
use serde::Serialize;
use suncare::{ExpirationReport, ExpirationStatus, Product};
use tracing::instrument;

use crate::cli::{Context, OutputFormat, short_id, terminal::is_narrow};

/// Command arguments for `suncare products list`.
#[derive(Debug, Parser)]
#[command(about = "List tracked products, most urgent first")]
pub struct Command {
    /// Only show products with these statuses (comma-separated).
    #[arg(long, value_delimiter = ',', value_name = "STATUS")]
    status: Vec<ExpirationStatus>,

    /// Show every product, not just those belonging to the configured owner.
    #[arg(long)]
    all: bool,

    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Suppress headers and format rows for scripting.
    #[arg(long)]
    quiet: bool,
}

/// A listed product as emitted in JSON output.
#[derive(Debug, Serialize)]
struct Row<'a> {
    id: String,
    name: &'a str,
    opened: chrono::NaiveDate,
    pao_days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    owner: Option<&'a str>,
    #[serde(flatten)]
    expiration: ExpirationReport,
}

impl<'a> Row<'a> {
    fn new(product: &'a Product, expiration: ExpirationReport) -> Self {
        Self {
            id: product.id().to_string(),
            name: product.name(),
            opened: product.opened(),
            pao_days: product.pao_days().get(),
            owner: product.owner(),
            expiration,
        }
    }
}

impl Command {
    #[instrument(level = "debug", skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let catalogue = context.open_catalogue()?;
        let owner = if self.all { None } else { context.owner() };

        let entries: Vec<_> = catalogue
            .by_urgency(owner, context.today)
            .into_iter()
            .filter(|(_, report)| self.status.is_empty() || self.status.contains(&report.status))
            .collect();

        tracing::debug!("{} of {} products selected", entries.len(), catalogue.len());

        match self.output {
            OutputFormat::Json => {
                let rows: Vec<_> = entries
                    .iter()
                    .map(|(product, report)| Row::new(product, *report))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            }
            OutputFormat::Table if self.quiet => {
                for (product, report) in &entries {
                    println!(
                        "{}\t{}\t{}\t{}",
                        product.id(),
                        report.status,
                        report.days_until_expiration,
                        product.name()
                    );
                }
            }
            OutputFormat::Table => Self::output_table(context, &entries),
        }

        Ok(())
    }

    fn output_table(context: &Context, entries: &[(&Product, ExpirationReport)]) {
        let palette = context.palette;

        if entries.is_empty() {
            println!("No products found. Add one with 'suncare products add'.");
            return;
        }

        if is_narrow() {
            for (product, report) in entries {
                println!(
                    "{} {} - {}",
                    palette.dim(&short_id(product.id())),
                    product.name(),
                    palette.status(report.status, &describe_days(report.days_until_expiration)),
                );
            }
            return;
        }

        let name_width = entries
            .iter()
            .map(|(product, _)| product.name().chars().count())
            .max()
            .unwrap_or(0)
            .max("Name".len());

        println!(
            "{:<8}  {:<name_width$}  {:<10}  {:<10}  {:>5}  Status",
            "ID", "Name", "Opened", "Expires", "Days"
        );
        for (product, report) in entries {
            println!(
                "{}  {:<name_width$}  {:<10}  {:<10}  {:>5}  {}",
                palette.dim(&short_id(product.id())),
                product.name(),
                product.opened(),
                report.expiration_date,
                report.days_until_expiration,
                palette.status(report.status, report.status.as_str()),
            );
        }
    }
}

/// A human description of the days remaining.
pub fn describe_days(days: i64) -> String {
    match days {
        ..=-2 => format!("expired {} days ago", -days),
        -1 => "expired yesterday".to_string(),
        0 => "expires today".to_string(),
        1 => "expires tomorrow".to_string(),
        _ => format!("expires in {days} days"),
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(-5, "expired 5 days ago")]
    #[test_case(-1, "expired yesterday")]
    #[test_case(0, "expires today")]
    #[test_case(1, "expires tomorrow")]
    #[test_case(11, "expires in 11 days")]
    fn describes_days(days: i64, expected: &str) {
        assert_eq!(describe_days(days), expected);
    }

    #[test]
    fn json_row_flattens_report() {
        let today = chrono::NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let opened = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let product = Product::new("Night cream", opened, 30, today).unwrap();

        let value = serde_json::to_value(Row::new(&product, product.expiration(today))).unwrap();

        assert_eq!(value["name"], "Night cream");
        assert_eq!(value["expiration_date"], "2024-01-31");
        assert_eq!(value["days_until_expiration"], 11);
        assert_eq!(value["status"], "reminder");
        assert!(value.get("owner").is_none());
    }
}
