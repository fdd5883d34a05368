use chrono::NaiveDate;
use clap::Parser;
use suncare::Product;
use tracing::instrument;

use super::list::describe_days;
use crate::cli::{Context, short_id};

#[derive(Debug, Parser)]
pub struct Command {
    /// The name of the product
    name: String,

    /// The date the product was opened (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_name = "DATE")]
    opened: Option<NaiveDate>,

    /// Period after opening, in days or as the symbol on the jar (e.g. 6M)
    #[arg(long, value_name = "DAYS", value_parser = parse_pao)]
    pao: u32,
}

impl Command {
    #[instrument(level = "debug", skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let opened = self.opened.unwrap_or(context.today);
        let mut product = Product::new(self.name, opened, self.pao, context.today)?;
        if let Some(owner) = context.owner() {
            product = product.with_owner(owner);
        }

        let mut catalogue = context.open_catalogue()?;
        let product = catalogue.add(product).clone();
        catalogue.flush()?;

        let report = product.expiration(context.today);
        println!(
            "Added product {} {} ({}, on {})",
            short_id(product.id()),
            product.name(),
            context
                .palette
                .status(report.status, &describe_days(report.days_until_expiration)),
            report.expiration_date
        );
        Ok(())
    }
}

/// Parses a PAO symbol such as `12M` or `6m` into days, or a plain number of
/// days.
///
/// Months are counted as 30 days.
pub fn parse_pao(s: &str) -> Result<u32, String> {
    let trimmed = s.trim();
    let (digits, months) = match trimmed.strip_suffix(['M', 'm']) {
        Some(digits) => (digits, true),
        None => (trimmed, false),
    };
    let value: u32 = digits
        .trim()
        .parse()
        .map_err(|_| format!("invalid period after opening: {s}"))?;
    if months {
        value
            .checked_mul(30)
            .ok_or_else(|| format!("period after opening is too long: {s}"))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("30", 30; "plain days")]
    #[test_case("6M", 180; "six months")]
    #[test_case("12m", 360; "lowercase months")]
    #[test_case(" 24 M", 720; "spaced months")]
    fn parses_pao(input: &str, expected: u32) {
        assert_eq!(parse_pao(input).unwrap(), expected);
    }

    #[test_case("M"; "missing number")]
    #[test_case("six"; "words")]
    #[test_case("-3"; "negative")]
    fn rejects_bad_pao(input: &str) {
        assert!(parse_pao(input).is_err());
    }
}
