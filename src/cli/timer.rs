use clap::Parser;
use serde_json::json;
use suncare::{
    Protection, SkinClass, UvIndex,
    domain::{ReapplicationPlan, plan_reapplication},
};
use tracing::instrument;

use super::{Context, OutputFormat};

#[derive(Debug, Parser)]
#[command(about = "Compute when to reapply sunscreen")]
pub struct Command {
    /// The current UV index. Leave out when no reading is available.
    #[arg(long, value_name = "INDEX")]
    uv: Option<UvIndex>,

    /// Skin sensitivity class, 1 (most sensitive) to 6 (least sensitive).
    ///
    /// Defaults to the configured skin class.
    #[arg(long, value_name = "CLASS")]
    skin: Option<u8>,

    /// SPF of the sunscreen. Defaults to the configured protection.
    #[arg(long, value_name = "SPF", conflicts_with = "pa")]
    spf: Option<u32>,

    /// PA grade of the sunscreen, as the number of '+' signs (1-6).
    #[arg(long, value_name = "LEVEL")]
    pa: Option<u8>,

    /// Show each step of the calculation
    #[arg(long)]
    explain: bool,

    /// Output format (table, json)
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl Command {
    #[instrument(level = "debug", skip(context))]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let skin = self
            .skin
            .map_or(context.config.skin_class, SkinClass::new);
        let protection = match (self.spf, self.pa) {
            (Some(spf), _) => Protection::Spf(spf),
            (None, Some(pa)) => Protection::Pa(pa),
            (None, None) => context.config.protection,
        };

        if !skin.is_recognised() {
            tracing::warn!("Skin class {skin} is outside 1-6, using the neutral adjustment");
        }
        match protection {
            Protection::Pa(_) if !protection.is_recognised() => {
                tracing::warn!("{protection} is not a PA grade, using the neutral adjustment");
            }
            Protection::Spf(_) if !protection.is_recognised() => {
                tracing::warn!("{protection} is outside the usual SPF 5-75 range");
            }
            _ => {}
        }

        let plan = plan_reapplication(self.uv, skin, protection);

        match self.output {
            OutputFormat::Json => Self::output_json(plan, skin, protection)?,
            OutputFormat::Table => {
                Self::output_table(context, plan, skin, protection, self.explain);
            }
        }
        Ok(())
    }

    fn output_json(
        plan: Option<ReapplicationPlan>,
        skin: SkinClass,
        protection: Protection,
    ) -> anyhow::Result<()> {
        let output = json!({
            "available": plan.is_some(),
            "uv_index": plan.map(|p| p.uv.value()),
            "skin_class": skin.get(),
            "protection": protection.to_string(),
            "minutes": plan.map_or(0, |p| p.minutes),
            "steps": plan.map(|p| json!({
                "band": p.band.to_string(),
                "base": p.base,
                "skin_adjusted": p.skin_adjusted,
                "protection_adjusted": p.protection_adjusted,
            })),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn output_table(
        context: &Context,
        plan: Option<ReapplicationPlan>,
        skin: SkinClass,
        protection: Protection,
        explain: bool,
    ) {
        let palette = context.palette;
        let Some(plan) = plan else {
            println!("{}", palette.warning("UV index not available"));
            println!(
                "{}",
                palette.dim("Pass the current reading with '--uv <INDEX>'.")
            );
            return;
        };

        println!(
            "Reapply sunscreen in {} ({} minutes)",
            palette.success(&format_minutes(plan.minutes)),
            plan.minutes
        );

        if explain {
            println!();
            println!(
                "  UV index {} ({} band): {} min",
                plan.uv, plan.band, plan.base
            );
            println!(
                "  skin class {} ({}): {} min",
                skin,
                skin.multiplier(),
                plan.skin_adjusted
            );
            println!(
                "  {} ({}): {} min",
                protection,
                protection.multiplier(),
                plan.protection_adjusted
            );
            println!("  rounded down: {} min", plan.minutes);
        }
    }
}

/// Formats a number of minutes as hours and minutes.
fn format_minutes(minutes: u32) -> String {
    let (hours, rest) = (minutes / 60, minutes % 60);
    match (hours, rest) {
        (0, m) => format!("{m} min"),
        (h, 0) => format!("{h} h"),
        (h, m) => format!("{h} h {m} min"),
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(20, "20 min")]
    #[test_case(60, "1 h")]
    #[test_case(108, "1 h 48 min")]
    #[test_case(360, "6 h")]
    fn formats_minutes(minutes: u32, expected: &str) {
        assert_eq!(format_minutes(minutes), expected);
    }

    #[test]
    fn parses_arguments() {
        #[derive(Parser)]
        struct Harness {
            #[command(flatten)]
            command: Command,
        }

        let harness =
            Harness::try_parse_from(["timer", "--uv", "8.5", "--skin", "1", "--spf", "15"])
                .unwrap();
        assert_eq!(harness.command.skin, Some(1));
        assert_eq!(harness.command.spf, Some(15));

        assert!(Harness::try_parse_from(["timer", "--spf", "15", "--pa", "3"]).is_err());
        assert!(Harness::try_parse_from(["timer", "--uv", "-2"]).is_err());
    }
}
