use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;

use crate::risk::{compute_risk_level, IncomeBasis, QuestionnaireScale, RiskEngine, RiskInput, RiskResult};

#[derive(Parser)]
#[command(name = "riskctl")]
#[command(about = "Score investor risk profiles from the command line")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Compute a risk score and level")]
    Score(ScoreArgs),

    #[command(about = "Classify an existing 0-100 score")]
    Level {
        #[arg(allow_negative_numbers = true)]
        score: i64,
    },
}

#[derive(clap::Args)]
pub struct ScoreArgs {
    #[arg(long)]
    pub age: u32,

    #[arg(long, conflicts_with = "monthly_income", help = "Annual income")]
    pub income: Option<f64>,

    #[arg(long, help = "Monthly income, annualized before scoring")]
    pub monthly_income: Option<f64>,

    #[arg(long, default_value_t = 0)]
    pub dependents: u32,

    #[arg(long, help = "Years until the goal target date")]
    pub horizon: u32,

    #[arg(long, value_delimiter = ',', required = true, help = "Comma-separated answers, e.g. 3,4,3,5,2,4,3,3")]
    pub answers: Vec<i64>,

    #[arg(long, default_value_t = 1)]
    pub scale_low: i64,

    #[arg(long, default_value_t = 5)]
    pub scale_high: i64,

    #[arg(long, help = "Required number of answers (default 8, 0 for any)")]
    pub length: Option<usize>,
}

impl ScoreArgs {
    fn income(&self) -> IncomeBasis {
        match (self.income, self.monthly_income) {
            (_, Some(monthly)) => IncomeBasis::Monthly(monthly),
            (annual, None) => IncomeBasis::Annual(annual.unwrap_or(0.0)),
        }
    }

    fn scale(&self) -> anyhow::Result<QuestionnaireScale> {
        let length = match self.length {
            Some(0) => None,
            Some(n) => Some(n),
            None => QuestionnaireScale::default().expected_len(),
        };
        QuestionnaireScale::new(self.scale_low, self.scale_high, length).context("invalid --scale-low/--scale-high")
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Score(args) => {
            let engine = RiskEngine::new(args.scale()?);
            let input = RiskInput {
                age: args.age,
                annual_income: args.income().annual(),
                dependents: args.dependents,
                time_horizon: args.horizon,
                questionnaire: args.answers.clone(),
            };
            let result = engine.assess(&input)?;
            println!("{}", render_result(&result, cli.json)?);
        }
        Commands::Level { score } => {
            let level = compute_risk_level(score);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&level.info())?);
            } else {
                println!("{} ({}): {}", level.value(), level, level.description());
            }
        }
    }
    Ok(())
}

/// Render an assessment as text or pretty JSON
pub fn render_result(result: &RiskResult, as_json: bool) -> anyhow::Result<String> {
    if as_json {
        let body = json!({
            "risk_score": result.risk_score,
            "risk_level": result.risk_level,
            "risk_label": result.risk_level.label(),
            "factors": result.factors,
        });
        return Ok(serde_json::to_string_pretty(&body)?);
    }

    let mut out = format!(
        "Risk score: {}\nRisk level: {} ({})\n",
        result.risk_score,
        result.risk_level.value(),
        result.risk_level
    );
    for (name, contribution) in result.factors.contributions() {
        out.push_str(&format!("  {:<14} {:+.4}\n", name, contribution));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("riskctl").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn score_command_parses_answers_and_monthly_income() {
        let cli = parse(&[
            "score", "--age", "30", "--monthly-income", "1000", "--horizon", "10", "--answers", "3,3,3,3,3,3,3,3",
        ]);
        match cli.command {
            Commands::Score(args) => {
                assert_eq!(args.answers, vec![3; 8]);
                assert_eq!(args.income().annual(), 12_000.0);
                assert_eq!(args.scale().unwrap().expected_len(), Some(8));
            }
            _ => panic!("expected score command"),
        }
    }

    #[test]
    fn annual_and_monthly_income_conflict() {
        let res = Cli::try_parse_from([
            "riskctl", "score", "--age", "30", "--income", "1", "--monthly-income", "1", "--horizon", "1", "--answers", "3",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn text_rendering_lists_contributions() {
        let result = RiskEngine::default()
            .assess(&RiskInput {
                age: 18,
                annual_income: 100_000.0,
                dependents: 0,
                time_horizon: 30,
                questionnaire: vec![5; 8],
            })
            .unwrap();
        let text = render_result(&result, false).unwrap();
        assert!(text.starts_with("Risk score: 84\nRisk level: 5 (Aggressive)"));
        assert!(text.contains("questionnaire"));

        let json: serde_json::Value = serde_json::from_str(&render_result(&result, true).unwrap()).unwrap();
        assert_eq!(json["risk_level"], 5);
        assert_eq!(json["risk_label"], "Aggressive");
    }
}
