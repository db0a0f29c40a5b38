use crate::analysis::{self, aggregate, Analysis};
use crate::args::AnalyzeArgs;
use crate::commands::Out;
use crate::source::{MockTransactions, TransactionSource};
use crate::{Config, Result};
use anyhow::Context;
use tracing::debug;

/// Builds the "Mind Over Money" report from the mock transaction history.
///
/// With `--json` the report is also written to stdout as JSON.
pub async fn analyze(config: Config, args: &AnalyzeArgs) -> Result<Out<Analysis>> {
    report(&config, &MockTransactions, args)
}

fn report(
    config: &Config,
    source: &dyn TransactionSource,
    args: &AnalyzeArgs,
) -> Result<Out<Analysis>> {
    let transactions = source.transactions();
    debug!("Analyzing {} transactions", transactions.len());
    let aggregation = aggregate(&transactions, config.period_count())
        .context("Unable to analyze the transaction history")?;
    let analysis = analysis::analyze(&aggregation, config.currency_symbol());

    if args.json() {
        let json = serde_json::to_string_pretty(&analysis)
            .context("Unable to serialize the report")?;
        println!("{json}");
    }

    Ok(Out::new(analysis.to_string(), analysis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Transaction;
    use crate::test::TestEnv;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_analyze_mock_history() {
        let env = TestEnv::new().await;
        let out = analyze(env.config(), &AnalyzeArgs::default()).await.unwrap();
        let analysis = out.structure();
        assert_eq!(analysis.total_spent.value(), 870);
        assert_eq!(analysis.monthly_average.value(), 435);
        assert_eq!(analysis.top_category.as_str(), "food");
        assert!(out.message().contains("₹870"));
    }

    #[tokio::test]
    async fn test_analyze_empty_history() {
        let env = TestEnv::new().await;
        let empty: Vec<Transaction> = Vec::new();
        assert!(report(&env.config(), &empty, &AnalyzeArgs::default()).is_err());
    }

    #[tokio::test]
    async fn test_analyze_custom_history() {
        let env = TestEnv::new().await;
        let date = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        let history = vec![
            Transaction::new(1, "Steam", 300u64, "gaming", date),
            Transaction::new(2, "PVR", 100u64, "entertainment", date),
        ];
        let out = report(&env.config(), &history, &AnalyzeArgs::default()).unwrap();
        assert_eq!(out.structure().top_category.as_str(), "gaming");
    }
}
