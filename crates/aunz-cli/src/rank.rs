//! `rank` command handler.

use aunz_core::{AppConfig, Market};

use crate::wiring;

pub(crate) async fn run_rank(
    config: &AppConfig,
    market: Market,
    keywords: &[String],
    summary: bool,
) -> anyhow::Result<()> {
    tracing::debug!(?config, "ranking with configuration");
    let service = wiring::ranking_service(config)?;

    let selection = (!keywords.is_empty()).then_some(keywords);
    let run = service.refresh(market, selection).await;

    if summary {
        for row in &run.rankings {
            println!(
                "{:>3}  {:>5.1}  {} ({})",
                row.rank, row.total_score, row.keyword, row.localized_label
            );
        }
    } else {
        println!("{}", serde_json::to_string_pretty(run.as_ref())?);
    }
    Ok(())
}
