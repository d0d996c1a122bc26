//! Multi-page analytics over the unfiltered directory.

use super::utils::{print_chart, print_json, spinner};
use colored::Colorize;
use serde::Serialize;
use taproom::api::BreweryApi;
use taproom::config::Config;
use taproom::error::Result;
use taproom::report::ChartRow;
use taproom::session::{DashboardSession, FetchStatus};

#[derive(Serialize)]
struct AnalyticsOutput {
    analyzed: usize,
    type_count: usize,
    state_count: usize,
    types: Vec<ChartRow>,
    top_states: Vec<(String, usize)>,
}

/// Fetches the first `pages` pages concurrently and prints type and state
/// distributions.
pub async fn analytics(
    api: &BreweryApi,
    config: &Config,
    pages: u32,
    top: usize,
    json: bool,
) -> Result<()> {
    let mut session = DashboardSession::new(api.clone(), config.per_page);

    let spinner = spinner(format!("Fetching {} pages of breweries...", pages), json);
    let loaded = session.load_first_pages(pages).await;
    spinner.finish_and_clear();
    loaded?;

    if let FetchStatus::Failed(message) = session.status() {
        return Err(anyhow::anyhow!("could not load analytics data: {}", message).into());
    }

    let report = session.report();
    let types = report.type_chart(usize::MAX);
    let output = AnalyticsOutput {
        analyzed: report.total_loaded(),
        type_count: types.len(),
        state_count: report.distinct_state_count(),
        types,
        top_states: report.top_n_states_by_count(top),
    };

    if json {
        return print_json(&output);
    }

    println!(
        "{} {} breweries analyzed",
        "==>".bold().green(),
        output.analyzed.to_string().bold()
    );

    println!();
    println!("{}", "==> Brewery types".bold().cyan());
    print_chart(&output.types);

    println!();
    println!("{}", format!("==> Top {} states", top).bold().cyan());
    let width = output
        .top_states
        .iter()
        .map(|(state, _)| state.chars().count())
        .max()
        .unwrap_or(0);
    for (rank, (state, count)) in output.top_states.iter().enumerate() {
        println!(
            "  {:>2}. {:<width$}  {}",
            rank + 1,
            state,
            count.to_string().bold(),
            width = width
        );
    }

    println!();
    println!("Total brewery types: {}", output.type_count.to_string().bold());
    println!("States represented:  {}", output.state_count.to_string().bold());

    Ok(())
}
