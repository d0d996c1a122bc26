use super::FilterArgs;
use super::utils::{name_width, print_brewery_row, print_chart, print_json, spinner};
use colored::Colorize;
use serde::Serialize;
use taproom::accumulator::Facets;
use taproom::api::BreweryApi;
use taproom::config::Config;
use taproom::error::Result;
use taproom::model::{Brewery, FilterCriteria};
use taproom::report::{ChartRow, Summary};
use taproom::session::{DashboardSession, FetchStatus, PageLoad};

/// Cities listed under the facets before truncating.
const CITY_FACET_LIMIT: usize = 50;
/// Bars in the dashboard type chart.
const DASHBOARD_CHART_ROWS: usize = 6;

#[derive(Serialize)]
struct BrowseOutput<'a> {
    criteria: &'a FilterCriteria,
    page: u32,
    total: u64,
    records: &'a [Brewery],
    facets: Facets,
}

#[derive(Serialize)]
struct StatsOutput {
    summary: Summary,
    type_chart: Vec<ChartRow>,
}

/// Resets the session with `criteria`, then loads up to `pages` pages.
async fn load(
    api: &BreweryApi,
    config: &Config,
    criteria: FilterCriteria,
    pages: u32,
) -> Result<DashboardSession<BreweryApi>> {
    let mut session = DashboardSession::new(api.clone(), config.per_page);
    session.apply(criteria).await?;

    for _ in 1..pages {
        if !session.has_more() || matches!(session.status(), FetchStatus::Failed(_)) {
            break;
        }
        if session.load_next_page().await? == PageLoad::Failed {
            break;
        }
    }

    if let FetchStatus::Failed(message) = session.status().clone() {
        if session.records().is_empty() {
            return Err(anyhow::anyhow!("could not load breweries: {}", message).into());
        }
        eprintln!(
            "{} Stopped after page {}: {}",
            "⚠".yellow(),
            session.page(),
            message
        );
    }

    Ok(session)
}

fn warn_dropped_facets(criteria: &FilterCriteria) {
    if criteria.search_text().is_none() {
        return;
    }
    let dropped: Vec<&str> = [
        criteria.city_filter().map(|_| "--city"),
        criteria.country_filter().map(|_| "--country"),
        criteria.sort.map(|_| "--sort"),
    ]
    .into_iter()
    .flatten()
    .collect();

    if !dropped.is_empty() {
        eprintln!(
            "{} Search ignores {} (not supported by the search endpoint)",
            "⚠".yellow(),
            dropped.join(", ")
        );
    }
}

pub async fn browse(
    api: &BreweryApi,
    config: &Config,
    filters: &FilterArgs,
    pages: u32,
    json: bool,
) -> Result<()> {
    let criteria = filters.to_criteria()?;
    warn_dropped_facets(&criteria);

    let spinner = spinner("Loading breweries...", json);
    let loaded = load(api, config, criteria, pages).await;
    spinner.finish_and_clear();
    let session = loaded?;

    if json {
        return print_json(&BrowseOutput {
            criteria: session.criteria(),
            page: session.page(),
            total: session.total(),
            records: session.records(),
            facets: session.facets(),
        });
    }

    if session.records().is_empty() {
        println!("{} No breweries match these filters", "✗".red());
        return Ok(());
    }

    println!("{}", "==> Breweries".bold().green());
    let width = name_width();
    for brewery in session.records() {
        print_brewery_row(brewery, width);
    }

    println!();
    if session.total() > 0 {
        println!(
            "Showing {} of {} breweries (page {})",
            session.records().len().to_string().bold(),
            session.total(),
            session.page()
        );
    } else {
        println!(
            "Showing {} breweries (page {})",
            session.records().len().to_string().bold(),
            session.page()
        );
    }
    if session.has_more() {
        println!(
            "{}",
            format!("Use --pages {} to load more", session.page() + 1).dimmed()
        );
    }

    print_facets(session.facets());
    Ok(())
}

fn print_facets(facets: Facets) {
    let Facets {
        mut states,
        mut cities,
        mut countries,
    } = facets;
    states.sort();
    cities.sort();
    countries.sort();

    println!();
    println!("{}", "==> Facets".bold().cyan());
    println!("  {:<10} {}", "States:".bold(), states.join(", "));
    if cities.len() > CITY_FACET_LIMIT {
        println!(
            "  {:<10} {} (+{} more)",
            "Cities:".bold(),
            cities[..CITY_FACET_LIMIT].join(", "),
            cities.len() - CITY_FACET_LIMIT
        );
    } else {
        println!("  {:<10} {}", "Cities:".bold(), cities.join(", "));
    }
    println!("  {:<10} {}", "Countries:".bold(), countries.join(", "));
}

pub async fn stats(
    api: &BreweryApi,
    config: &Config,
    filters: &FilterArgs,
    pages: u32,
    json: bool,
) -> Result<()> {
    let criteria = filters.to_criteria()?;
    warn_dropped_facets(&criteria);

    let spinner = spinner("Crunching numbers...", json);
    let loaded = load(api, config, criteria, pages).await;
    spinner.finish_and_clear();
    let session = loaded?;

    let report = session.report();
    let output = StatsOutput {
        summary: report.summary(),
        type_chart: report.type_chart(DASHBOARD_CHART_ROWS),
    };

    if json {
        return print_json(&output);
    }

    let summary = &output.summary;
    if summary.total_loaded == 0 {
        return Err(anyhow::anyhow!("no breweries loaded, nothing to summarize").into());
    }

    println!("{}", "==> Summary".bold().green());
    if summary.server_total > 0 {
        println!("  {:<24} {}", "Total breweries:", summary.server_total);
    }
    println!("  {:<24} {}", "Loaded:", summary.total_loaded);
    println!("  {:<24} {}", "States:", summary.distinct_states);
    println!("  {:<24} {}", "Cities:", summary.distinct_cities);
    if let Some((kind, count)) = &summary.most_common_type {
        println!(
            "  {:<24} {} ({})",
            "Most common type:",
            taproom::format::type_label(kind),
            count
        );
    }
    println!(
        "  {:<24} {:.1}%",
        "With website:", summary.website_percentage
    );
    println!("  {:<24} {:.1}%", "With phone:", summary.phone_percentage);
    println!(
        "  {:<24} {:.2}",
        "Average name length:", summary.average_name_length
    );

    println!();
    println!("{}", "==> Types".bold().cyan());
    print_chart(&output.type_chart);

    Ok(())
}
