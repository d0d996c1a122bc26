use super::utils::{print_json, spinner};
use colored::Colorize;
use taproom::api::{BreweryApi, DirectoryService};
use taproom::error::{Result, TaproomError};
use taproom::format::{format_phone, location_line, map_url, type_label};
use taproom::model::Brewery;

pub async fn show(api: &BreweryApi, id: &str, json: bool) -> Result<()> {
    let spinner = spinner(format!("Fetching brewery {}...", id), json);
    let fetched = api.fetch_detail(id).await;
    spinner.finish_and_clear();

    match fetched {
        Ok(brewery) if json => print_json(&brewery),
        Ok(brewery) => {
            print_detail(&brewery);
            Ok(())
        }
        Err(TaproomError::NotFound(id)) => {
            println!("{} No brewery with id '{}'", "✗".red(), id);
            Err(TaproomError::NotFound(id))
        }
        Err(err) => Err(err),
    }
}

pub async fn random(api: &BreweryApi, json: bool) -> Result<()> {
    let spinner = spinner("Picking a random brewery...", json);
    let fetched = api.fetch_random().await;
    spinner.finish_and_clear();

    let brewery = fetched?;
    if json {
        return print_json(&brewery);
    }
    print_detail(&brewery);
    Ok(())
}

fn print_detail(brewery: &Brewery) {
    println!("{}", brewery.name.bold().green());
    if let Some(kind) = &brewery.brewery_type {
        println!("{}", type_label(kind.as_str()).cyan());
    }
    println!();

    let street = [
        brewery.street_address(),
        brewery.address_2.as_deref(),
        brewery.address_3.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|line| !line.trim().is_empty())
    .collect::<Vec<_>>()
    .join(", ");

    if !street.is_empty() {
        println!("  {:<10} {}", "Address:".bold(), street);
    }
    let location = location_line(brewery);
    if !location.is_empty() {
        println!("  {:<10} {}", "Location:".bold(), location);
    }
    println!(
        "  {:<10} {}",
        "Phone:".bold(),
        format_phone(brewery.phone.as_deref())
    );
    if brewery.has_website() {
        println!(
            "  {:<10} {}",
            "Website:".bold(),
            brewery.website_url.as_deref().unwrap_or_default().underline()
        );
    }
    if let Some(url) = map_url(brewery) {
        println!("  {:<10} {}", "Map:".bold(), url.dimmed());
    }
    println!("  {:<10} {}", "ID:".bold(), brewery.id.dimmed());
}
