use super::utils::print_json;
use colored::Colorize;
use taproom::config::Config;
use taproom::error::Result;

pub fn config(config: &Config, json: bool) -> Result<()> {
    if json {
        return print_json(config);
    }

    println!("{}", "==> Configuration".bold().green());
    println!("  {:<10} {}", "API base:".bold(), config.api_base);
    println!("  {:<10} {}", "Per page:".bold(), config.per_page);
    println!("  {:<10} {}s", "Timeout:".bold(), config.timeout.as_secs());
    Ok(())
}
