use anyhow::{Context, Result};
use daymark_core::lunar;
use owo_colors::OwoColorize;

use crate::commands::now;
use crate::utils::parse::{parse_date, parse_lunar};

pub fn run(date: Option<String>, to_solar: Option<String>) -> Result<()> {
    let today = now().date();

    if let Some(input) = to_solar {
        let lunar_date = parse_lunar(&input)?;
        let solar = lunar::try_lunar_to_solar(lunar_date)
            .with_context(|| format!("Lunar date {} has no solar equivalent", lunar_date))?;
        println!("{} {} {}", lunar_date, "→".dimmed(), solar);
        return Ok(());
    }

    let solar = match date {
        Some(input) => parse_date(&input, today)?,
        None => today,
    };
    let lunar_date = lunar::try_solar_to_lunar(solar)
        .with_context(|| format!("No lunar date for {}", solar))?;
    println!("{} {} {}", solar, "→".dimmed(), lunar_date);

    Ok(())
}
