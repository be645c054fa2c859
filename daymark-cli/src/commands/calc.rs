use anyhow::Result;
use daymark_core::calculator::{DateDifference, Direction, milestones};
use owo_colors::OwoColorize;

use crate::commands::now;
use crate::render::Render;
use crate::utils::parse::parse_date;

pub fn run(start: &str, end: Option<&str>) -> Result<()> {
    let today = now().date();
    let start = parse_date(start, today)?;
    let end = match end {
        Some(end) => parse_date(end, today)?,
        None => today,
    };

    let diff = DateDifference::between(start, end);

    println!("{} {} {}", start, "→".dimmed(), end);
    if diff.direction == Direction::Same {
        println!("  {}", Direction::Same.render().bold());
    } else {
        println!(
            "  {} {}",
            format!("{} days", diff.abs_days).bold(),
            diff.direction.render()
        );
        println!("  {} weeks {} days", diff.weeks, diff.remaining_days);
        println!("  {} hours, {} minutes", diff.hours, diff.minutes);
        println!(
            "  {}",
            format!(
                "≈ {:.1} months, ≈ {:.2} years",
                diff.approx_months, diff.approx_years
            )
            .dimmed()
        );
    }

    println!();
    println!("{}", format!("Milestones from {}", start).bold());
    for milestone in milestones(start) {
        let marker = if milestone.date < today {
            "✓".green().to_string()
        } else {
            " ".to_string()
        };
        println!("  {} {:<10} {}", marker, milestone.label, milestone.date);
    }

    Ok(())
}
