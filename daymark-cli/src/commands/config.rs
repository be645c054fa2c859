use anyhow::{Context, Result, bail};
use daymark_core::config::DaymarkConfig;
use owo_colors::OwoColorize;

pub fn run(
    config: &DaymarkConfig,
    default_category: Option<String>,
    reminder_minutes: Option<i64>,
) -> Result<()> {
    let config_path = DaymarkConfig::config_path()?;

    if default_category.is_some() || reminder_minutes.is_some() {
        let updated = apply(config.clone(), default_category, reminder_minutes)?;
        updated
            .save()
            .with_context(|| format!("Could not update {}", config_path.display()))?;
        println!("{}", format!("  Updated {}", config_path.display()).green());
        return Ok(());
    }

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("  Data:       {}", config.store_path().display());

    println!();
    println!("{}", "Defaults".bold());
    println!(
        "  Category:   {}",
        config.default_category.as_deref().unwrap_or("(first default)")
    );
    println!("  Reminder:   {} minutes before", config.default_reminder_minutes);

    Ok(())
}

fn apply(
    mut config: DaymarkConfig,
    default_category: Option<String>,
    reminder_minutes: Option<i64>,
) -> Result<DaymarkConfig> {
    if let Some(name) = default_category {
        config.default_category = Some(name).filter(|n| !n.trim().is_empty());
    }

    if let Some(minutes) = reminder_minutes {
        if minutes < 0 {
            bail!(
                "Reminder lead must not be negative, got {}.\n\n\
                 Use 0 to be reminded when the event starts.",
                minutes
            );
        }
        config.default_reminder_minutes = minutes;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_sets_and_clears_defaults() {
        let config = apply(DaymarkConfig::default(), Some("Work".into()), Some(60)).unwrap();
        assert_eq!(config.default_category.as_deref(), Some("Work"));
        assert_eq!(config.default_reminder_minutes, 60);

        let cleared = apply(config, Some(String::new()), None).unwrap();
        assert_eq!(cleared.default_category, None);
        assert_eq!(cleared.default_reminder_minutes, 60);
    }

    #[test]
    fn apply_rejects_negative_lead() {
        assert!(apply(DaymarkConfig::default(), None, Some(-1)).is_err());
    }
}
