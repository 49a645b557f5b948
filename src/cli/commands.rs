//! CLI subcommand definitions

use clap::Subcommand;

/// Main CLI commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Commands {
    /// Show every dashboard panel for the selected range (default)
    Summary,
    /// Total and average rentals on working vs. non-working days
    Workday,
    /// Casual rentals per weather condition (whole dataset)
    Weather,
    /// Casual vs. registered rentals per hour of day (whole dataset)
    Hourly,
    /// Temperature against total rentals (whole dataset)
    Temperature,
    /// List the daily rows inside the selected range
    Days,
    /// Show the date span and row counts of the loaded data
    Range,
}

impl Commands {
    /// Commands whose output depends on --since/--until
    pub(crate) fn uses_range(self) -> bool {
        matches!(self, Commands::Summary | Commands::Workday | Commands::Days)
    }
}

/// Resolve the optional subcommand, defaulting to the summary view
pub(crate) fn parse_command(cmd: Option<Commands>) -> Commands {
    cmd.unwrap_or(Commands::Summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_summary() {
        assert_eq!(parse_command(None), Commands::Summary);
        assert_eq!(parse_command(Some(Commands::Weather)), Commands::Weather);
    }

    #[test]
    fn range_sensitive_commands() {
        assert!(Commands::Summary.uses_range());
        assert!(Commands::Workday.uses_range());
        assert!(Commands::Days.uses_range());
        assert!(!Commands::Weather.uses_range());
        assert!(!Commands::Hourly.uses_range());
        assert!(!Commands::Temperature.uses_range());
        assert!(!Commands::Range.uses_range());
    }
}
