use clap::Parser;

/// Pattern used for the current time when none is given
pub const DEFAULT_NOW_PATTERN: &str = "yyyy/MM/dd HH:mm:ss.fff zzz";

/// Tour of eon date/time values.
#[derive(Parser, Debug)]
#[command(name = "eon-demo", version, about = "Tour of unbounded date/time values")]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Format pattern applied to the current local time.
    pub pattern: Option<String>,
}

impl Cli {
    pub fn now_pattern(&self) -> &str {
        self.pattern.as_deref().unwrap_or(DEFAULT_NOW_PATTERN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["eon-demo"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.now_pattern(), DEFAULT_NOW_PATTERN);
    }

    #[test]
    fn test_verbosity_and_pattern() {
        let cli = Cli::try_parse_from(["eon-demo", "-vv", "yyyy/MM/dd"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.now_pattern(), "yyyy/MM/dd");

        let cli = Cli::try_parse_from(["eon-demo", "--verbose", "-v", "-v"]).unwrap();
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_rejects_extra_positional() {
        assert!(Cli::try_parse_from(["eon-demo", "yyyy", "MM"]).is_err());
    }
}
