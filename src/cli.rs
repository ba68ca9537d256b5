use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "rosterdeck",
    about = "Fill a slide template with one employee's row from a sheet",
    version
)]
pub struct Cli {
    /// Config file (defaults to ./rosterdeck.toml, then the user config dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Ask for a name on stdin instead of opening the window
    #[arg(long)]
    pub prompt: bool,

    /// Run one fill for this name without a window or prompt
    #[arg(long, conflicts_with = "prompt")]
    pub name: Option<String>,
}

impl Cli {
    pub fn is_headless(&self) -> bool {
        self.prompt || self.name.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_window() {
        let cli = Cli::parse_from(["rosterdeck"]);

        assert!(!cli.is_headless());
        assert!(cli.config.is_none());
    }

    #[test]
    fn name_implies_headless() {
        let cli = Cli::parse_from(["rosterdeck", "--name", "Jane Doe", "-c", "deck.toml"]);

        assert!(cli.is_headless());
        assert_eq!(cli.name.as_deref(), Some("Jane Doe"));
        assert_eq!(cli.config, Some(PathBuf::from("deck.toml")));
    }

    #[test]
    fn prompt_and_name_conflict() {
        assert!(Cli::try_parse_from(["rosterdeck", "--prompt", "--name", "x"]).is_err());
    }
}
