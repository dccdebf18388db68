use clap::{Parser, Subcommand};

use crate::types::Gender;

#[derive(Parser)]
#[command(name = "userdex")]
#[command(about = "Browse and search a remote user directory")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show one page of users
    #[command(visible_alias = "l")]
    Ls {
        /// Filter by name, email or username
        #[arg(short, long)]
        search: Option<String>,

        /// Only show this gender (male, female); remembered for next time
        #[arg(short, long, value_parser = parse_gender, conflicts_with = "all_genders")]
        gender: Option<Gender>,

        /// Clear a remembered gender filter
        #[arg(long)]
        all_genders: bool,

        /// Page to show, starting at 1; remembered for next time
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        page: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive browser reading commands from stdin
    #[command(visible_alias = "b")]
    Browse,

    /// Fetch the user generated from ID used as a seed (NOT the user listed under ID)
    LookupSeed {
        /// Identifier to use as the seed
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect or reset the remembered page and gender filter
    State {
        #[command(subcommand)]
        action: StateAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum StateAction {
    /// Show the remembered page and gender filter
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Forget the remembered page and gender filter
    Reset {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print one configuration value
    Get {
        /// Configuration key (e.g. page_size)
        key: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set a configuration value
    Set {
        /// Configuration key (e.g. page_size)
        key: String,

        /// New value; empty clears optional settings
        value: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_gender(s: &str) -> Result<Gender, String> {
    s.parse().map_err(|e: crate::error::UserdexError| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_ls_flags() {
        let cli = Cli::parse_from(["userdex", "ls", "--gender", "female", "--page", "2"]);
        match cli.command {
            Commands::Ls { gender, page, .. } => {
                assert_eq!(gender, Some(Gender::Female));
                assert_eq!(page, Some(2));
            }
            _ => panic!("expected ls"),
        }
    }

    #[test]
    fn test_ls_rejects_page_zero_and_conflicts() {
        assert!(Cli::try_parse_from(["userdex", "ls", "--page", "0"]).is_err());
        assert!(
            Cli::try_parse_from(["userdex", "ls", "--gender", "male", "--all-genders"]).is_err()
        );
        assert!(Cli::try_parse_from(["userdex", "ls", "--gender", "other"]).is_err());
    }
}
