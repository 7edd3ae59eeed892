//! Command-line arguments (clap derive).

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "mastodon-swims", version, about = "Track swim logs posted to Mastodon")]
pub struct Cli {
    /// Mastodon handle, e.g. alice@example.social
    #[arg(long, env = "MASTODON_USER", global = true)]
    pub mastodon_user: Option<String>,

    /// Bypass the response cache for this run
    #[arg(long, global = true)]
    pub no_cache: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// This year's swim log and progress against the annual goal
    Swims {
        #[arg(long)]
        json: bool,
    },
    /// Every status posted by the account
    Statuses {
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_swims_json() {
        let cli = Cli::try_parse_from([
            "mastodon-swims",
            "--mastodon-user",
            "alice@example.social",
            "swims",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.mastodon_user.as_deref(), Some("alice@example.social"));
        assert_eq!(cli.command, Command::Swims { json: true });
        assert!(!cli.no_cache);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "mastodon-swims",
            "statuses",
            "--no-cache",
            "--mastodon-user",
            "bob@example.social",
        ])
        .unwrap();
        assert_eq!(cli.command, Command::Statuses { json: false });
        assert!(cli.no_cache);
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["mastodon-swims"]).is_err());
    }
}
