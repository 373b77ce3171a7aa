use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::scanner::{Platform, DEFAULT_CUSTOMER};
use crate::infra::scanner::settings::DEFAULT_SECRETS_PATH;

#[derive(Parser, Debug)]
#[command(
    name = "profile-scanner",
    version,
    about = "Scan social profiles for risk and moderate them"
)]
pub struct Args {
    /// Secrets file holding BEARER_TOKEN (environment variables take precedence)
    #[arg(long, default_value = DEFAULT_SECRETS_PATH)]
    pub secrets: PathBuf,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan a profile and show its risk assessment
    Scan {
        #[arg(long, short)]
        username: String,
        #[arg(long, short, default_value = "instagram")]
        platform: Platform,
        #[arg(long, short, default_value = DEFAULT_CUSTOMER)]
        customer: String,
        /// Print the raw API response after the report
        #[arg(long)]
        raw: bool,
        /// Block the user right after a scan that did not come back high risk
        #[arg(long)]
        override_block: bool,
    },
    /// Trigger remoderation of a user
    Moderate {
        #[arg(long, short)]
        username: String,
        #[arg(long, short, default_value = "instagram")]
        platform: Platform,
    },
    /// Hard-block a user
    Block {
        #[arg(long, short)]
        username: String,
        #[arg(long, short, default_value = "instagram")]
        platform: Platform,
    },
    /// Interactive operator session
    Interactive,
    /// List known customers
    Customers,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_defaults() {
        let args = Args::try_parse_from(["profile-scanner", "scan", "--username", "jane"]).unwrap();

        assert_eq!(args.secrets, PathBuf::from(DEFAULT_SECRETS_PATH));
        match args.command {
            Command::Scan {
                username,
                platform,
                customer,
                raw,
                override_block,
            } => {
                assert_eq!(username, "jane");
                assert_eq!(platform, Platform::Instagram);
                assert_eq!(customer, "icc");
                assert!(!raw);
                assert!(!override_block);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_platform_is_parsed() {
        let args = Args::try_parse_from([
            "profile-scanner",
            "--secrets",
            "/tmp/s.toml",
            "block",
            "-u",
            "jane",
            "-p",
            "TikTok",
        ])
        .unwrap();

        assert_eq!(args.secrets, PathBuf::from("/tmp/s.toml"));
        assert!(matches!(
            args.command,
            Command::Block {
                platform: Platform::Tiktok,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_platform_is_rejected() {
        assert!(
            Args::try_parse_from(["profile-scanner", "moderate", "-u", "jane", "-p", "myspace"])
                .is_err()
        );
    }
}
