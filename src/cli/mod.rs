pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "medium-api-rust")]
#[command(about = "Blog post API for the Medium clone")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve,

    #[command(about = "Apply database migrations and exit")]
    Migrate,

    #[command(about = "Mint a signed bearer token for local testing")]
    Token {
        #[arg(long, help = "Subject id placed in the token's `id` claim")]
        subject: String,
        #[arg(long, help = "Lifetime in hours (defaults to SECURITY_JWT_EXPIRY_HOURS)")]
        ttl_hours: Option<u64>,
        #[arg(long, help = "Issue a token without an `exp` claim")]
        no_expiry: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let config = crate::config::AppConfig::from_env()?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => commands::serve::handle(config).await,
        Commands::Migrate => commands::migrate::handle(config).await,
        Commands::Token { subject, ttl_hours, no_expiry } => {
            commands::token::handle(&config, &subject, ttl_hours, no_expiry, output_format)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["medium-api-rust"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn token_command_parses() {
        let cli = Cli::try_parse_from(["medium-api-rust", "--json", "token", "--subject", "u1", "--ttl-hours", "2"]).unwrap();
        assert_eq!(OutputFormat::from_cli(&cli), OutputFormat::Json);
        match cli.command {
            Some(Commands::Token { subject, ttl_hours, no_expiry }) => {
                assert_eq!(subject, "u1");
                assert_eq!(ttl_hours, Some(2));
                assert!(!no_expiry);
            }
            _ => panic!("expected token command"),
        }
    }

    #[test]
    fn token_requires_subject() {
        assert!(Cli::try_parse_from(["medium-api-rust", "token"]).is_err());
    }
}
