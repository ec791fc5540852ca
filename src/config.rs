// src/config.rs
use crate::error::FeedError;
use crate::types::{AuthToken, QueryParams};
use clap::Parser;

/// Parsed and validated command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// GitHub personal access token (defaults to $GITFEED_TOKEN)
    #[arg(short, long)]
    pub token: Option<String>,

    /// Only show notifications where you are directly participating
    #[arg(long, default_value_t = false)]
    pub participating: bool,

    /// Only show unread notifications
    #[arg(short, long, default_value_t = false)]
    pub unread: bool,

    /// Print the enriched notifications as JSON instead of one line each
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Resolved configuration — validated and ready to drive the fetch.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub token: AuthToken,
    pub unread_only: bool,
    pub json: bool,
    pub verbose: bool,
    params: QueryParams,
}

impl FeedConfig {
    /// Resolves a complete configuration from CLI input and environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, FeedError> {
        let token = cli
            .token
            .or_else(|| std::env::var("GITFEED_TOKEN").ok())
            .ok_or_else(|| {
                FeedError::MissingConfiguration(
                    "GITFEED_TOKEN environment variable not set".to_string(),
                )
            })?;

        let mut params = QueryParams::new();
        if cli.participating {
            params.insert("participating".to_string(), "true".to_string());
        }

        Ok(Self {
            token: AuthToken::new(token),
            unread_only: cli.unread,
            json: cli.json,
            verbose: cli.verbose,
            params,
        })
    }

    /// Query params forwarded to the notifications endpoint.
    pub fn params(&self) -> QueryParams {
        self.params.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(token: Option<&str>, participating: bool) -> CommandLineInput {
        CommandLineInput {
            token: token.map(str::to_string),
            participating,
            unread: false,
            json: false,
            verbose: false,
        }
    }

    #[test]
    fn explicit_token_wins() {
        let config = FeedConfig::resolve(input(Some("123abc"), false)).unwrap();
        assert_eq!(config.token.as_str(), "123abc");
        assert!(config.params().is_empty());
    }

    #[test]
    fn participating_flag_becomes_a_query_param() {
        let config = FeedConfig::resolve(input(Some("123abc"), true)).unwrap();
        assert_eq!(
            config.params().get("participating").map(String::as_str),
            Some("true")
        );
    }
}
