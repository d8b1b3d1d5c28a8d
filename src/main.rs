//! channel-videos - print a channel's videos as JSON.
//!
//! Loads configuration, runs one fetch and writes the records to stdout.

use anyhow::{Context, Result};
use channel_videos::config::{API_KEY_ENV, Config};
use channel_videos::{RequestOptions, VideoFetcher};
use std::path::PathBuf;

const USAGE: &str = "Usage: channel-videos [--default] [--config <path>] [QUERY...]

Options:
  -d, --default        Show shuffled default videos instead of searching
  -c, --config <path>  Config file (default: <config dir>/channel-videos/config.jsonc)
  -h, --help           Print this help";

/// Parsed command line.
#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    use_default_videos: bool,
    config_path: Option<PathBuf>,
    query: Vec<String>,
    help: bool,
}

impl CliArgs {
    /// Parse arguments (without the program name).
    ///
    /// Remaining positional arguments are joined into the search query.
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut parsed = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-d" | "--default" => parsed.use_default_videos = true,
                "-c" | "--config" => {
                    let path = args
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("{arg} requires a path"))?;
                    parsed.config_path = Some(PathBuf::from(path));
                }
                "-h" | "--help" => parsed.help = true,
                flag if flag.starts_with('-') && flag.len() > 1 => {
                    return Err(anyhow::anyhow!("Unknown option: {flag}\n\n{USAGE}"));
                }
                _ => parsed.query.push(arg),
            }
        }

        Ok(parsed)
    }

    fn request_options(&self) -> RequestOptions {
        let query = self.query.join(" ");
        RequestOptions {
            use_default_videos: self.use_default_videos,
            search_query: (!query.is_empty()).then_some(query),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse(std::env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    dotenvy::dotenv().ok();
    let config = Config::load(args.config_path.as_deref())?
        .with_api_key_override(std::env::var(API_KEY_ENV).ok());

    let fetcher = VideoFetcher::new(&config)?;

    match fetcher.fetch_channel_videos(&args.request_options()).await {
        Ok(videos) => {
            let json =
                serde_json::to_string_pretty(&videos).context("Failed to serialize videos")?;
            println!("{json}");
            Ok(())
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliArgs> {
        CliArgs::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_no_args_is_plain_search() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.request_options(), RequestOptions::default());
    }

    #[test]
    fn test_query_words_are_joined() {
        let args = parse(&["rust", "async"]).unwrap();
        assert_eq!(args.request_options(), RequestOptions::search("rust async"));
    }

    #[test]
    fn test_flags() {
        let args = parse(&["--default", "-c", "/tmp/cfg.jsonc"]).unwrap();
        assert!(args.use_default_videos);
        assert_eq!(args.config_path, Some(PathBuf::from("/tmp/cfg.jsonc")));
        assert!(args.request_options().use_default_videos);
    }

    #[test]
    fn test_bad_args() {
        assert!(parse(&["--config"]).is_err());
        assert!(parse(&["--verbose"]).is_err());
    }
}
