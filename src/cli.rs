use clap::{Args, Parser, Subcommand};

use crate::types::LogLevel;

pub const DEFAULT_BASE_URL: &str = "https://android-kotlin-fun-mars-server.appspot.com";

#[derive(Parser, Debug)]
#[command(name = "marsphotos", version, about = "Browse Mars rover photos")]
pub struct Cli {
    /// Base URL of the photos API (the list is fetched from `<url>/photos`)
    #[arg(long, env = "MARS_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Request timeout in seconds (default: no timeout beyond the transport's)
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Log level
    #[arg(long, value_enum, default_value = "info", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch and print the photo grid
    List(ListArgs),

    /// Print the camera filter options
    Cameras,

    /// Show one photo's details and viewport
    Show(ShowArgs),

    /// Keep the list on screen, refreshing periodically.
    /// Type `r` + Enter to refresh now, `q` + Enter to quit.
    Watch(WatchArgs),
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only photos whose id contains this text (case-insensitive)
    #[arg(short = 's', long)]
    pub search: Option<String>,

    /// Only photos taken by this camera
    #[arg(short = 'c', long)]
    pub camera: Option<String>,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Photo id
    pub id: String,

    /// Zoom factor (clamped to 0.5..=3)
    #[arg(long, default_value_t = 1.0)]
    pub zoom: f32,

    /// Horizontal pan
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub pan_x: f32,

    /// Vertical pan
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub pan_y: f32,

    /// Viewport width
    #[arg(long, default_value_t = 1080.0)]
    pub width: f32,

    /// Viewport height
    #[arg(long, default_value_t = 1920.0)]
    pub height: f32,
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Seconds between refreshes
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: u64,

    #[command(flatten)]
    pub filter: ListArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_defaults() {
        let cli = Cli::try_parse_from(["marsphotos", "list"]).unwrap();
        assert_eq!(cli.log_level, LogLevel::Info);
        assert!(cli.timeout_secs.is_none());
        match cli.command {
            Command::List(args) => {
                assert!(args.search.is_none());
                assert!(args.camera.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "marsphotos",
            "list",
            "--search",
            "1026",
            "--base-url",
            "http://localhost:8080",
            "--timeout-secs",
            "5",
        ])
        .unwrap();
        assert_eq!(cli.base_url, "http://localhost:8080");
        assert_eq!(cli.timeout_secs, Some(5));
    }

    #[test]
    fn test_show_negative_pan() {
        let cli = Cli::try_parse_from([
            "marsphotos", "show", "42", "--zoom", "2", "--pan-x", "-30",
        ])
        .unwrap();
        match cli.command {
            Command::Show(args) => {
                assert_eq!(args.id, "42");
                assert_eq!(args.zoom, 2.0);
                assert_eq!(args.pan_x, -30.0);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_watch_interval_must_be_positive() {
        assert!(Cli::try_parse_from(["marsphotos", "watch", "--interval", "0"]).is_err());
        let cli = Cli::try_parse_from(["marsphotos", "watch", "--camera", "FHAZ"]).unwrap();
        match cli.command {
            Command::Watch(args) => {
                assert_eq!(args.interval, 60);
                assert_eq!(args.filter.camera.as_deref(), Some("FHAZ"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["marsphotos"]).is_err());
    }
}
