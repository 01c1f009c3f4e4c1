use clap::{
    Args, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use sportop::{
    cli,
    config::{self, Config},
    error,
    spotify::{TimeRange, TopQuery},
    stats::AverageBasis,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Show the profile of the authorized user
    Profile,

    /// List top artists or tracks
    Top(TopOptions),

    /// Popularity averages and per-artist track counts
    Stats(StatsOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct TopOptions {
    #[command(subcommand)]
    pub kind: TopKind,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TopKind {
    /// Top artists
    Artists(TopArgs),

    /// Top tracks
    Tracks(TopArgs),
}

#[derive(Args, Debug, Clone)]
pub struct TopArgs {
    /// Number of items to request (1-50)
    #[clap(long, value_parser = clap::value_parser!(u32).range(1..=50))]
    pub limit: Option<u32>,

    /// Period the top items are computed over
    #[clap(long, value_enum)]
    pub time_range: Option<TimeRange>,
}

impl From<TopArgs> for TopQuery {
    fn from(args: TopArgs) -> Self {
        TopQuery {
            limit: args.limit,
            time_range: args.time_range,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct StatsOptions {
    #[clap(flatten)]
    pub top: TopArgs,

    /// Divide averages by the number of returned items instead of the page size
    #[clap(long)]
    pub by_item_count: bool,

    /// Print the summary as JSON
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn load_config() -> Config {
    match Config::from_env() {
        Ok(c) => c,
        Err(e) => error!(
            "Invalid configuration: {}\nSet it in {} or the environment.",
            e,
            config::env_path().display()
        ),
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => cli::auth(load_config()).await,
        Command::Profile => cli::profile(load_config()).await,
        Command::Top(opt) => match opt.kind {
            TopKind::Artists(args) => cli::top_artists(load_config(), args.into()).await,
            TopKind::Tracks(args) => cli::top_tracks(load_config(), args.into()).await,
        },
        Command::Stats(opt) => {
            let basis = if opt.by_item_count {
                AverageBasis::ItemCount
            } else {
                AverageBasis::PageLimit
            };
            cli::stats(load_config(), opt.top.into(), basis, opt.json).await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
