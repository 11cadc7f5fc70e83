use std::path::PathBuf;

use clap::Parser;

/// A terminal news reader with a reading list and an offline cache.
#[derive(Debug, Default, Parser)]
#[command(name = "newsdesk", version, about)]
pub struct Args {
    /// Config file (default: $XDG_CONFIG_HOME/newsdesk/config.toml)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// NewsData API key (overrides config and NEWSDATA_API_KEY)
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Where the reading list, cache and log live
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Seconds between automatic refreshes
    #[arg(short, long, value_name = "SECS")]
    pub interval: Option<u64>,

    /// Skip the reachability probe and always try to fetch
    #[arg(long)]
    pub assume_online: bool,

    /// Drop the cached headlines before starting
    #[arg(long)]
    pub clear_cache: bool,

    /// Print the publishers the API offers and exit
    #[arg(long)]
    pub sources: bool,
}
