//! Command-line interface configuration.

use argh::FromArgs;
use std::path::PathBuf;

/// Version string printed by `--version`.
pub const VERSION_LINE: &str = concat!("tetsuocode ", env!("CARGO_PKG_VERSION"));

/// AI coding assistant powered by Grok
#[derive(Debug, FromArgs)]
pub struct Cli {
    /// workspace directory (default: current directory)
    #[argh(positional)]
    pub workspace: Option<PathBuf>,

    /// port to run on (default: 5000)
    #[argh(option, short = 'p', default = "5000")]
    pub port: u16,

    /// host to bind to (default: '127.0.0.1')
    #[argh(option, default = "String::from(\"127.0.0.1\")")]
    pub host: String,

    /// don't auto-open browser
    #[argh(switch, long = "no-browser")]
    pub no_browser: bool,

    /// set access password
    #[argh(option, default = "String::new()")]
    pub password: String,

    /// xAI API key (or set XAI_API_KEY env var)
    #[argh(option, long = "api-key", default = "String::new()")]
    pub api_key: String,

    /// print version and exit
    #[argh(switch)]
    pub version: bool,
}
