//! These structs provide the CLI interface for the roast CLI.

use crate::config::{DEFAULT_CURRENCY_SYMBOL, DEFAULT_PERIOD_COUNT};
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::num::NonZeroU32;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// roast: Your spending, roasted with love.
///
/// Shows what your (mock) transaction history says about you, lets you chat with Spend Sensei,
/// a canned money coach, and draws a meme banner about your latest purchase.
///
/// Run `roast init` once to create the data directory before using the other commands.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and initialize the configuration file.
    Init(InitArgs),
    /// Mind Over Money: print the spending insight report.
    Analyze(AnalyzeArgs),
    /// Draw a meme about your latest transaction.
    ///
    /// By default the meme is saved to the gallery in $ROAST_HOME/.memes, which keeps the newest
    /// few memes and deletes older ones.
    Meme(MemeArgs),
    /// Spend Sensei: ask the money coach a question.
    ///
    /// With no message, starts an interactive session on stdin. In the interactive session you
    /// can also type /habits for the insight report, /meme for a fresh meme, /coach to return to
    /// the chat and /quit to leave.
    Chat(ChatArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where roast configuration and memes are kept. Defaults to ~/roast
    #[arg(long, env = "ROAST_HOME", default_value_t = default_roast_home())]
    roast_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, roast_home: PathBuf) -> Self {
        Self {
            log_level,
            roast_home: roast_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn roast_home(&self) -> &DisplayPath {
        &self.roast_home
    }
}

/// Args for the `roast init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The symbol prefixed to amounts.
    #[arg(long, default_value = DEFAULT_CURRENCY_SYMBOL)]
    currency_symbol: String,

    /// The number of periods (months) the transaction history spans.
    #[arg(long, default_value_t = default_period_count())]
    period_count: NonZeroU32,

    /// A TrueType or OpenType font to draw memes with. Use a font with monochrome emoji outlines
    /// to get real emoji. Without one, a built-in bitmap font is used.
    #[arg(long)]
    font_path: Option<PathBuf>,
}

impl InitArgs {
    pub fn new(
        currency_symbol: impl Into<String>,
        period_count: NonZeroU32,
        font_path: Option<PathBuf>,
    ) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
            period_count,
            font_path,
        }
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    pub fn period_count(&self) -> NonZeroU32 {
        self.period_count
    }

    pub fn font_path(&self) -> Option<&Path> {
        self.font_path.as_deref()
    }
}

/// Args for the `roast analyze` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct AnalyzeArgs {
    /// Print the report as JSON on stdout.
    #[arg(long)]
    json: bool,
}

impl AnalyzeArgs {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn json(&self) -> bool {
        self.json
    }
}

/// Args for the `roast meme` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct MemeArgs {
    /// Seed for the random choices. The same seed always draws the same meme.
    #[arg(long)]
    seed: Option<u64>,

    /// Write the PNG here instead of to the gallery.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Also print the meme as a data URI on stdout.
    #[arg(long)]
    data_uri: bool,
}

impl MemeArgs {
    pub fn new(seed: Option<u64>, out: Option<PathBuf>, data_uri: bool) -> Self {
        Self {
            seed,
            out,
            data_uri,
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn out(&self) -> Option<&Path> {
        self.out.as_deref()
    }

    pub fn data_uri(&self) -> bool {
        self.data_uri
    }
}

/// Args for the `roast chat` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct ChatArgs {
    /// The message to send. Leave empty for an interactive session.
    #[arg(trailing_var_arg = true)]
    message: Vec<String>,
}

impl ChatArgs {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: vec![message.into()],
        }
    }

    /// The words of the message joined by spaces, or `None` for an interactive session.
    pub fn message(&self) -> Option<String> {
        if self.message.is_empty() {
            None
        } else {
            Some(self.message.join(" "))
        }
    }
}

fn default_period_count() -> NonZeroU32 {
    NonZeroU32::new(DEFAULT_PERIOD_COUNT).unwrap_or(NonZeroU32::MIN)
}

fn default_roast_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("roast"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --roast-home or ROAST_HOME instead of relying on the default \
                roast home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("roast")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
