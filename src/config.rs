//! Configuration file handling.
//!
//! The configuration file is stored at `$ROAST_HOME/config.json` and holds the currency symbol,
//! the number of periods the history is averaged over, meme gallery settings and an optional font
//! for drawing memes.

use crate::gallery::Gallery;
use crate::meme::{BitmapFace, Face, MemeRenderer, OutlineFace};
use crate::{utils, Result};
use anyhow::{bail, ensure, Context};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

const APP_NAME: &str = "roast";
const CONFIG_VERSION: u8 = 1;
const MEME_COPIES: u32 = 5;
const TYPING_DELAY_MS: u64 = 1500;
const MEMES: &str = ".memes";
const CONFIG_JSON: &str = "config.json";

pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";
pub const DEFAULT_PERIOD_COUNT: u32 = 2;

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$ROAST_HOME` and from there it loads `$ROAST_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    memes: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the data directory, the meme gallery directory and an initial `config.json`.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of data directory, e.g. `$HOME/roast`
    /// - `currency_symbol` - Prefixed to amounts in reports and memes
    /// - `period_count` - The number of periods the transaction history spans
    /// - `font_path` - An optional TrueType or OpenType font to draw memes with. Relative paths
    ///   are resolved against `dir`.
    ///
    /// # Errors
    /// - Returns an error if any file operations fail.
    pub async fn create(
        dir: impl Into<PathBuf>,
        currency_symbol: &str,
        period_count: NonZeroU32,
        font_path: Option<PathBuf>,
    ) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the roast home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let memes = root.join(MEMES);
        utils::make_dir(&memes).await?;

        let config_path = root.join(CONFIG_JSON);
        let config_file = ConfigFile {
            currency_symbol: currency_symbol.to_string(),
            period_count,
            font_path,
            ..ConfigFile::default()
        };
        config_file.save(&config_path).await?;

        Ok(Self {
            root,
            memes,
            config_path,
            config_file,
        })
    }

    /// This will
    /// - validate that `roast_home` exists and that the config file exists
    /// - load and validate the config file
    /// - validate that the meme gallery directory exists
    pub async fn load(roast_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = roast_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("Roast Home is missing, run 'roast init' first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!(
                "The config file is missing '{}', run 'roast init' first",
                config_path.display()
            )
        }
        let config_file = ConfigFile::load(&config_path).await?;

        let config = Self {
            memes: root.join(MEMES),
            root,
            config_path,
            config_file,
        };
        if !config.memes.is_dir() {
            bail!(
                "The memes directory is missing '{}'",
                config.memes.display()
            )
        }
        debug!("Loaded config from {}", config.config_path.display());
        Ok(config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn memes(&self) -> &Path {
        &self.memes
    }

    pub fn currency_symbol(&self) -> &str {
        &self.config_file.currency_symbol
    }

    pub fn period_count(&self) -> NonZeroU32 {
        self.config_file.period_count
    }

    pub fn meme_copies(&self) -> u32 {
        self.config_file.meme_copies
    }

    /// How long the coach pretends to type before replying.
    pub fn typing_delay(&self) -> Duration {
        Duration::from_millis(self.config_file.typing_delay_ms)
    }

    /// Returns the configured font path, resolving relative paths against the home directory.
    pub fn font_path(&self) -> Option<PathBuf> {
        let p = self.config_file.font_path.as_ref()?;
        if p.is_absolute() {
            return Some(p.clone());
        }
        Some(self.root.join(p))
    }

    /// Creates a new `Gallery` for saving rendered memes.
    pub fn gallery(&self) -> Gallery {
        Gallery::new(self)
    }

    /// Loads the configured font, or the built-in bitmap face when none is configured.
    pub async fn face(&self) -> Result<Box<dyn Face>> {
        match self.font_path() {
            Some(path) => {
                let face = OutlineFace::load(&path).await?;
                debug!("Drawing memes with font '{}'", face.name());
                Ok(Box::new(face))
            }
            None => Ok(Box::new(BitmapFace)),
        }
    }

    /// A meme renderer using the configured face and currency symbol.
    pub async fn renderer(&self) -> Result<MemeRenderer> {
        Ok(MemeRenderer::new(self.face().await?).with_currency_symbol(self.currency_symbol()))
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "roast",
///   "config_version": 1,
///   "currency_symbol": "₹",
///   "period_count": 2,
///   "meme_copies": 5,
///   "typing_delay_ms": 1500,
///   "font_path": "fonts/NotoEmoji-Regular.ttf"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "roast"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Prefixed to amounts, e.g. "₹" or "Rs."
    #[serde(default = "default_currency_symbol")]
    currency_symbol: String,

    /// The number of periods the history spans; the monthly average divides by this.
    #[serde(default = "default_period_count")]
    period_count: NonZeroU32,

    /// Number of memes to keep in the gallery
    #[serde(default = "default_meme_copies")]
    meme_copies: u32,

    /// Simulated typing delay of the chat coach, in milliseconds
    #[serde(default = "default_typing_delay_ms")]
    typing_delay_ms: u64,

    /// Font used to draw memes (optional, relative to the home directory or absolute). Defaults
    /// to the built-in 8x8 bitmap font.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    font_path: Option<PathBuf>,
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

fn default_period_count() -> NonZeroU32 {
    NonZeroU32::new(DEFAULT_PERIOD_COUNT).unwrap_or(NonZeroU32::MIN)
}

fn default_meme_copies() -> u32 {
    MEME_COPIES
}

fn default_typing_delay_ms() -> u64 {
    TYPING_DELAY_MS
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            currency_symbol: default_currency_symbol(),
            period_count: default_period_count(),
            meme_copies: MEME_COPIES,
            typing_delay_ms: TYPING_DELAY_MS,
            font_path: None,
        }
    }
}

impl ConfigFile {
    /// Loads and validates a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or holds invalid settings
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = utils::read(path).await?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        ensure!(
            config.config_version == CONFIG_VERSION,
            "Unsupported config_version {} in config file, expected {}",
            config.config_version,
            CONFIG_VERSION
        );
        ensure!(
            config.meme_copies > 0,
            "Invalid meme_copies in config file: must be at least 1"
        );

        Ok(config)
    }

    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn two() -> NonZeroU32 {
        NonZeroU32::new(2).unwrap()
    }

    #[tokio::test]
    async fn test_config_create_and_load() {
        let dir = TempDir::new().unwrap();
        let home_dir = dir.path().join("roast_home");

        let config = Config::create(&home_dir, "Rs.", NonZeroU32::new(4).unwrap(), None)
            .await
            .unwrap();
        assert_eq!(config.currency_symbol(), "Rs.");
        assert_eq!(config.period_count().get(), 4);
        assert!(config.memes().is_dir());
        assert!(config.config_path().is_file());

        let loaded = Config::load(&home_dir).await.unwrap();
        assert_eq!(loaded.root(), config.root());
        assert_eq!(loaded.config_file, config.config_file);
        assert_eq!(loaded.meme_copies(), 5);
        assert_eq!(loaded.typing_delay(), Duration::from_millis(1500));
        assert!(loaded.font_path().is_none());
    }

    #[tokio::test]
    async fn test_load_missing_home() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(dir.path().join("nope")).await.unwrap_err();
        assert!(err.to_string().contains("roast init"));
    }

    #[tokio::test]
    async fn test_load_missing_memes_dir() {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path(), "₹", two(), None).await.unwrap();
        tokio::fs::remove_dir(config.memes()).await.unwrap();
        let err = Config::load(dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("memes directory is missing"));
    }

    #[test]
    fn test_font_path_resolution() {
        let mut config = Config {
            root: PathBuf::from("/home/me/roast"),
            memes: PathBuf::from("/home/me/roast/.memes"),
            config_path: PathBuf::from("/home/me/roast/config.json"),
            config_file: ConfigFile::default(),
        };
        config.config_file.font_path = Some(PathBuf::from("fonts/emoji.ttf"));
        assert_eq!(
            config.font_path(),
            Some(PathBuf::from("/home/me/roast/fonts/emoji.ttf"))
        );
        config.config_file.font_path = Some(PathBuf::from("/usr/share/fonts/emoji.ttf"));
        assert_eq!(
            config.font_path(),
            Some(PathBuf::from("/usr/share/fonts/emoji.ttf"))
        );
    }

    #[tokio::test]
    async fn test_default_face_is_bitmap() {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path(), "₹", two(), None).await.unwrap();
        assert_eq!(config.face().await.unwrap().name(), "font8x8");
    }

    #[tokio::test]
    async fn test_missing_font_is_an_error() {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path(), "₹", two(), Some(PathBuf::from("missing.ttf")))
            .await
            .unwrap();
        assert!(config.renderer().await.is_err());
    }

    #[tokio::test]
    async fn test_config_file_load_with_minimal_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        utils::write(&path, r#"{"app_name": "roast", "config_version": 1}"#)
            .await
            .unwrap();
        let config = ConfigFile::load(&path).await.unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[tokio::test]
    async fn test_config_file_load_invalid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        utils::write(&path, r#"{"app_name": "tiller", "config_version": 1}"#)
            .await
            .unwrap();
        let err = ConfigFile::load(&path).await.unwrap_err();
        assert!(err.to_string().contains("Invalid app_name"));

        utils::write(
            &path,
            r#"{"app_name": "roast", "config_version": 1, "period_count": 0}"#,
        )
        .await
        .unwrap();
        assert!(ConfigFile::load(&path).await.is_err());

        utils::write(
            &path,
            r#"{"app_name": "roast", "config_version": 1, "meme_copies": 0}"#,
        )
        .await
        .unwrap();
        let err = ConfigFile::load(&path).await.unwrap_err();
        assert!(err.to_string().contains("meme_copies"));
    }

    #[test]
    fn test_serialization_omits_font_path() {
        let json = serde_json::to_string(&ConfigFile::default()).unwrap();
        assert!(!json.contains("font_path"));
        assert!(json.contains("\"period_count\":2"));
    }
}
