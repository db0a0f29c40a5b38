//! Rotating storage for rendered memes.

use crate::meme::MemeImage;
use crate::{utils, Config, Result};
use anyhow::Context;
use chrono::Local;
use std::path::PathBuf;

/// Prefix for meme files.
pub const MEME: &str = "meme";

const PNG: &str = "png";

/// Saves memes into the gallery directory, keeping only the newest `copies` of them.
///
/// Create a new instance via `Config::gallery()` or `Gallery::new()`.
#[derive(Debug, Clone)]
pub struct Gallery {
    dir: PathBuf,
    copies: u32,
}

impl Gallery {
    pub fn new(config: &Config) -> Self {
        Self {
            dir: config.memes().to_path_buf(),
            copies: config.meme_copies(),
        }
    }

    /// Writes `image` as `meme.YYYY-MM-DD-NNN.png`, where NNN is a sequence number, then deletes
    /// the oldest memes beyond the configured number of copies.
    ///
    /// Returns the path to the new file.
    pub async fn save(&self, image: &MemeImage) -> Result<PathBuf> {
        let date = today();
        let seq = self.next_sequence_number(MEME, &date).await?;
        let path = self.dir.join(format!("{MEME}.{date}-{seq:03}.{PNG}"));
        utils::write(&path, image.png()).await?;
        self.rotate(MEME).await?;
        Ok(path)
    }

    async fn next_sequence_number(&self, prefix: &str, date: &str) -> Result<u32> {
        let mut max_seq: u32 = 0;
        for name in self.file_names().await? {
            if let Some(seq) = parse_sequence_number(&name, prefix, date) {
                max_seq = max_seq.max(seq);
            }
        }
        Ok(max_seq + 1)
    }

    async fn rotate(&self, prefix: &str) -> Result<()> {
        let mut files: Vec<(String, u32, String)> = self
            .file_names()
            .await?
            .into_iter()
            .filter_map(|name| {
                let (date, seq) = parse_date_and_sequence(&name, prefix)?;
                Some((date.to_string(), seq, name))
            })
            .collect();

        // Oldest first. Sequence numbers are compared as numbers since they can outgrow 3 digits.
        files.sort();

        let to_delete = files.len().saturating_sub(self.copies as usize);
        for (_, _, name) in files.into_iter().take(to_delete) {
            utils::remove(&self.dir.join(name)).await?;
        }
        Ok(())
    }

    async fn file_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut dir = utils::read_dir(&self.dir).await?;
        while let Some(entry) = dir
            .next_entry()
            .await
            .context("Failed to read directory entry")?
        {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
        Ok(names)
    }
}

/// Returns today's date in YYYY-MM-DD format.
fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Parses the sequence number out of `{prefix}.{date}-{NNN}.png`.
fn parse_sequence_number(filename: &str, prefix: &str, date: &str) -> Option<u32> {
    filename
        .strip_prefix(&format!("{prefix}.{date}-"))?
        .strip_suffix(&format!(".{PNG}"))?
        .parse()
        .ok()
}

/// Splits `{prefix}.{date}-{NNN}.png` into its date and sequence number.
fn parse_date_and_sequence<'a>(filename: &'a str, prefix: &str) -> Option<(&'a str, u32)> {
    let (date, seq) = filename
        .strip_prefix(prefix)?
        .strip_prefix('.')?
        .strip_suffix(&format!(".{PNG}"))?
        .rsplit_once('-')?;
    Some((date, seq.parse().ok()?))
}
