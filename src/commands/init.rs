use crate::args::InitArgs;
use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Creates the data directory, the meme gallery and an initial `config.json` file.
///
/// # Arguments
/// - `roast_home` - The directory that will be the root of data directory, e.g. `$HOME/roast`
/// - `args` - Settings written to `config.json`
///
/// # Errors
/// - Returns an error if any file operations fail.
/// Returns the canonical path of the new home directory.
pub async fn init(roast_home: &Path, args: &InitArgs) -> Result<Out<PathBuf>> {
    let config = Config::create(
        roast_home,
        args.currency_symbol(),
        args.period_count(),
        args.font_path().map(Path::to_path_buf),
    )
    .await
    .context("Unable to create the data directory and configs")?;

    if config.font_path().is_some() {
        config
            .face()
            .await
            .context("The config was written but the font could not be loaded")?;
    }

    let root = config.root().to_path_buf();
    Ok(Out::new(
        format!(
            "Successfully created the roast directory at '{}'",
            root.display()
        ),
        root,
    ))
}
