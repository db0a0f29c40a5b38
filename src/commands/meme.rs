use crate::args::MemeArgs;
use crate::commands::Out;
use crate::meme::{MemeContent, MemeRenderer};
use crate::source::{MockTransactions, TransactionSource};
use crate::{utils, Config, Result};
use anyhow::Context;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

/// What `roast meme` produced.
#[derive(Debug, Clone, Serialize)]
pub struct MemeOut {
    /// The seed that reproduces this meme with `--seed`.
    pub seed: u64,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub bytes: usize,
    pub content: MemeContent,
}

/// Renders a meme about the latest transaction and writes it to `--out`, or to the gallery when
/// no output path is given.
pub async fn meme(config: Config, args: &MemeArgs) -> Result<Out<MemeOut>> {
    let renderer = config.renderer().await?;
    roast_latest(&config, &renderer, &MockTransactions, args).await
}

async fn roast_latest(
    config: &Config,
    renderer: &MemeRenderer,
    source: &dyn TransactionSource,
    args: &MemeArgs,
) -> Result<Out<MemeOut>> {
    let latest = source
        .latest()
        .context("There are no transactions to roast")?;

    let seed = args.seed().unwrap_or_else(rand::random);
    debug!("Drawing a meme for transaction {} with seed {seed}", latest.id());
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let image = renderer
        .render(&latest, &mut rng)
        .context("Failed to generate meme")?;

    let path = match args.out() {
        Some(out) => {
            utils::write(out, image.png()).await?;
            out.to_path_buf()
        }
        None => config.gallery().save(&image).await?,
    };

    if args.data_uri() {
        println!("{}", image.to_data_uri());
    }

    let structure = MemeOut {
        seed,
        path,
        width: image.width(),
        height: image.height(),
        bytes: image.png().len(),
        content: image.content().clone(),
    };
    Ok(Out::new(
        format!(
            "{} {} (saved to '{}')",
            structure.content.emoji,
            structure.content.roast,
            structure.path.display()
        ),
        structure,
    ))
}
