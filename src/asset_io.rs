//! File-backed preloading for images and audio.

use anyhow::{Context, Result};
use rodio::Decoder;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;
use unroll_core::assets::{AssetDescriptor, AssetKind, AssetOutcome};
use unroll_core::image_scroller::ImageMetrics;

/// What the host learned from one load attempt.
#[derive(Debug, Clone)]
pub struct LoadedAsset {
    pub outcome: AssetOutcome,
    /// Natural dimensions, for images that decoded.
    pub metrics: Option<ImageMetrics>,
}

pub fn resolve(root: &Path, source: &str) -> PathBuf {
    root.join(source)
}

/// Load one asset fully. Failures come back as `AssetOutcome::Failed`, never
/// as an error, so a broken file only degrades the page.
pub async fn load_asset(root: PathBuf, descriptor: AssetDescriptor) -> LoadedAsset {
    load_blocking(&root, &descriptor)
}

fn load_blocking(root: &Path, descriptor: &AssetDescriptor) -> LoadedAsset {
    let path = resolve(root, &descriptor.source);
    let result = match descriptor.kind {
        AssetKind::Image => decode_image(&path).map(Some),
        AssetKind::Audio => probe_audio(&path).map(|()| None),
    };
    match result {
        Ok(metrics) => {
            debug!(path = %path.display(), ?metrics, "Asset loaded");
            LoadedAsset {
                outcome: AssetOutcome::Loaded,
                metrics: metrics.flatten(),
            }
        }
        Err(err) => LoadedAsset {
            outcome: AssetOutcome::Failed(format!("{err:#}")),
            metrics: None,
        },
    }
}

fn decode_image(path: &Path) -> Result<Option<ImageMetrics>> {
    let decoded =
        image::open(path).with_context(|| format!("Decoding image {}", path.display()))?;
    Ok(ImageMetrics::new(decoded.width() as f32, decoded.height() as f32))
}

fn probe_audio(path: &Path) -> Result<()> {
    let file = File::open(path).with_context(|| format!("Opening audio {}", path.display()))?;
    Decoder::new(BufReader::new(file))
        .with_context(|| format!("Decoding audio {}", path.display()))?;
    Ok(())
}
