use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::Error;
use crate::manifest::{Asset, ASSETS};
use crate::writer::{WavDirectory, WaveSink};

/// One file produced by a batch run.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedAsset {
    pub file_name: &'static str,
    pub path: PathBuf,
    pub frames: usize,
}

/// Render every asset, then hand each buffer to `sink`.
///
/// All buffers are rendered before the first write, so a bad recipe fails the batch
/// without producing any file. The first write error aborts the rest.
pub fn generate<S: WaveSink>(
    assets: &[Asset],
    sink: &mut S,
) -> Result<Vec<GeneratedAsset>, Error> {
    let mut rendered = Vec::with_capacity(assets.len());
    for asset in assets {
        let samples = asset.render().map_err(|source| Error::Synth {
            asset: asset.file_name.to_owned(),
            source,
        })?;
        debug!("rendered {} ({} frames)", asset.file_name, samples.len());
        rendered.push((asset, samples));
    }

    let mut generated = Vec::with_capacity(rendered.len());
    for (asset, samples) in rendered {
        let path = sink.write(asset.file_name, asset.recipe.frame_rate(), &samples)?;
        generated.push(GeneratedAsset {
            file_name: asset.file_name,
            path,
            frames: samples.len(),
        });
    }

    info!("generated {} assets", generated.len());
    Ok(generated)
}

/// Write the full asset set as WAV files beneath `output_dir`, creating it if needed.
pub fn generate_all(output_dir: impl AsRef<Path>) -> Result<Vec<GeneratedAsset>, Error> {
    let mut sink = WavDirectory::create(output_dir.as_ref())?;
    generate(&ASSETS, &mut sink)
}
