//! Serialization of sample buffers into WAV files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::Error;

pub const CHANNELS: u16 = 1;
pub const BITS_PER_SAMPLE: u16 = 16;

/// Container description shared by every asset: mono, signed 16-bit little-endian PCM.
pub fn wav_spec(frame_rate: u32) -> hound::WavSpec {
    hound::WavSpec {
        channels: CHANNELS,
        sample_rate: frame_rate,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: hound::SampleFormat::Int,
    }
}

/// Destination for rendered sample buffers.
pub trait WaveSink {
    /// Store `samples` under `file_name`, returning where they ended up.
    fn write(&mut self, file_name: &str, frame_rate: u32, samples: &[i16])
        -> Result<PathBuf, Error>;
}

/// Writes WAV files beneath a root directory.
#[derive(Debug)]
pub struct WavDirectory {
    root: PathBuf,
}

impl WavDirectory {
    /// Create `root` (and any missing parents) if needed.
    pub fn create(root: impl Into<PathBuf>) -> Result<Self, Error> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| Error::CreateDir {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl WaveSink for WavDirectory {
    fn write(
        &mut self,
        file_name: &str,
        frame_rate: u32,
        samples: &[i16],
    ) -> Result<PathBuf, Error> {
        let path = self.root.join(file_name);
        if let Err(source) = write_wav(&path, wav_spec(frame_rate), samples) {
            return Err(Error::Wav { path, source });
        }

        info!("wrote {} ({} frames)", path.display(), samples.len());
        Ok(path)
    }
}

// Only a file this call managed to create is removed on failure; a failed `create`
// leaves whatever was at `path` untouched.
fn write_wav(path: &Path, spec: hound::WavSpec, samples: &[i16]) -> Result<(), hound::Error> {
    let writer = hound::WavWriter::create(path, spec)?;
    if let Err(err) = write_samples(writer, samples) {
        if let Err(remove_err) = fs::remove_file(path) {
            warn!(
                "could not remove partial file {}: {}",
                path.display(),
                remove_err
            );
        }
        return Err(err);
    }
    Ok(())
}

// The writer is finalized on success and dropped (closing the file) on error.
fn write_samples<W>(mut writer: hound::WavWriter<W>, samples: &[i16]) -> Result<(), hound::Error>
where
    W: io::Write + io::Seek,
{
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()
}

/// A rendered buffer captured by [`MemorySink`].
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedWave {
    pub file_name: String,
    pub frame_rate: u32,
    pub samples: Vec<i16>,
}

/// Keeps every write in memory instead of touching the filesystem.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub waves: Vec<CapturedWave>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, file_name: &str) -> Option<&CapturedWave> {
        self.waves.iter().find(|wave| wave.file_name == file_name)
    }
}

impl WaveSink for MemorySink {
    fn write(
        &mut self,
        file_name: &str,
        frame_rate: u32,
        samples: &[i16],
    ) -> Result<PathBuf, Error> {
        self.waves.push(CapturedWave {
            file_name: file_name.to_owned(),
            frame_rate,
            samples: samples.to_vec(),
        });
        Ok(PathBuf::from(file_name))
    }
}
