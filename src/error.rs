use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::synth::SynthError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot synthesize {asset}")]
    Synth {
        asset: String,
        #[source]
        source: SynthError,
    },
    #[error("cannot create output directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write {}", path.display())]
    Wav {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },
}
