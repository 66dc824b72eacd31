use log::debug;

use crate::synth::{synthesize, SynthError, ToneRequest};

/// One entry of a phrase: pitch in hertz and length in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub frequency: f64,
    pub duration: f64,
}

impl Note {
    pub const fn new(frequency: f64, duration: f64) -> Self {
        Self {
            frequency,
            duration,
        }
    }
}

/// Render every note of `phrase` back to back, then repeat the whole phrase
/// `loop_count` times.
///
/// Notes are joined sample-to-sample with no gap or crossfade. Each note starts its own
/// oscillator cycle, so boundaries may click.
pub fn compose(
    phrase: &[Note],
    loop_count: usize,
    volume: f64,
    sample_rate: u32,
) -> Result<Vec<i16>, SynthError> {
    let mut once = Vec::new();
    for note in phrase {
        let request = ToneRequest::new(note.frequency, note.duration)
            .with_sample_rate(sample_rate)
            .with_volume(volume);
        once.extend(synthesize(&request)?);
    }

    debug!(
        "composed {} notes into {} frames, looping {} times",
        phrase.len(),
        once.len(),
        loop_count
    );
    Ok(once.repeat(loop_count))
}
