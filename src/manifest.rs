//! The asset set: file names, tone recipes and the background phrase.

use crate::composer::{compose, Note};
use crate::synth::{synthesize, SynthError, ToneRequest, SAMPLE_RATE};

/// Where the batch tool writes, relative to the working directory.
pub const OUTPUT_DIR: &str = "Assets/Audio";

pub const BGM_VOLUME: f64 = 0.1;
pub const BGM_LOOPS: usize = 4;
pub const SFX_VOLUME: f64 = 0.2;

/// Background melody, one pass.
pub const BGM_PHRASE: [Note; 19] = [
    Note::new(659.25, 0.4),
    Note::new(493.88, 0.2),
    Note::new(523.25, 0.2),
    Note::new(587.33, 0.4),
    Note::new(523.25, 0.2),
    Note::new(493.88, 0.2),
    Note::new(440.00, 0.4),
    Note::new(440.00, 0.2),
    Note::new(523.25, 0.2),
    Note::new(659.25, 0.4),
    Note::new(587.33, 0.2),
    Note::new(523.25, 0.2),
    Note::new(493.88, 0.4),
    Note::new(523.25, 0.2),
    Note::new(587.33, 0.2),
    Note::new(659.25, 0.4),
    Note::new(523.25, 0.4),
    Note::new(440.00, 0.4),
    Note::new(440.00, 0.4),
];

const fn effect(frequency: f64, duration: f64) -> ToneRequest {
    ToneRequest::new(frequency, duration).with_volume(SFX_VOLUME)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Recipe {
    /// A phrase rendered note by note and looped.
    Track {
        phrase: &'static [Note],
        loops: usize,
        volume: f64,
    },
    /// A single tone.
    Effect(ToneRequest),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Asset {
    pub file_name: &'static str,
    pub recipe: Recipe,
}

pub const ASSETS: [Asset; 6] = [
    Asset {
        file_name: "bgm.wav",
        recipe: Recipe::Track {
            phrase: &BGM_PHRASE,
            loops: BGM_LOOPS,
            volume: BGM_VOLUME,
        },
    },
    Asset {
        file_name: "move.wav",
        recipe: Recipe::Effect(effect(400.0, 0.05)),
    },
    Asset {
        file_name: "rotate.wav",
        recipe: Recipe::Effect(effect(600.0, 0.05)),
    },
    Asset {
        file_name: "lock.wav",
        recipe: Recipe::Effect(effect(300.0, 0.1)),
    },
    Asset {
        file_name: "clear.wav",
        recipe: Recipe::Effect(effect(800.0, 0.2).with_sweep(true)),
    },
    Asset {
        file_name: "gameover.wav",
        recipe: Recipe::Effect(effect(150.0, 0.5)),
    },
];

impl Recipe {
    pub fn frame_rate(&self) -> u32 {
        match self {
            Recipe::Track { .. } => SAMPLE_RATE,
            Recipe::Effect(request) => request.sample_rate,
        }
    }

    pub fn render(&self) -> Result<Vec<i16>, SynthError> {
        match *self {
            Recipe::Track {
                phrase,
                loops,
                volume,
            } => compose(phrase, loops, volume, SAMPLE_RATE),
            Recipe::Effect(request) => synthesize(&request),
        }
    }
}

impl Asset {
    pub fn render(&self) -> Result<Vec<i16>, SynthError> {
        self.recipe.render()
    }
}
