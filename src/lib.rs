//! Square-wave synthesis of the retro sound assets used by the block puzzle game.
//!
//! [`synth::synthesize`] renders a single tone, [`composer::compose`] strings tones into
//! a looping track, and [`batch::generate_all`] writes the whole [`manifest::ASSETS`]
//! table to disk.

pub mod batch;
pub mod composer;
pub mod error;
pub mod manifest;
pub mod synth;
pub mod writer;

pub use batch::{generate, generate_all, GeneratedAsset};
pub use error::Error;
pub use synth::{synthesize, SynthError, ToneRequest};
