use anyhow::Context;
use chiptune_assets::synth::{synthesize, ToneRequest};
use chiptune_assets::writer::{WavDirectory, WaveSink};

const TONE: ToneRequest = ToneRequest::new(440.0, 1.0).with_volume(0.5);

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    let samples = synthesize(&TONE)?;
    let mut sink = WavDirectory::create(".")?;
    let path = sink
        .write("square.wav", TONE.sample_rate, &samples)
        .context("writing preview tone")?;

    println!("Wrote {} samples to {}", samples.len(), path.display());
    Ok(())
}
