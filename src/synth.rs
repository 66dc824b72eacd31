//! Square-wave tone synthesis.
//!
//! The oscillator has no phase state: for every sample index the local period is derived
//! from the instantaneous frequency, and the sample is high for the first half of that
//! period and low for the rest. A sweep therefore changes pitch from one sample to the
//! next without any phase bookkeeping.

use log::debug;
use thiserror::Error;

/// Frame rate of every asset this crate produces.
pub const SAMPLE_RATE: u32 = 44100;

/// Pitch increase of a sweeping tone, per second of elapsed samples.
pub const SWEEP_HZ_PER_SECOND: f64 = 500.0;

/// Largest magnitude a level may take. `i16::MIN` is left unused so both levels are
/// symmetric.
pub const FULL_SCALE: f64 = 32767.0;

pub const DEFAULT_VOLUME: f64 = 0.5;

/// Longest buffer a single request may ask for.
pub const MAX_FRAMES: usize = isize::MAX as usize / std::mem::size_of::<i16>();

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthError {
    #[error("frequency must be a positive number of hertz, got {0}")]
    InvalidFrequency(f64),
    #[error("duration must be zero or a positive number of seconds, got {0}")]
    InvalidDuration(f64),
    #[error("sample rate must be positive")]
    ZeroSampleRate,
    #[error("volume must be a finite number, got {0}")]
    InvalidVolume(f64),
    #[error("{duration} s at {sample_rate} Hz is more than {max} frames", max = MAX_FRAMES)]
    TooManyFrames { duration: f64, sample_rate: u32 },
    #[error("frequency {frequency} Hz is not below the sample rate of {sample_rate} Hz")]
    FrequencyAboveSampleRate { frequency: f64, sample_rate: u32 },
    #[error("sweep reaches {peak} Hz, which is not below the sample rate of {sample_rate} Hz")]
    SweepAboveSampleRate { peak: f64, sample_rate: u32 },
}

/// Parameters of a single tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneRequest {
    pub frequency: f64,
    pub duration: f64,
    pub sample_rate: u32,
    pub volume: f64,
    pub sweep: bool,
}

impl ToneRequest {
    pub const fn new(frequency: f64, duration: f64) -> Self {
        Self {
            frequency,
            duration,
            sample_rate: SAMPLE_RATE,
            volume: DEFAULT_VOLUME,
            sweep: false,
        }
    }

    pub const fn with_sample_rate(self, sample_rate: u32) -> Self {
        Self {
            sample_rate,
            ..self
        }
    }

    pub const fn with_volume(self, volume: f64) -> Self {
        Self { volume, ..self }
    }

    pub const fn with_sweep(self, sweep: bool) -> Self {
        Self { sweep, ..self }
    }

    /// Number of frames the tone occupies: `floor(sample_rate * duration)`.
    pub fn frame_count(&self) -> usize {
        (self.sample_rate as f64 * self.duration).floor() as usize
    }

    /// Frequency in effect at sample `index`.
    pub fn instantaneous_frequency(&self, index: usize) -> f64 {
        if self.sweep {
            self.frequency + (index as f64 / self.sample_rate as f64) * SWEEP_HZ_PER_SECOND
        } else {
            self.frequency
        }
    }

    /// Oscillator period, in whole samples, at sample `index`.
    pub fn period_at(&self, index: usize) -> usize {
        (self.sample_rate as f64 / self.instantaneous_frequency(index)).floor() as usize
    }

    /// The (high, low) sample pair, saturated to `FULL_SCALE`.
    pub fn levels(&self) -> (i16, i16) {
        (quantize(self.volume), quantize(-self.volume))
    }

    pub fn validate(&self) -> Result<(), SynthError> {
        if !self.frequency.is_finite() || self.frequency <= 0.0 {
            return Err(SynthError::InvalidFrequency(self.frequency));
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(SynthError::InvalidDuration(self.duration));
        }
        if self.sample_rate == 0 {
            return Err(SynthError::ZeroSampleRate);
        }
        if self.sample_rate as f64 * self.duration >= MAX_FRAMES as f64 {
            return Err(SynthError::TooManyFrames {
                duration: self.duration,
                sample_rate: self.sample_rate,
            });
        }
        if !self.volume.is_finite() {
            return Err(SynthError::InvalidVolume(self.volume));
        }
        if self.frequency >= self.sample_rate as f64 {
            return Err(SynthError::FrequencyAboveSampleRate {
                frequency: self.frequency,
                sample_rate: self.sample_rate,
            });
        }

        // The sweep only rises, so the last sample carries the highest pitch.
        let frames = self.frame_count();
        if self.sweep && frames > 0 {
            let peak = self.instantaneous_frequency(frames - 1);
            if peak >= self.sample_rate as f64 {
                return Err(SynthError::SweepAboveSampleRate {
                    peak,
                    sample_rate: self.sample_rate,
                });
            }
        }
        Ok(())
    }
}

fn quantize(level: f64) -> i16 {
    (level * FULL_SCALE).round().clamp(-FULL_SCALE, FULL_SCALE) as i16
}

/// Render `request` into a buffer of `request.frame_count()` samples.
pub fn synthesize(request: &ToneRequest) -> Result<Vec<i16>, SynthError> {
    request.validate()?;

    let (high, low) = request.levels();
    let samples: Vec<i16> = (0..request.frame_count())
        .map(|i| {
            let period = request.period_at(i);
            // i mod period < period / 2, kept in integers
            if 2 * (i % period) < period {
                high
            } else {
                low
            }
        })
        .collect();

    debug!(
        "synthesized {} Hz for {} s ({} frames, sweep: {})",
        request.frequency,
        request.duration,
        samples.len(),
        request.sweep
    );
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn one_cycle_at_440_hz() {
        let request = ToneRequest::new(440.0, 1.0 / 440.0).with_volume(1.0);
        let samples = synthesize(&request).unwrap();

        assert_eq!(request.period_at(0), 100);
        assert_eq!(samples.len(), 100);
        assert!(samples[..50].iter().all(|&s| s == 32767));
        assert!(samples[50..].iter().all(|&s| s == -32767));
    }

    #[test]
    fn odd_period_stays_high_through_the_middle_sample() {
        // 44100 / 436 = 101.1..., so samples 0..=50 of each 101-sample cycle are high
        let request = ToneRequest::new(436.0, 0.01).with_volume(1.0);
        let samples = synthesize(&request).unwrap();

        assert_eq!(request.period_at(0), 101);
        assert_eq!(samples[..101].iter().filter(|&&s| s > 0).count(), 51);
        assert_eq!(samples[50], 32767);
        assert_eq!(samples[51], -32767);
        assert_eq!(samples[101], 32767);
    }

    #[test]
    fn length_is_floor_of_rate_times_duration() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let sample_rate = rng.gen_range(8000u32..96000);
            let frequency = rng.gen_range(20.0f64..2000.0);
            let duration = rng.gen_range(0.0f64..0.3);
            let request = ToneRequest::new(frequency, duration).with_sample_rate(sample_rate);

            let samples = synthesize(&request).unwrap();
            assert_eq!(
                samples.len(),
                (sample_rate as f64 * duration).floor() as usize,
                "{request:?}"
            );
        }
    }

    #[test]
    fn fixed_tone_uses_exactly_two_levels() {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..100 {
            let volume = rng.gen_range(0.0f64..=1.0);
            let frequency = rng.gen_range(50.0..4000.0);
            let request = ToneRequest::new(frequency, 0.1).with_volume(volume);
            let (high, low) = request.levels();

            assert_eq!(high, (volume * 32767.0).round() as i16);
            assert_eq!(low, (-volume * 32767.0).round() as i16);

            let samples = synthesize(&request).unwrap();
            assert!(samples.iter().all(|&s| s == high || s == low), "{request:?}");
        }
    }

    #[test]
    fn synthesis_is_repeatable() {
        let request = ToneRequest::new(800.0, 0.2).with_volume(0.2).with_sweep(true);
        assert_eq!(synthesize(&request).unwrap(), synthesize(&request).unwrap());
    }

    #[test]
    fn zero_duration_is_empty() {
        let samples = synthesize(&ToneRequest::new(440.0, 0.0)).unwrap();
        assert!(samples.is_empty());
    }

    #[test]
    fn zero_volume_is_silent() {
        let samples = synthesize(&ToneRequest::new(440.0, 0.05).with_volume(0.0)).unwrap();
        assert_eq!(samples.len(), 2205);
        assert!(samples.iter().all(|&s| s == 0));
    }

    #[test]
    fn sweep_period_never_grows() {
        let request = ToneRequest::new(800.0, 0.2).with_volume(0.2).with_sweep(true);
        let periods: Vec<usize> = (0..request.frame_count())
            .map(|i| request.period_at(i))
            .collect();

        assert_eq!(periods[0], 55);
        assert!(periods.windows(2).all(|w| w[1] <= w[0]));
        assert!(periods.last().unwrap() < &periods[0]);
        assert!((request.instantaneous_frequency(44100) - 1300.0).abs() < 1e-9);
    }

    #[test]
    fn sweep_levels_match_per_sample_period() {
        let request = ToneRequest::new(800.0, 0.2).with_volume(0.2).with_sweep(true);
        let (high, low) = request.levels();
        let samples = synthesize(&request).unwrap();

        for (i, &sample) in samples.iter().enumerate() {
            let period = request.period_at(i);
            let expected = if ((i % period) as f64) < period as f64 / 2.0 {
                high
            } else {
                low
            };
            assert_eq!(sample, expected, "sample {i}");
        }
    }

    #[test]
    fn loud_volume_saturates() {
        let request = ToneRequest::new(440.0, 0.01).with_volume(2.5);
        assert_eq!(request.levels(), (32767, -32767));

        let samples = synthesize(&request).unwrap();
        assert!(samples.iter().all(|&s| s == 32767 || s == -32767));
    }

    #[test]
    fn negative_volume_inverts() {
        let request = ToneRequest::new(440.0, 0.01).with_volume(-0.5);
        assert_eq!(request.levels(), (-16384, 16384));
    }

    #[test]
    fn rejects_bad_parameters() {
        assert_eq!(
            synthesize(&ToneRequest::new(0.0, 1.0)),
            Err(SynthError::InvalidFrequency(0.0))
        );
        assert_eq!(
            synthesize(&ToneRequest::new(-10.0, 1.0)),
            Err(SynthError::InvalidFrequency(-10.0))
        );
        assert!(matches!(
            synthesize(&ToneRequest::new(f64::NAN, 1.0)),
            Err(SynthError::InvalidFrequency(_))
        ));
        assert_eq!(
            synthesize(&ToneRequest::new(440.0, -0.1)),
            Err(SynthError::InvalidDuration(-0.1))
        );
        assert_eq!(
            synthesize(&ToneRequest::new(440.0, 1.0).with_sample_rate(0)),
            Err(SynthError::ZeroSampleRate)
        );
        assert!(matches!(
            synthesize(&ToneRequest::new(440.0, 1.0).with_volume(f64::INFINITY)),
            Err(SynthError::InvalidVolume(_))
        ));
    }

    #[test]
    fn rejects_unallocatable_duration() {
        let request = ToneRequest::new(440.0, 1e20);
        assert_eq!(
            request.validate(),
            Err(SynthError::TooManyFrames {
                duration: 1e20,
                sample_rate: 44100,
            })
        );
        assert!(matches!(
            synthesize(&request),
            Err(SynthError::TooManyFrames { .. })
        ));

        let at_limit = ToneRequest::new(0.5, MAX_FRAMES as f64).with_sample_rate(1);
        assert!(matches!(
            at_limit.validate(),
            Err(SynthError::TooManyFrames { .. })
        ));
    }

    #[test]
    fn rejects_degenerate_period() {
        assert_eq!(
            synthesize(&ToneRequest::new(44100.0, 0.1)),
            Err(SynthError::FrequencyAboveSampleRate {
                frequency: 44100.0,
                sample_rate: 44100,
            })
        );
        assert!(matches!(
            synthesize(&ToneRequest::new(1000.0, 0.1).with_sample_rate(800)),
            Err(SynthError::FrequencyAboveSampleRate { .. })
        ));
    }

    #[test]
    fn rejects_sweep_that_outruns_the_sample_rate() {
        // 1000 Hz + 500 Hz/s * 4 s = 3000 Hz at a 2000 Hz sample rate
        let request = ToneRequest::new(1000.0, 4.0)
            .with_sample_rate(2000)
            .with_sweep(true);
        assert!(matches!(
            synthesize(&request),
            Err(SynthError::SweepAboveSampleRate { sample_rate: 2000, .. })
        ));

        // the same sweep stopped at 1.5 s peaks just under 1750 Hz
        let short = ToneRequest::new(1000.0, 1.5)
            .with_sample_rate(2000)
            .with_sweep(true);
        assert_eq!(synthesize(&short).unwrap().len(), 3000);
    }
}
