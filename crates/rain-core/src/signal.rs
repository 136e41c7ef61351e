//! Audio signal reduced to the two scalars the simulation consumes.
//!
//! Capture happens outside the core. A front-end either hands over byte-valued
//! frequency bins (as a browser analyser produces them) or raw samples through
//! [`SpectrumAnalyzer`], which reproduces the analyser's dB mapping and
//! smoothing so both paths yield comparable `volume`/`bass` values.

use rustfft::{num_complex::Complex, FftPlanner};

use crate::constants::*;

/// One tick of audio input.
///
/// - `volume`: mean spectrum energy, 0..=`MAX_VOLUME` once sanitized
/// - `bass`: energy of a single low-frequency bin, 0..1
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SignalFrame {
    pub volume: f32,
    pub bass: f32,
}

impl SignalFrame {
    /// Degraded source: capture not granted yet, or ended.
    pub const SILENT: SignalFrame = SignalFrame {
        volume: 0.0,
        bass: 0.0,
    };

    pub fn new(volume: f32, bass: f32) -> Self {
        Self { volume, bass }
    }

    /// Clamp NaN, infinities and negatives to zero and cap both scalars, so
    /// out-of-range input never reaches spawn counts or velocities.
    pub fn sanitized(self) -> Self {
        Self {
            volume: finite_non_negative(self.volume).min(MAX_VOLUME),
            bass: finite_non_negative(self.bass).min(1.0),
        }
    }

    /// Reduce analyser byte bins: `bass = bins[5] / 255`, `volume = mean / 255`.
    pub fn from_byte_bins(bins: &[u8]) -> Self {
        if bins.is_empty() {
            return Self::SILENT;
        }
        let sum: u32 = bins.iter().map(|&b| b as u32).sum();
        let volume = sum as f32 / bins.len() as f32 / 255.0;
        let bass = bins
            .get(ANALYSER_BASS_BIN)
            .map(|&b| b as f32 / 255.0)
            .unwrap_or(0.0);
        Self { volume, bass }
    }
}

#[inline]
fn finite_non_negative(v: f32) -> f32 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

/// FFT analyser producing byte frequency bins from time-domain samples.
///
/// Follows a web audio analyser: windowed magnitude spectrum, exponential
/// smoothing over time, then a linear map of `[min_db, max_db]` onto `0..=255`.
pub struct SpectrumAnalyzer {
    planner: FftPlanner<f32>,
    fft_size: usize,
    window: Vec<f32>,
    smoothed: Vec<f32>,
    pub smoothing: f32,
    pub min_db: f32,
    pub max_db: f32,
}

impl SpectrumAnalyzer {
    /// `fft_size` must be a power of two; returns `None` otherwise.
    pub fn new(fft_size: usize) -> Option<Self> {
        if fft_size < 2 || !fft_size.is_power_of_two() {
            return None;
        }
        let window = (0..fft_size)
            .map(|i| {
                let t = i as f32 / (fft_size - 1) as f32;
                0.5 * (1.0 - (2.0 * std::f32::consts::PI * t).cos())
            })
            .collect();
        Some(Self {
            planner: FftPlanner::new(),
            fft_size,
            window,
            smoothed: vec![0.0; fft_size / 2],
            smoothing: ANALYSER_SMOOTHING,
            min_db: ANALYSER_MIN_DB,
            max_db: ANALYSER_MAX_DB,
        })
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    pub fn bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Analyse the most recent `fft_size` samples; shorter input is zero-padded
    /// at the front.
    pub fn byte_frequency_data(&mut self, samples: &[f32], out: &mut Vec<u8>) {
        let n = self.fft_size;
        let take = samples.len().min(n);
        let pad = n - take;
        let recent = &samples[samples.len() - take..];

        let mut buffer: Vec<Complex<f32>> = vec![Complex::new(0.0, 0.0); n];
        for (i, s) in recent.iter().enumerate() {
            let s = if s.is_finite() { *s } else { 0.0 };
            buffer[pad + i] = Complex::new(s * self.window[pad + i], 0.0);
        }
        let fft = self.planner.plan_fft_forward(n);
        fft.process(&mut buffer);

        let k = self.smoothing.clamp(0.0, 1.0);
        let span = (self.max_db - self.min_db).max(f32::EPSILON);
        out.clear();
        out.reserve(n / 2);
        for (i, c) in buffer[..n / 2].iter().enumerate() {
            let mag = c.norm() / n as f32;
            self.smoothed[i] = k * self.smoothed[i] + (1.0 - k) * mag;
            let db = 20.0 * self.smoothed[i].max(1e-12).log10();
            let scaled = ((db - self.min_db) / span * 255.0).clamp(0.0, 255.0);
            out.push(scaled as u8);
        }
    }

    /// Convenience: samples straight to a [`SignalFrame`].
    pub fn analyse(&mut self, samples: &[f32]) -> SignalFrame {
        let mut bins = Vec::with_capacity(self.bin_count());
        self.byte_frequency_data(samples, &mut bins);
        SignalFrame::from_byte_bins(&bins)
    }

    pub fn reset(&mut self) {
        self.smoothed.iter_mut().for_each(|v| *v = 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_inputs_become_zero() {
        let f = SignalFrame::new(f32::NAN, f32::NEG_INFINITY).sanitized();
        assert_eq!(f, SignalFrame::SILENT);
        let f = SignalFrame::new(-0.3, 3.0).sanitized();
        assert_eq!(f.volume, 0.0);
        assert_eq!(f.bass, 1.0);
    }

    #[test]
    fn rejects_non_power_of_two_sizes() {
        assert!(SpectrumAnalyzer::new(300).is_none());
        assert!(SpectrumAnalyzer::new(256).is_some());
    }
}
