use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rain_core::{SignalFrame, SpectrumAnalyzer};

/// Live input capture feeding a rolling mono sample window.
///
/// The stream callback only appends samples; analysis happens on the tick
/// thread so the simulation never waits on the audio device.
pub struct Capture {
    _stream: cpal::Stream,
    ring: Arc<Mutex<VecDeque<f32>>>,
    analyzer: SpectrumAnalyzer,
    scratch: Vec<f32>,
}

impl Capture {
    /// Current signal; silent if the ring is momentarily unavailable.
    pub fn signal(&mut self) -> SignalFrame {
        self.scratch.clear();
        match self.ring.lock() {
            Ok(ring) => self.scratch.extend(ring.iter().copied()),
            Err(_) => return SignalFrame::SILENT,
        }
        self.analyzer.analyse(&self.scratch)
    }
}

/// Open the default input device. Returns `None` (and the scene runs silent)
/// when no device or format is usable.
pub fn start_capture(fft_size: usize) -> Option<Capture> {
    let analyzer = SpectrumAnalyzer::new(fft_size)?;
    let host = cpal::default_host();
    let device = match host.default_input_device() {
        Some(d) => d,
        None => {
            log::warn!("no input device; running with a silent signal");
            return None;
        }
    };
    let config = match device.default_input_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("input config error: {e}; running with a silent signal");
            return None;
        }
    };
    let channels = config.channels() as usize;
    log::info!(
        "capturing from {:?} ({} ch @ {} Hz)",
        device.name().unwrap_or_default(),
        channels,
        config.sample_rate().0
    );

    let ring = Arc::new(Mutex::new(VecDeque::with_capacity(fft_size)));
    let stream_config: cpal::StreamConfig = config.clone().into();
    let stream = match config.sample_format() {
        cpal::SampleFormat::F32 => {
            build_input::<f32>(&device, &stream_config, channels, fft_size, &ring, |s| s)
        }
        cpal::SampleFormat::I16 => build_input::<i16>(
            &device,
            &stream_config,
            channels,
            fft_size,
            &ring,
            |s| s as f32 / i16::MAX as f32,
        ),
        cpal::SampleFormat::U16 => build_input::<u16>(
            &device,
            &stream_config,
            channels,
            fft_size,
            &ring,
            |s| (s as f32 / u16::MAX as f32) * 2.0 - 1.0,
        ),
        other => {
            log::warn!("unsupported sample format {other:?}; running with a silent signal");
            return None;
        }
    };
    let stream = match stream {
        Ok(s) => s,
        Err(e) => {
            log::warn!("failed to open input stream: {e}");
            return None;
        }
    };
    if let Err(e) = stream.play() {
        log::warn!("failed to start input stream: {e}");
        return None;
    }

    Some(Capture {
        _stream: stream,
        ring,
        analyzer,
        scratch: Vec::with_capacity(fft_size),
    })
}

fn build_input<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    window: usize,
    ring: &Arc<Mutex<VecDeque<f32>>>,
    to_f32: fn(T) -> f32,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: cpal::SizedSample + 'static,
{
    let ring = Arc::clone(ring);
    let channels = channels.max(1);
    device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            let Ok(mut ring) = ring.lock() else {
                return;
            };
            // downmix to mono
            for frame in data.chunks(channels) {
                let sum: f32 = frame.iter().map(|&s| to_f32(s)).sum();
                ring.push_back(sum / frame.len() as f32);
            }
            while ring.len() > window {
                ring.pop_front();
            }
        },
        |err| log::error!("audio input error: {err}"),
        None,
    )
}
