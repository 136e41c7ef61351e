use rain_core::SignalFrame;

// Loud for 4 s, quiet for 6 s, so the cleaner gets a chance to run.
const LOUD_TICKS: u64 = 240;
const CYCLE_TICKS: u64 = 600;

/// Deterministic stand-in for captured audio.
pub fn synthetic_signal(tick: u64) -> SignalFrame {
    let phase = tick % CYCLE_TICKS;
    if phase >= LOUD_TICKS {
        return SignalFrame::SILENT;
    }
    let t = tick as f32 / 60.0;
    let beat = ((t * std::f32::consts::TAU * 2.0).sin() * 0.5 + 0.5).powi(4);
    SignalFrame::new(0.08 + 0.35 * beat, beat)
}
