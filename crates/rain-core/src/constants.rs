use glam::Vec3;

// Shared scene tuning constants. All motion values are per tick at a fixed 60 Hz.

// Clock
pub const TICKS_PER_SEC: f32 = 60.0;
pub const TICK_MS: f64 = 1000.0 / 60.0; // elapsed milliseconds represented by one tick

// World layout
pub const FLOOR_Y: f32 = -15.0; // ground plane height
pub const WORLD_HALF_EXTENT: f32 = 400.0; // live particles past this horizontal distance are dropped

// Spawning
pub const SPAWN_ALTITUDE: f32 = 60.0;
pub const MAX_VOLUME: f32 = 1.0; // analyser volume is mean/255, so 1 is full scale
pub const SPAWN_SPREAD_X: f32 = 250.0; // full width of the spawn rectangle
pub const SPAWN_SPREAD_Z: f32 = 150.0; // full depth of the spawn rectangle
pub const BURST_SPAWN_THRESHOLD: f32 = 0.02;
pub const TRICKLE_SPAWN_THRESHOLD: f32 = 0.01;
pub const BURST_SPAWN_RATE: f32 = 4.0; // k in floor(v * k) + 1
pub const MAX_BURST_DROPS: usize = 32; // per-tick ceiling on reactive drops
pub const AMBIENT_SPAWN_CHANCE: f32 = 0.05; // per-tick chance of an audio-independent drop
pub const BASE_FALL_SPEED: f32 = 0.3;
pub const GLYPH_SIZE_MIN: f32 = 1.5;
pub const GLYPH_SIZE_SPAN: f32 = 2.0;
pub const GLYPH_ALPHABET: [char; 10] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

// Floating body (laptop)
pub const BODY_RADIUS: f32 = 14.0;
pub const BODY_BAND_HALF_HEIGHT: f32 = 2.0; // collision band is center +/- this
pub const BODY_BOB_AMPLITUDE: f32 = 2.0;
pub const BODY_BOB_RATE_PER_MS: f64 = 0.002;
pub const BODY_BASS_LIFT: f32 = 2.0;
pub const BODY_SPIN_PER_TICK: f32 = 0.005;

// Deflection
pub const DEFLECT_OUTWARD_SPEED: f32 = 0.8;
pub const DEFLECT_BOUNCE_SPEED: f32 = 0.5;
pub const DEFLECT_GRAVITY: f32 = 0.05;
pub const IMPACT_EASE: f32 = 0.8; // impact glow multiplier per tick
pub const IMPACT_CUTOFF: f32 = 0.05; // glow below this reads as default tint

// Resting
pub const SETTLE_JITTER: f32 = 1.0; // landing height is floor + [0, jitter)
pub const RESTING_CAP: usize = 1000;
pub const DECAY_LIFE_TICKS: u32 = 600;
pub const DECAY_FADE_PER_TICK: f32 = 0.02;
pub const FADE_EPSILON: f32 = 1e-4; // intensity at or below this counts as fully faded

// Sweep agent (cleaning car)
pub const IDLE_TICKS_BEFORE_SWEEP: u32 = 180;
pub const SWEEP_PARK_X: f32 = -150.0; // off-screen rest position
pub const SWEEP_START_X: f32 = -100.0;
pub const SWEEP_END_X: f32 = 100.0;
pub const SWEEP_STEP: f32 = 1.0;
pub const SWEEP_BLADE_OFFSET: f32 = 10.0; // blade sits this far ahead of the agent
pub const SWEEP_WINDOW: f32 = 10.0; // width of the swept strip behind the blade
pub const SWEEP_NUDGE: f32 = 2.0;
pub const SWEEP_HOP: f32 = 1.0; // max upward jitter per swept tick
pub const SWEEP_FADE_PER_TICK: f32 = 0.1;
pub const SWEEP_RIDE_HEIGHT: f32 = 3.5;
pub const SWEEP_VIBRATION_AMPLITUDE: f32 = 0.2;
pub const SWEEP_VIBRATION_RATE_PER_MS: f64 = 0.5;
pub const SWEEP_WHEEL_SPIN_PER_TICK: f32 = 0.3;

// Color cycling
pub const HUE_STEP: f32 = 0.005;
pub const HUE_BASS_STEP: f32 = 0.02;

// Analyser (matches a 256-point web audio analyser)
pub const ANALYSER_FFT_SIZE: usize = 256;
pub const ANALYSER_BASS_BIN: usize = 5;
pub const ANALYSER_MIN_DB: f32 = -100.0;
pub const ANALYSER_MAX_DB: f32 = -30.0;
pub const ANALYSER_SMOOTHING: f32 = 0.8;

// Ground text box (text scene preset)
pub const TEXT_BOX_MIN: [f32; 3] = [-35.0, -12.0, 15.0];
pub const TEXT_BOX_MAX: [f32; 3] = [35.0, -4.0, 25.0];

// Tints handed to renderers (rgb)
pub const TINT_DEFAULT: [f32; 3] = [0.0, 1.0, 0.0];
pub const TINT_IMPACT: [f32; 3] = [1.0, 1.0, 1.0];
pub const TINT_SETTLED: [f32; 3] = [0.0, 0.267, 0.0];
pub const TINT_MARKED: [f32; 3] = [0.0, 0.6, 0.4]; // resting on the text box

#[inline]
pub fn text_box_min() -> Vec3 {
    Vec3::from(TEXT_BOX_MIN)
}

#[inline]
pub fn text_box_max() -> Vec3 {
    Vec3::from(TEXT_BOX_MAX)
}
