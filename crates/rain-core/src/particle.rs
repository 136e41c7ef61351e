use glam::Vec3;

use crate::constants::*;

/// Stable handle for a particle, unique within one simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub u64);

/// Index into [`GLYPH_ALPHABET`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Glyph(pub u8);

impl Glyph {
    pub fn as_char(self) -> char {
        GLYPH_ALPHABET
            .get(self.0 as usize)
            .copied()
            .unwrap_or(GLYPH_ALPHABET[0])
    }
}

/// Where a particle is in its life.
///
/// Legal transitions:
/// `Falling -> Deflected`, `Falling | Deflected -> Resting`,
/// `Resting -> Decaying`, and removal from `Decaying` (or by eviction).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Falling,
    /// Bounced off the floating body; deflection cannot happen again.
    Deflected,
    Resting,
    Decaying,
}

impl Lifecycle {
    pub fn is_live(self) -> bool {
        matches!(self, Lifecycle::Falling | Lifecycle::Deflected)
    }
}

/// Visual tag a renderer maps to a color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
    Default,
    Impact,
    Settled,
    /// Resting on the ground-level text box.
    Marked,
    Decaying,
}

impl Tint {
    pub fn rgb(self) -> [f32; 3] {
        match self {
            Tint::Default => TINT_DEFAULT,
            Tint::Impact => TINT_IMPACT,
            Tint::Settled | Tint::Decaying => TINT_SETTLED,
            Tint::Marked => TINT_MARKED,
        }
    }
}

/// A single rain glyph.
///
/// Fields:
/// - `impact`: glow left by a deflection, eased toward zero every tick
/// - `intensity`: opacity, 1 at spawn, driven to 0 while `Decaying`
/// - `remaining_life`: ticks left before a resting particle starts decaying
///   (only set under the decay lifecycle policy)
#[derive(Clone, Debug)]
pub struct Particle {
    pub id: ParticleId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub state: Lifecycle,
    pub tint: Tint,
    pub impact: f32,
    pub intensity: f32,
    pub remaining_life: Option<u32>,
    pub glyph: Glyph,
    pub size: f32,
}

impl Particle {
    pub fn falling(id: ParticleId, position: Vec3, fall_speed: f32, glyph: Glyph, size: f32) -> Self {
        Self {
            id,
            position,
            velocity: Vec3::new(0.0, -fall_speed, 0.0),
            state: Lifecycle::Falling,
            tint: Tint::Default,
            impact: 0.0,
            intensity: 1.0,
            remaining_life: None,
            glyph,
            size,
        }
    }

    /// Fade by `amount`; returns true once fully transparent.
    pub fn fade(&mut self, amount: f32) -> bool {
        self.intensity = (self.intensity - amount).max(0.0);
        self.intensity <= FADE_EPSILON
    }
}
