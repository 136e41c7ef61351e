use crate::constants::*;

/// Bass-driven hue rotation for the floating body's glow.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HueCycle {
    pub hue: f32,
}

impl HueCycle {
    pub fn advance(&mut self, bass: f32) {
        self.hue += HUE_STEP + bass * HUE_BASS_STEP;
        if self.hue > 1.0 {
            self.hue = 0.0;
        }
    }

    /// Frame glow and point light color.
    pub fn glow_rgb(&self) -> [f32; 3] {
        hsl_to_rgb(self.hue, 1.0, 0.5)
    }

    /// Screen color, opposite the glow on the color wheel.
    pub fn screen_rgb(&self) -> [f32; 3] {
        hsl_to_rgb((self.hue + 0.5) % 1.0, 1.0, 0.5)
    }
}

pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    if s <= 0.0 {
        return [l, l, l];
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    ]
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
