use fnv::FnvHashMap;
use rain_core::{Glyph, ParticleId, Simulation, TickReport};

const STATS_EVERY_TICKS: u64 = 120;

/// Stand-in renderer: keeps a sprite table in sync with tick reports and
/// logs what a frame would show.
#[derive(Default)]
pub struct HeadlessPresenter {
    sprites: FnvHashMap<ParticleId, Glyph>,
    peak_sprites: usize,
    passes: u32,
}

impl HeadlessPresenter {
    pub fn present(&mut self, sim: &Simulation, report: &TickReport) {
        for id in &report.spawned {
            if let Some(p) = sim.registry().get(*id) {
                self.sprites.insert(*id, p.glyph);
            }
        }
        for id in &report.removed {
            self.sprites.remove(id);
        }
        self.peak_sprites = self.peak_sprites.max(self.sprites.len());
        if report.sweep_finished {
            self.passes += 1;
        }
        if report.sweep_started || report.sweep_finished || report.sweep_cancelled {
            log::info!(
                "[tick {}] sweep started={} finished={} cancelled={}",
                report.tick,
                report.sweep_started,
                report.sweep_finished,
                report.sweep_cancelled
            );
        }

        if self.sprites.len() != sim.registry().len() {
            log::warn!(
                "[tick {}] sprite table out of sync: {} sprites, {} particles",
                report.tick,
                self.sprites.len(),
                sim.registry().len()
            );
        }

        if report.tick % STATS_EVERY_TICKS == 0 {
            let snap = sim.snapshot();
            let sample: String = snap
                .particles
                .iter()
                .take(16)
                .map(|p| p.glyph.as_char())
                .collect();
            log::info!(
                "[tick {}] live={} resting={} body_y={:.2} hue=({:.2},{:.2},{:.2}) sweep={:?} car_x={:.1} idle={} rain=\"{}\"",
                snap.tick,
                snap.live_count,
                snap.resting_count,
                snap.body.center.y,
                snap.body.glow_rgb[0],
                snap.body.glow_rgb[1],
                snap.body.glow_rgb[2],
                snap.sweep_phase,
                snap.agent.x,
                snap.idle_ticks,
                sample
            );
        }
    }

    pub fn summary(&self) {
        log::info!(
            "peak sprites={} sweep passes={} sprites left={}",
            self.peak_sprites,
            self.passes,
            self.sprites.len()
        );
    }
}
