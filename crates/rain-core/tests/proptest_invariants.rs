//! Property-based tests for the tick loop using proptest
//!
//! These check invariants across random seeds and input sequences:
//! - falling particles never move upward
//! - deflected particles only slow down (no second bounce)
//! - the resting partition stays under its cap
//! - no particle is stored twice, and positions stay finite

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;
use rain_core::{Lifecycle, ParticleId, SignalFrame, SimConfig, Simulation, SweepPhase};

const TICKS: usize = 240;
const CAP: usize = 60;

fn volume_strategy() -> impl Strategy<Value = f32> {
    prop_oneof![
        4 => 0.0f32..1.2,
        1 => Just(0.0f32),
        1 => Just(f32::NAN),
        1 => -1.0f32..0.0,
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn tick_loop_invariants(
        seed in any::<u64>(),
        volumes in prop::collection::vec(volume_strategy(), 1..16),
        bass in 0.0f32..1.0,
    ) {
        let mut config = SimConfig::default();
        config.seed = seed;
        config.resting_cap = CAP;
        let mut sim = Simulation::new(config).unwrap();
        let mut last_vy: HashMap<ParticleId, f32> = HashMap::new();

        for t in 0..TICKS {
            let v = volumes[t % volumes.len()];
            sim.tick(SignalFrame::new(v, bass));

            let mut seen = HashSet::new();
            for p in sim.registry().iter() {
                prop_assert!(seen.insert(p.id), "particle {:?} stored twice", p.id);
                prop_assert!(p.position.is_finite());
            }
            prop_assert!(sim.registry().resting_count() <= CAP);

            for p in sim.registry().live() {
                match p.state {
                    Lifecycle::Falling => prop_assert!(p.velocity.y <= 0.0),
                    Lifecycle::Deflected => {
                        if let Some(prev) = last_vy.get(&p.id) {
                            prop_assert!(p.velocity.y < *prev, "deflected particle sped up");
                        }
                        last_vy.insert(p.id, p.velocity.y);
                    }
                    other => prop_assert!(false, "{:?} in live partition", other),
                }
            }
            for p in sim.registry().resting() {
                prop_assert!(!p.state.is_live());
                prop_assert!(p.position.y >= sim.config.floor_y);
            }
        }
    }

    #[test]
    fn sweep_needs_a_pile_and_silence(
        idle in 0u32..400,
        piled in 0usize..4,
    ) {
        let config = SimConfig::default();
        let mut sim = Simulation::new(config.clone()).unwrap();
        for i in 0..piled {
            let id = sim.registry_mut().allocate_id();
            let mut p = rain_core::Particle::falling(
                id,
                glam::Vec3::new(i as f32, config.floor_y, 0.0),
                0.0,
                rain_core::Glyph(0),
                2.0,
            );
            p.state = Lifecycle::Resting;
            sim.registry_mut().settle(p, config.resting_cap);
        }
        sim.sweep_mut().set_idle_ticks(idle);
        sim.tick(SignalFrame::SILENT);

        let expect = piled > 0 && idle + 1 > config.sweep.idle_ticks;
        prop_assert_eq!(sim.sweep().phase() == SweepPhase::Sweeping, expect);
    }
}
