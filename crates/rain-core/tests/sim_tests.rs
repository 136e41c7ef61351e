// End-to-end ticks of the whole scene.

use rain_core::constants::{BASE_FALL_SPEED, BURST_SPAWN_RATE, MAX_VOLUME};
use rain_core::{Lifecycle, SignalFrame, SimConfig, Simulation, SweepPhase};

fn run(sim: &mut Simulation, signal: SignalFrame, ticks: usize) {
    for _ in 0..ticks {
        sim.tick(signal);
    }
}

#[test]
fn silent_source_produces_an_idle_scene() {
    let mut sim = Simulation::new(SimConfig::default()).unwrap();
    run(&mut sim, SignalFrame::SILENT, 1_000);
    assert!(sim.registry().is_empty());
    assert_eq!(sim.sweep().phase(), SweepPhase::Idle);
}

#[test]
fn silent_text_scene_still_gets_ambient_rain() {
    let mut sim = Simulation::new(SimConfig::text_scene()).unwrap();
    let mut spawned = 0;
    for _ in 0..1_000 {
        spawned += sim.tick(SignalFrame::SILENT).spawned.len();
    }
    assert!(spawned > 0, "ambient drops expected");
    assert!(spawned < 200);
}

#[test]
fn garbage_input_is_treated_as_silence() {
    let mut sim = Simulation::new(SimConfig::default()).unwrap();
    for signal in [
        SignalFrame::new(f32::NAN, f32::NAN),
        SignalFrame::new(-4.0, -1.0),
        SignalFrame::new(f32::INFINITY, 0.5),
    ] {
        let report = sim.tick(signal);
        assert!(report.spawned.is_empty());
    }
    assert!(sim.obstacles().body.center_y.is_finite());
}

#[test]
fn out_of_range_volume_is_capped() {
    let clamped = SignalFrame::new(f32::MAX, 7.0).sanitized();
    assert_eq!(clamped.volume, MAX_VOLUME);
    assert_eq!(clamped.bass, 1.0);

    let mut sim = Simulation::new(SimConfig::default()).unwrap();
    let full_scale = (MAX_VOLUME * BURST_SPAWN_RATE) as usize + 1;
    for volume in [f32::MAX, 1.0e6] {
        let report = sim.tick(SignalFrame::new(volume, 0.0));
        assert_eq!(report.spawned.len(), full_scale, "volume {volume}");
    }
    for p in sim.registry().live() {
        assert!(p.velocity.y >= -(BASE_FALL_SPEED + MAX_VOLUME) - 1e-6);
        assert!(p.position.is_finite());
    }
}

#[test]
fn loud_music_fills_the_floor() {
    let mut sim = Simulation::new(SimConfig::default()).unwrap();
    run(&mut sim, SignalFrame::new(0.6, 0.4), 200);
    assert!(sim.registry().live_count() > 0);
    assert!(sim.registry().resting_count() > 0);
    for p in sim.registry().live() {
        assert!(p.state.is_live());
        assert!(p.position.is_finite());
    }
    for p in sim.registry().resting() {
        assert!(matches!(p.state, Lifecycle::Resting | Lifecycle::Decaying));
    }
}

#[test]
fn pile_is_cleared_after_the_music_stops() {
    let mut sim = Simulation::new(SimConfig::default()).unwrap();
    run(&mut sim, SignalFrame::new(0.4, 0.0), 150);
    // let everything in the air land
    run(&mut sim, SignalFrame::SILENT, 150);
    assert_eq!(sim.registry().live_count(), 0);
    let piled = sim.registry().resting_count();
    assert!(piled > 0);

    let mut started = false;
    let mut finished = false;
    for _ in 0..400 {
        let r = sim.tick(SignalFrame::SILENT);
        started |= r.sweep_started;
        finished |= r.sweep_finished;
    }
    assert!(started && finished);
    // only particles on the car's track are swept
    let on_track = sim
        .registry()
        .resting()
        .iter()
        .filter(|p| p.position.x > -90.0 && p.position.x < 90.0)
        .count();
    assert_eq!(on_track, 0);
    assert!(sim.registry().resting_count() < piled);
}

#[test]
fn resting_cap_holds_under_a_storm() {
    let mut config = SimConfig::default();
    config.resting_cap = 40;
    let mut sim = Simulation::new(config).unwrap();
    let mut evictions = 0;
    for _ in 0..400 {
        let report = sim.tick(SignalFrame::new(1.0, 1.0));
        evictions += report.removed.len();
        assert!(sim.registry().resting_count() <= 40);
    }
    assert!(evictions > 0);
}

#[test]
fn decaying_scene_cleans_itself() {
    let mut config = SimConfig::text_scene();
    config.lifecycle = rain_core::LifecyclePolicy::Decay {
        life_ticks: 30,
        fade_per_tick: 0.1,
    };
    // keep the cleaner out of it
    config.sweep.idle_ticks = u32::MAX;
    config.spawn.policy = rain_core::SpawnPolicy::Trickle {
        ambient_chance: 0.0,
    };
    let mut sim = Simulation::new(config).unwrap();
    run(&mut sim, SignalFrame::new(0.5, 0.0), 100);
    run(&mut sim, SignalFrame::SILENT, 400);
    assert!(sim.registry().is_empty());
}

#[test]
fn snapshot_reflects_the_scene() {
    let mut sim = Simulation::new(SimConfig::text_scene()).unwrap();
    run(&mut sim, SignalFrame::new(0.5, 0.8), 90);
    let snap = sim.snapshot();
    assert_eq!(snap.tick, 90);
    assert_eq!(snap.particles.len(), sim.registry().len());
    assert_eq!(snap.live_count + snap.resting_count, snap.particles.len());
    assert!(snap.ground.is_some());
    assert_eq!(snap.instances().len(), snap.particles.len());
    for inst in snap.instances() {
        assert!(inst.color[3] >= 0.0 && inst.color[3] <= 1.0);
    }
    let instances = snap.instances();
    let bytes: &[u8] = bytemuck::cast_slice(instances.as_slice());
    assert_eq!(bytes.len(), snap.particles.len() * 48);
}

#[test]
fn bass_lifts_the_floating_body() {
    let mut quiet = Simulation::new(SimConfig::default()).unwrap();
    let mut heavy = Simulation::new(SimConfig::default()).unwrap();
    quiet.tick(SignalFrame::SILENT);
    heavy.tick(SignalFrame::new(0.0, 1.0));
    let lift = heavy.obstacles().body.center_y - quiet.obstacles().body.center_y;
    assert!((lift - 2.0).abs() < 1e-5);
}

#[test]
fn same_seed_same_scene() {
    let mut a = Simulation::new(SimConfig::default()).unwrap();
    let mut b = Simulation::new(SimConfig::default()).unwrap();
    run(&mut a, SignalFrame::new(0.7, 0.3), 120);
    run(&mut b, SignalFrame::new(0.7, 0.3), 120);
    let pa: Vec<_> = a.registry().iter().map(|p| p.position).collect();
    let pb: Vec<_> = b.registry().iter().map(|p| p.position).collect();
    assert_eq!(pa, pb);
}
