//! Headless native driver for the digital rain scene.
//!
//! Usage: `rain-native [--config scene.json] [--preset pile|text] [--synthetic]
//! [--ticks N] [--seed N] [--dump-config]`
//!
//! Captures the default input device (or a synthetic signal), paces the
//! simulation at 60 Hz and logs what a renderer would draw.

use std::env;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use rain_core::constants::{ANALYSER_FFT_SIZE, TICKS_PER_SEC};
use rain_core::{SignalFrame, SimConfig, Simulation};

mod capture;
mod presenter;
mod synthetic;

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    preset: Option<String>,
    synthetic: bool,
    ticks: Option<u64>,
    seed: Option<u64>,
    dump_config: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args::default();
    let mut it = env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => args.config = Some(it.next().context("--config needs a path")?.into()),
            "--preset" => args.preset = Some(it.next().context("--preset needs a name")?),
            "--synthetic" => args.synthetic = true,
            "--ticks" => {
                let v = it.next().context("--ticks needs a number")?;
                args.ticks = Some(v.parse().with_context(|| format!("bad --ticks {v}"))?);
            }
            "--seed" => {
                let v = it.next().context("--seed needs a number")?;
                args.seed = Some(v.parse().with_context(|| format!("bad --seed {v}"))?);
            }
            "--dump-config" => args.dump_config = true,
            other => bail!("unknown argument {other}"),
        }
    }
    Ok(args)
}

fn build_config(args: &Args) -> anyhow::Result<SimConfig> {
    let mut config = match (&args.config, args.preset.as_deref()) {
        (Some(path), _) => SimConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        (None, None | Some("pile")) => SimConfig::default(),
        (None, Some("text")) => SimConfig::text_scene(),
        (None, Some(other)) => bail!("unknown preset {other} (expected pile or text)"),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;
    let config = build_config(&args)?;
    if args.dump_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    let mut sim = Simulation::new(config).context("invalid scene config")?;
    let mut capture = if args.synthetic {
        log::info!("using synthetic signal");
        None
    } else {
        capture::start_capture(ANALYSER_FFT_SIZE)
    };
    let mut presenter = presenter::HeadlessPresenter::default();

    let frame = Duration::from_secs_f32(1.0 / TICKS_PER_SEC);
    let mut next = Instant::now();
    loop {
        if args.ticks.is_some_and(|limit| sim.tick_count() >= limit) {
            break;
        }
        let signal = match (&mut capture, args.synthetic) {
            (_, true) => synthetic::synthetic_signal(sim.tick_count()),
            (Some(c), false) => c.signal(),
            (None, false) => SignalFrame::SILENT,
        };
        let report = sim.tick(signal);
        presenter.present(&sim, &report);

        next += frame;
        let now = Instant::now();
        if next > now {
            thread::sleep(next - now);
        } else {
            // fell behind; don't try to catch up with a burst of ticks
            next = now;
        }
    }
    presenter.summary();
    Ok(())
}
