//! Headless simulation command

use anyhow::{Context, Result};
use serde::Serialize;
use std::time::Duration;
use swarm_particles::{find_preset, parse_real, ParticleInstance, ParticleSystem, SimParams};
use swarm_runtime::{FrameLoop, RuntimeEvent};

pub struct RunArgs {
    pub params: Option<String>,
    pub frames: u32,
    pub fps: f64,
    pub realtime: bool,
    pub preset: Option<String>,
    pub count: Option<usize>,
    pub c_re: Option<String>,
    pub c_im: Option<String>,
    pub seed: u32,
    pub output: Option<String>,
}

/// Final transform buffer as written by `--output`
#[derive(Serialize)]
struct TransformDump {
    clock: f32,
    generation: u64,
    /// One `[x, y, z, size]` entry per particle, in pool order
    instances: Vec<[f32; 4]>,
}

pub fn run(args: RunArgs) -> Result<()> {
    let params = resolve_params(&args)?;
    let frame_dt = 1.0 / args.fps;
    let frame_period = if args.realtime {
        Some(
            Duration::try_from_secs_f64(frame_dt)
                .with_context(|| format!("Cannot pace frames at {} fps", args.fps))?,
        )
    } else {
        None
    };

    let mut frames = FrameLoop::new(params, ParticleSystem::with_seed(args.seed));
    frames
        .initialize()
        .context("Failed to initialize particle system")?;

    for frame in 0..args.frames {
        let advanced = match frame_period {
            Some(period) => {
                std::thread::sleep(period);
                frames.tick()
            }
            None => frames.run_frame(frame_dt),
        };
        advanced.with_context(|| format!("Frame {} failed", frame))?;

        for event in frames.drain_events() {
            match event {
                RuntimeEvent::PoolRebuilt { count, generation } => {
                    tracing::info!(count, generation, "pool rebuilt");
                }
                other => tracing::debug!(?other, "runtime event"),
            }
        }
    }
    frames.shutdown()?;

    let stepper = &frames.system().stepper;
    let stats = stepper.stats();
    println!("Simulated {} frame(s)", args.frames);
    println!("  Particles:   {}", stats.count);
    println!("  Clock:       {:.3}s", stats.clock);
    println!("  Mean speed:  {:.4}", stats.mean_speed);
    if let Some((lo, hi)) = stats.bounds {
        println!(
            "  Bounds:      [{:.2}, {:.2}, {:.2}] .. [{:.2}, {:.2}, {:.2}]",
            lo.x, lo.y, lo.z, hi.x, hi.y, hi.z
        );
    }

    if let Some(path) = &args.output {
        let dump = TransformDump {
            clock: stats.clock,
            generation: stats.generation,
            instances: stepper
                .instance_data()
                .iter()
                .map(|inst: &ParticleInstance| inst.pos_size)
                .collect(),
        };
        let json = serde_json::to_string_pretty(&dump)?;
        std::fs::write(path, json).with_context(|| format!("Failed to write {}", path))?;
        println!("Wrote {} transform(s) to {}", dump.instances.len(), path);
    }

    Ok(())
}

fn resolve_params(args: &RunArgs) -> Result<SimParams> {
    let mut params = match &args.params {
        Some(path) => SimParams::load(path)
            .with_context(|| format!("Failed to load parameters from {}", path))?,
        None => SimParams::default(),
    };

    if let Some(name) = &args.preset {
        let preset = find_preset(name).with_context(|| {
            format!("Unknown preset '{}'; run `swarm presets` to list them", name)
        })?;
        params = params.with_preset(preset);
    }
    if let Some(count) = args.count {
        params.count = count;
    }
    if let Some(text) = &args.c_re {
        params.c_re = parse_real("c-re", text)?;
    }
    if let Some(text) = &args.c_im {
        params.c_im = parse_real("c-im", text)?;
    }

    params
        .validate()
        .context("Invalid simulation parameters")?;
    Ok(params)
}
