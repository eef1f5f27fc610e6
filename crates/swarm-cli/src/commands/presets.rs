//! Preset listing command

use anyhow::Result;
use swarm_particles::PRESETS;

pub fn run() -> Result<()> {
    println!("{:<12} {:>8} {:>8}", "NAME", "C_RE", "C_IM");
    for preset in PRESETS {
        println!("{:<12} {:>8} {:>8}", preset.name, preset.c_re, preset.c_im);
    }
    Ok(())
}
