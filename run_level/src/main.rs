use optic::Scene;
use optic_json::{serde_json, JsonDes};

use std::{env, fs::File, io::BufReader};

use anyhow::{anyhow, Context};

/// Ticks simulated when no count is given
const DEFAULT_TICKS: u64 = 600;

/// Frame rate the level's time limit is measured against
const TICKS_PER_SECOND: f64 = 60.0;

fn run_level(scene: &mut Scene, ticks: u64) {
    let time_limit = scene.level().time_limit_seconds * TICKS_PER_SECOND;
    let mut completed = false;

    for _ in 0..ticks {
        scene.step();

        if scene.all_targets_hit() && !completed {
            completed = true;
            log::info!("all targets hit at tick {}", scene.tick());
        }

        if scene.level().has_time_limit() && scene.tick() as f64 >= time_limit {
            log::warn!("time limit reached at tick {}", scene.tick());
            break;
        }
    }

    if !completed {
        log::info!("level not completed after {} tick(s)", scene.tick());
    }

    log::debug!(
        "traced rays {} time(s) in {} tick(s)",
        scene.cache().recomputations(),
        scene.tick()
    );
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);

    let file_path = args
        .next()
        .context("expected a scene file path as a first argument")?;

    let ticks = args
        .next()
        .map(|arg| arg.parse::<u64>())
        .transpose()
        .context("expected a number of ticks as second argument")?
        .unwrap_or(DEFAULT_TICKS);

    let file = File::open(&file_path).with_context(|| format!("failed to open {file_path}"))?;
    let json: serde_json::Value =
        serde_json::from_reader(BufReader::new(file)).context("failed to parse scene json")?;

    let mut scene = Scene::from_json(&json).map_err(|e| anyhow!("invalid scene: {e}"))?;

    log::info!(
        "loaded {} mirror(s) and {} target(s) from {file_path}",
        scene.mirrors().len(),
        scene.targets().len()
    );

    run_level(&mut scene, ticks);

    println!(
        "{}",
        serde_json::to_string_pretty(&optic_json::serialize_frame(&scene))?
    );

    Ok(())
}
