//! Headless demo runner
//!
//! Drives the simulation with a scripted input for a fixed number of
//! ticks and reports the outcome. Useful for smoke-testing balance
//! changes without a frontend.

use ember_siege::consts::DEFAULT_SEED;
use ember_siege::sim::{AimMode, CameraPose, EnemyAssets, TickInput, World, tick};
use ember_siege::tuning::Tuning;

const DT: f32 = 1.0 / 60.0;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED);
    let seconds: f32 = std::env::args()
        .nth(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(60.0);

    let mut world = World::new(seed, Tuning::default());
    world.enemy_assets = EnemyAssets::all_loaded();
    log::info!(
        "Running seed {} for {}s ({} obstacles placed)",
        seed,
        seconds,
        world.obstacles.len()
    );

    let camera = CameraPose::default();
    let ticks = (seconds / DT) as u64;

    for n in 0..ticks {
        // Simple script: run forward, spin slowly, fire whenever possible
        let input = TickInput {
            move_forward: true,
            fire: n % 10 == 0,
            look_dx: 0.01,
            ..Default::default()
        };
        tick(&mut world, &input, &camera, AimMode::ThirdPerson, DT);

        if world.player.is_dead() {
            log::info!("Player died at t={:.1}s", world.elapsed);
            break;
        }
    }

    println!(
        "t={:.1}s wave={} enemies={} projectiles={} hp={}/{} score={}",
        world.elapsed,
        world.director.wave,
        world.enemies.len(),
        world.projectiles.len(),
        world.player.hp,
        world.player.hp_max,
        world.score
    );
}
