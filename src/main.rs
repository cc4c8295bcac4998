//! Blob Eat Blob entry point
//!
//! Headless native runner: loads settings (first argument, optional),
//! plays a session at a fixed timestep and prints the result.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use blob_eat_blob::renderer::{MeshCanvas, score_text};
use blob_eat_blob::sim::{GameEvent, GamePhase, GameState};
use blob_eat_blob::{App, Settings};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> blob_eat_blob::Result<()> {
    let settings = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => Settings::load(&path)?,
        None => {
            let settings = Settings::default();
            settings.validate()?;
            settings
        }
    };

    let seed = settings.resolve_seed();
    log::info!(
        "Blob Eat Blob starting: seed {seed}, arena {}x{}, autopilot {}",
        settings.width,
        settings.height,
        settings.autopilot
    );

    let state = GameState::new(seed, settings.arena(), settings.tuning.clone());
    let mut app = App::new(state);
    app.input.autopilot = settings.autopilot;

    let frame_dt = settings.frame_dt();
    let frame = Duration::from_secs_f32(frame_dt);
    let mut canvas = MeshCanvas::new(settings.width, settings.height);

    while !app.is_finished() {
        let started = Instant::now();

        if settings
            .max_ticks
            .is_some_and(|max| app.state.time_ticks >= max)
        {
            app.input.quit = true;
        }

        app.update(frame_dt);
        for event in &app.state.events {
            match event {
                GameEvent::PlayerAte { enemy_id, new_radius } => {
                    log::debug!("Player ate enemy {enemy_id}, radius now {new_radius:.2}");
                }
                GameEvent::EnemyAte {
                    eater_id, eaten_id, ..
                } => log::trace!("Enemy {eater_id} ate enemy {eaten_id}"),
                GameEvent::Spawned { enemy_id, radius } => {
                    log::trace!("Enemy {enemy_id} spawned with radius {radius}");
                }
                GameEvent::PlayerEaten { .. } => {}
            }
        }
        app.render(&mut canvas);

        if settings.realtime {
            if let Some(rest) = frame.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }

    let state = &app.state;
    let outcome = match state.phase {
        GamePhase::GameOver => "eaten",
        _ => "survived",
    };
    log::info!(
        "Run over ({outcome}) after {} ticks; {}; {} enemies alive; last frame {} triangles",
        state.time_ticks,
        score_text(state),
        state.population.len(),
        canvas.triangle_count()
    );
    println!("{} ({outcome}, {} ticks, seed {seed})", score_text(state), state.time_ticks);

    Ok(())
}
