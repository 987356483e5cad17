//! LCD Pong host runner
//!
//! Plays autopilot matches against the in-memory panel. Usage:
//! `lcd-pong [settings.json] [frame.raw]`; the last frame is written as raw
//! RGB565 when a dump path is given.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lcd_pong::audio::RecordingBuzzer;
    use lcd_pong::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
    use lcd_pong::platform::{Autopilot, NoopMask};
    use lcd_pong::renderer::FrameBuffer;
    use lcd_pong::sim::GamePhase;
    use lcd_pong::{Game, Settings};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_from(path),
        None => Settings::default(),
    };
    let dump_path = args.next();

    log::info!("LCD Pong (host) starting...");
    let mut pilot = Autopilot::new(settings.autopilot_seed, settings.autopilot.skill());
    let mut display = FrameBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);
    let mut mask = NoopMask;
    let period = settings.tick_period();
    let (max_ticks, matches, realtime) = (settings.max_ticks, settings.matches, settings.realtime);
    let mut game = Game::new(settings, RecordingBuzzer::new());

    let mut finished = 0;
    let mut frames = 0u64;
    let mut last_phase = game.phase();
    let mut ticks = 0u64;
    while ticks < max_ticks {
        pilot.observe(game.world());
        game.tick(&mut pilot);
        if game.frame(&mut display, &mut mask) {
            frames += 1;
        }
        ticks += 1;

        let phase = game.phase();
        if let GamePhase::GameOver { winner } = phase
            && !matches!(last_phase, GamePhase::GameOver { .. })
        {
            finished += 1;
            let scores = game.world().state.scores;
            log::info!(
                "Match {finished}: {winner:?} wins {} - {} after {ticks} ticks",
                scores.one,
                scores.two
            );
            if finished >= matches {
                break;
            }
        }
        last_phase = phase;

        if realtime {
            std::thread::sleep(period);
        }
    }

    log::info!(
        "Done: {finished} match(es), {ticks} ticks, {frames} frames, {} pixel writes, {} tone changes",
        display.pixel_writes(),
        game.audio().buzzer().history.len()
    );

    if let Some(path) = dump_path {
        match std::fs::write(&path, display.as_bytes()) {
            Ok(()) => log::info!("Wrote last frame to {path}"),
            Err(e) => log::error!("Cannot write frame to {path}: {e}"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No host runner on wasm; the library is driven by the embedding
}
