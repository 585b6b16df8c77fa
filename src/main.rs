//! Skeeboi entry point
//!
//! Runs a headless descent: a scripted skier weaves down the slope for a
//! fixed number of frames and the final score is reported.
//!
//! Usage: `skeeboi [seed] [ticks] [settings.json]`

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use skeeboi::sim::{Control, Session, SkierState};
use skeeboi::{JsonScoreStore, MemoryScoreStore, ScoreStore, SeededRandom, Settings};

const BEST_SCORE_FILE: &str = "skeeboi_best.json";
const DEFAULT_TICKS: u64 = 3600;
/// Frames between scripted steering changes
const WEAVE_PERIOD: u64 = 45;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let settings = match args.get(2) {
        Some(path) => Settings::load_or_default(Path::new(path)),
        None => Settings::default(),
    };
    let seed = args
        .first()
        .and_then(|s| s.parse().ok())
        .or(settings.seed)
        .unwrap_or_else(clock_seed);
    let ticks = args
        .get(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_TICKS);

    let store: Box<dyn ScoreStore> = match JsonScoreStore::open(BEST_SCORE_FILE) {
        Ok(store) => Box::new(store),
        Err(err) => {
            log::warn!("{}; best score will not be saved", err);
            Box::new(MemoryScoreStore::new())
        }
    };

    log::info!("Skeeboi (headless) starting: seed={} ticks={}", seed, ticks);
    let mut session = Session::new(&settings, SeededRandom::new(seed), store);
    session.steer(Control::ForceDown);

    for frame in 0..ticks {
        if session.skier().state == SkierState::Crashed {
            // Get up and point downhill again
            session.steer(Control::SteerRight);
            session.steer(Control::ForceDown);
        } else if frame % WEAVE_PERIOD == 0 {
            let control = match (frame / WEAVE_PERIOD) % 4 {
                0 => Control::SteerLeft,
                1 => Control::SteerRight,
                2 => Control::SteerRight,
                _ => Control::SteerLeft,
            };
            session.steer(control);
        }

        session.tick();
        session.visible();
    }

    println!(
        "Distance {}  Score {}  Crashes {}  Best {}",
        session.lowest_y(),
        session.score(),
        session.crashes(),
        session.best_score()
    );
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
