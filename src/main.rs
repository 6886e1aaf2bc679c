//! Pose Arcade entry point
//!
//! The browser build is driven from `web.rs`; natively this runs both games
//! headless with a scripted input tape and logs how each session went.
//!
//! Usage: `pose-arcade [SEED] [TUNING]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::cell::RefCell;
    use std::rc::Rc;

    use pose_arcade::consts::TICKS_PER_SECOND;
    use pose_arcade::render::Recorder;
    use pose_arcade::sim::{CueLog, KeyCode, Observers, Signal};
    use pose_arcade::{AppContext, GameKind, Tuning};

    /// Ticks before a headless session is cut off
    const MAX_TICKS: u32 = TICKS_PER_SECOND * 60 * 3;

    fn tape(kind: GameKind, tick: u32) -> Option<Signal> {
        match kind {
            GameKind::BodyDodge => match tick % 90 {
                0 => Some(Signal::pose("Left")),
                30 => Some(Signal::pose("Center")),
                60 => Some(Signal::pose("Right")),
                _ => None,
            },
            GameKind::AvoidCollect => {
                let keys = [KeyCode::ArrowUp, KeyCode::ArrowRight, KeyCode::ArrowDown, KeyCode::ArrowLeft];
                let key = keys[(tick / 45) as usize % keys.len()];
                match tick % 45 {
                    0 => Some(Signal::key_down(key)),
                    40 => Some(Signal::key_up(key)),
                    20 => Some(Signal::key_down(KeyCode::Space)),
                    _ => None,
                }
            }
        }
    }

    pub fn run(kind: GameKind, tuning: &Tuning, seed: u64) {
        let ended = Rc::new(RefCell::new(None));
        let observers = Observers {
            on_score: Some(Rc::new(|score: u32, level: u32| {
                log::debug!("score {} (level {})", score, level)
            })),
            on_hp: Some(Rc::new(|hp: u32| log::debug!("hp {}", hp))),
            on_end: Some({
                let ended = ended.clone();
                Rc::new(move |score, reason| *ended.borrow_mut() = Some((score, reason)))
            }),
        };
        let audio = Rc::new(CueLog::new());
        let mut app = AppContext::new(kind, tuning.clone(), seed, audio.clone(), observers);
        let mut surface = Recorder::new();

        app.start();
        let mut ticks = 0;
        while app.is_playing() && ticks < MAX_TICKS {
            if let Some(signal) = tape(kind, ticks) {
                app.signal(&signal);
            }
            surface.clear();
            app.frame(&mut surface, 400.0, 400.0);
            ticks += 1;
        }
        if app.is_playing() {
            app.stop();
        }

        let board = app.scoreboard();
        match *ended.borrow() {
            Some((score, reason)) => log::info!(
                "{}: {} points at level {} after {}s, {:?}, {} cues",
                kind.title(),
                score,
                reason.level(),
                ticks / TICKS_PER_SECOND,
                reason,
                audio.cues().len()
            ),
            None => log::warn!("{}: no end reported (score {})", kind.title(), board.score),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(clap::Parser)]
#[command(name = "pose-arcade")]
#[command(about = "Run Body Dodge and Avoid & Collect headless with a scripted input tape")]
struct Args {
    /// Seed for both sessions
    #[arg(default_value_t = 0x5eed)]
    seed: u64,

    /// JSON file overriding the balance values
    tuning: Option<std::path::PathBuf>,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;
    use pose_arcade::{GameKind, Tuning};

    env_logger::init();
    let args = Args::parse();
    log::info!("Pose Arcade (native) starting with seed {}", args.seed);

    let tuning = match &args.tuning {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(json) => Tuning::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    for kind in [GameKind::BodyDodge, GameKind::AvoidCollect] {
        headless::run(kind, &tuning, args.seed);
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_args_default_seed() {
        let args = Args::try_parse_from(["pose-arcade"]).unwrap();
        assert_eq!(args.seed, 0x5eed);
        assert!(args.tuning.is_none());
    }

    #[test]
    fn test_args_seed_and_tuning() {
        let args = Args::try_parse_from(["pose-arcade", "42", "balance.json"]).unwrap();
        assert_eq!(args.seed, 42);
        assert_eq!(args.tuning, Some(std::path::PathBuf::from("balance.json")));
    }

    #[test]
    fn test_args_reject_bad_seed() {
        assert!(Args::try_parse_from(["pose-arcade", "abc", "cfg.json"]).is_err());
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::init, this is just to satisfy the compiler
}
