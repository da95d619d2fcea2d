//! Box Rush entry point
//!
//! Headless demo driver: builds a small catalog, loads save data, and
//! plays a scripted run through the flow state machine. The real game
//! shell (rendering, input, audio) embeds the library the same way.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use rand::Rng;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use box_rush::economy::GameConfig;
    use box_rush::flow::{FailReason, FlowEvent, GameFlow, GamePhase};
    use box_rush::level::{BoxRow, ColorKind, Difficulty, LevelCatalog, LevelDefinition};
    use box_rush::loading::LoadingTimeline;
    use box_rush::persistence::Store;
    use box_rush::progress::Progress;
    use box_rush::settings::Settings;

    /// Small built-in catalog so the demo runs without asset files.
    fn demo_catalog() -> LevelCatalog {
        let colors = [
            ColorKind::Red,
            ColorKind::Blue,
            ColorKind::Green,
            ColorKind::Yellow,
            ColorKind::Purple,
        ];
        let levels = (0..5)
            .map(|i| {
                let mut level = LevelDefinition::named(format!("LevelM-{}", i + 1));
                level.rows.push(BoxRow::new(vec![colors[i], colors[(i + 1) % 5]]));
                if i == 2 || i == 4 {
                    level.skip_in_loop = true;
                }
                if i == 4 {
                    level.difficulty = Difficulty::Hard;
                }
                level
            })
            .collect();
        LevelCatalog::new(levels)
    }

    pub fn run() {
        env_logger::init();
        log::info!("Box Rush core (native) starting...");

        let store = Store::open_default();
        let config = GameConfig::default();
        let settings = Settings::load(&store);
        log::info!(
            "settings: music {}, sound {} (volume {:.2})",
            settings.music,
            settings.sound,
            settings.sound_volume
        );

        let progress = Progress::load(store, &config.econ, 0.0);
        let mut flow = GameFlow::new(demo_catalog(), progress, config);

        // Synthetic clock and scripted outcomes keep the demo replayable.
        let mut now_ms = 0.0;
        let mut rng = Pcg32::seed_from_u64(0xB0C5);

        flow.begin_loading();
        let timeline = LoadingTimeline::new(flow.config().gameplay.loading_duration, 0xB0C5);
        log::info!("loading screen runs {:.2}s", timeline.duration());

        for attempt in 0..8 {
            let (level_name, level_difficulty, level_total_boxes) = match flow.start_level() {
                Ok(level) => (level.name.clone(), level.difficulty, level.total_boxes()),
                Err(err) => {
                    log::error!("cannot start a level: {err}");
                    return;
                }
            };
            println!(
                "attempt {}: level {} '{}' ({:?}, {} boxes)",
                attempt + 1,
                flow.progress().display_level(),
                level_name,
                level_difficulty,
                level_total_boxes
            );

            flow.enter_play();
            now_ms += 30_000.0;

            if rng.random_bool(0.7) {
                let score = rng.random_range(10..100);
                flow.complete_level(score, now_ms);
            } else {
                flow.fail_level(FailReason::OutOfMoves, now_ms);
            }

            // Let the scheduled popup fire.
            now_ms += 2_000.0;
            flow.poll(now_ms);

            for event in flow.drain_events() {
                match event {
                    FlowEvent::PhaseChanged { from, to } => {
                        log::debug!("phase {from:?} -> {to:?}");
                    }
                    FlowEvent::PopupRequested(popup) => println!("  popup: {popup:?}"),
                    FlowEvent::CoinsAwarded(amount) => println!("  +{amount} coins"),
                    FlowEvent::LevelResolved { .. } => {}
                }
            }

            if flow.phase() == GamePhase::Restart {
                println!("  failed: {}", flow.fail_message().unwrap_or("-"));
            }
        }

        println!(
            "run over: level {}, {} coins, best score {}",
            flow.progress().display_level(),
            flow.progress().coins(),
            flow.progress().best_score()
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM builds use the library's wasm_bindgen entry point.
}
