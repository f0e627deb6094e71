use macroquad::prelude::*;

mod preview;
mod renderer;
mod stats;
mod ui;

use clap::Parser;
use preview::PreviewState;
use sparkmatrix::cli::CliOptions;
use sparkmatrix::{config, Effect, Preset};
use stats::FrameStats;
use ui::UiState;

fn window_conf() -> Conf {
    Conf {
        window_title: "sparkmatrix - LED matrix preview".to_string(),
        window_width: 960,
        window_height: 760,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// Desktop preview of an LED-matrix effect.
#[derive(Parser, Debug)]
#[command(name = "sparkmatrix")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    options: CliOptions,
}

/// Resolve the starting preset; bad arguments fall back to the default.
fn startup_preset() -> Preset {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            log::warn!("{}; using the default preset", e.kind());
            let _ = e.print();
            return Preset::default();
        }
    };
    match cli.options.to_preset() {
        Ok(preset) => preset,
        Err(e) => {
            log::warn!("{e}; using the default preset");
            Preset::default()
        }
    }
}

const EFFECT_KEYS: [KeyCode; 6] = [
    KeyCode::Key1,
    KeyCode::Key2,
    KeyCode::Key3,
    KeyCode::Key4,
    KeyCode::Key5,
    KeyCode::Key6,
];

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let preset = startup_preset();
    let mut state = PreviewState::new(preset);
    let mut frame_stats = FrameStats::new(config::STATS_CAPACITY);
    let mut ui_state = UiState::default();
    let mut accumulator = 0.0f64;

    loop {
        let frame_time = get_frame_time() as f64;
        accumulator += frame_time.min(0.1);

        let effective_dt = config::FIXED_DT as f64 / state.speed_multiplier as f64;
        if !state.paused {
            while accumulator >= effective_dt {
                state.engine.tick();
                frame_stats.record(
                    state.engine.system.alive_count(),
                    state.engine.frame().total_energy(),
                );
                accumulator -= effective_dt;
            }
        } else {
            accumulator = 0.0;
            if state.step_requested {
                state.engine.tick();
                frame_stats.record(
                    state.engine.system.alive_count(),
                    state.engine.frame().total_energy(),
                );
            }
        }
        state.step_requested = false;

        let mut egui_wants_keyboard = false;
        egui_macroquad::cfg(|ctx| {
            egui_wants_keyboard = ctx.wants_keyboard_input();
        });
        if !egui_wants_keyboard {
            if is_key_pressed(KeyCode::Space) {
                state.paused = !state.paused;
            }
            if is_key_pressed(KeyCode::Right) {
                state.paused = true;
                state.step_requested = true;
            }
            if is_key_pressed(KeyCode::R) {
                state.capture_overrides();
                state.rebuild();
                frame_stats.reset();
            }
            for (key, effect) in EFFECT_KEYS.into_iter().zip(Effect::ALL) {
                if is_key_pressed(key) && effect != state.preset.effect {
                    state.select_effect(effect);
                    frame_stats.reset();
                }
            }
        }

        renderer::draw(state.engine.frame(), state.preset.brightness, state.paused);
        ui::draw_ui(&mut state, &mut ui_state, &mut frame_stats);

        next_frame().await;
    }
}
