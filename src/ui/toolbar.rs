use egui;

use super::UiState;
use crate::preview::PreviewState;
use crate::stats::FrameStats;
use sparkmatrix::Effect;

/// Slim status strip + compact controls.
pub fn draw_toolbar(
    ctx: &egui::Context,
    state: &mut PreviewState,
    ui_state: &mut UiState,
    stats: &mut FrameStats,
) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.add_space(3.0);
        ui.horizontal_wrapped(|ui| {
            title_badge(ui, "SPARKMATRIX");

            ui.separator();
            compact_group(ui, "Effect", |ui| {
                for effect in Effect::ALL {
                    let selected = state.preset.effect == effect;
                    if ui.selectable_label(selected, effect.label()).clicked() && !selected {
                        state.select_effect(effect);
                        stats.reset();
                    }
                }
            });

            compact_group(ui, "Run", |ui| {
                let pause_label = if state.paused { "Play" } else { "Pause" };
                if ui.button(pause_label).clicked() {
                    state.paused = !state.paused;
                }
                if ui.button("Step").clicked() {
                    state.step_requested = true;
                }
                if ui.button("Restart").clicked() {
                    state.capture_overrides();
                    state.rebuild();
                    stats.reset();
                }
            });

            compact_group(ui, "Speed", |ui| {
                for speed in [0.25, 0.5, 1.0, 2.0, 4.0] {
                    speed_button(ui, state, speed);
                }
            });

            compact_group(ui, "Panels", |ui| {
                ui.toggle_value(&mut ui_state.show_graphs, "Graphs");
                ui.toggle_value(&mut ui_state.show_settings, "Settings");
            });
        });

        ui.add_space(4.0);
        ui.horizontal_wrapped(|ui| {
            let engine = &state.engine;
            metric_chip(
                ui,
                "Alive",
                format!("{}/{}", engine.system.alive_count(), engine.system.capacity()),
            );
            metric_chip(ui, "Energy", format!("{}", engine.frame().total_energy()));
            metric_chip(ui, "Emitter", engine.system.emitter().label().to_string());
            metric_chip(ui, "Decay", engine.decay.label().to_string());
            metric_chip(ui, "Tick", format!("{}", engine.tick_count()));
            metric_chip(
                ui,
                "Matrix",
                format!("{}x{}", engine.frame().width(), engine.frame().height()),
            );
        });
        ui.add_space(3.0);
    });
}

fn speed_button(ui: &mut egui::Ui, state: &mut PreviewState, speed: f32) {
    let label = format!("{speed}x");
    let selected = (state.speed_multiplier - speed).abs() < 0.01;
    if ui.selectable_label(selected, label).clicked() {
        state.speed_multiplier = speed;
    }
}

fn title_badge(ui: &mut egui::Ui, label: &str) {
    let text = egui::RichText::new(label)
        .strong()
        .color(egui::Color32::from_rgb(255, 200, 150));
    ui.label(text);
}

fn compact_group(ui: &mut egui::Ui, heading: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(heading)
                    .small()
                    .color(egui::Color32::from_rgb(150, 170, 185)),
            );
            add_contents(ui);
        });
    });
}

fn metric_chip(ui: &mut egui::Ui, key: &str, value: String) {
    let text = egui::RichText::new(format!("{key}: {value}"))
        .small()
        .color(egui::Color32::from_rgb(205, 215, 225));
    ui.group(|ui| {
        ui.label(text);
    });
}
