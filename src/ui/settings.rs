use egui;

use super::UiState;
use crate::preview::PreviewState;
use sparkmatrix::{Acceleration, Emitter, FrameDecay, Side};

/// Runtime settings panel for tuning the running effect.
pub fn draw_settings(ctx: &egui::Context, state: &mut PreviewState, ui_state: &mut UiState) {
    egui::Window::new("Settings")
        .default_pos(egui::pos2(300.0, 90.0))
        .default_size(egui::vec2(300.0, 420.0))
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Output");
                ui.add(egui::Slider::new(&mut state.preset.brightness, 0..=255).text("Brightness"));
                ui.checkbox(&mut state.engine.matrix.overflow, "Channel overflow bleed");
                decay_picker(ui, &mut state.engine.decay);

                ui.separator();
                ui.heading("Spawning");
                let mut per_cycle = state.engine.system.per_cycle();
                if ui
                    .add(egui::Slider::new(&mut per_cycle, 0..=32).text("Per tick"))
                    .changed()
                {
                    state.engine.system.set_per_cycle(per_cycle);
                }
                emitter_controls(ui, state.engine.system.emitter_mut());
                if ui.button("Kill all particles").clicked() {
                    state.engine.system.kill_all();
                }

                ui.separator();
                ui.heading("Physics");
                let physics = &mut state.engine.physics;
                acceleration_sliders(ui, "Standard", &mut physics.standard);
                acceleration_sliders(ui, "Bounce", &mut physics.bounce);
                ui.label("Attractor");
                let max_x = physics.matrix.max_x();
                let max_y = physics.matrix.max_y();
                let attractor = &mut physics.attractor;
                ui.add(egui::Slider::new(&mut attractor.x, 0..=max_x).text("x"));
                ui.add(egui::Slider::new(&mut attractor.y, 0..=max_y).text("y"));
                ui.add(egui::Slider::new(&mut attractor.force, 0..=1000).text("Force"));
                ui.add(egui::Slider::new(&mut attractor.max_speed, 1..=200).text("Max speed"));
                let max_jitter = attractor.max_speed * 2;
                attractor.jitter = attractor.jitter.min(max_jitter);
                ui.add(egui::Slider::new(&mut attractor.jitter, 0..=max_jitter).text("Jitter"));
                ui.add(
                    egui::Slider::new(&mut physics.decay_factor, 0..=64).text("Fixed-decay step"),
                );

                ui.separator();
                ui.heading("Preset");
                ui.horizontal(|ui| {
                    ui.label("Seed");
                    ui.add(egui::DragValue::new(&mut state.preset.seed));
                    if ui.button("Reseed").clicked() {
                        state.engine.reseed(state.preset.seed);
                    }
                });
                let mut path = state.save_path.display().to_string();
                ui.horizontal(|ui| {
                    ui.label("File");
                    if ui.text_edit_singleline(&mut path).changed() {
                        state.save_path = path.into();
                    }
                });
                if ui.button("Save preset").clicked() {
                    ui_state.status = Some(match state.save_preset() {
                        Ok(()) => format!("Saved {}", state.save_path.display()),
                        Err(e) => {
                            log::warn!("{e}");
                            e.to_string()
                        }
                    });
                }
                if let Some(status) = &ui_state.status {
                    ui.small(status.as_str());
                }
            });
        });
}

fn decay_picker(ui: &mut egui::Ui, decay: &mut FrameDecay) {
    ui.horizontal(|ui| {
        ui.label("Frame decay");
        for option in [FrameDecay::Persist, FrameDecay::Clear, FrameDecay::Halve] {
            if ui.selectable_label(*decay == option, option.label()).clicked() {
                *decay = option;
            }
        }
        let linear = matches!(decay, FrameDecay::Linear(_));
        if ui.selectable_label(linear, "linear").clicked() && !linear {
            *decay = FrameDecay::Linear(32);
        }
    });
    if let FrameDecay::Linear(amount) = decay {
        ui.add(egui::Slider::new(amount, 1..=255).text("Linear step"));
    }
}

fn acceleration_sliders(ui: &mut egui::Ui, label: &str, accel: &mut Acceleration) {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.add(egui::Slider::new(&mut accel.ax, -8..=8).text("ax"));
        ui.add(egui::Slider::new(&mut accel.ay, -8..=8).text("ay"));
    });
}

fn emitter_controls(ui: &mut egui::Ui, emitter: &mut Emitter) {
    match emitter {
        Emitter::Fire(fire) => {
            ui.checkbox(&mut fire.cycle_hue, "Cycle hue");
            ui.add(egui::Slider::new(&mut fire.base_hue, 0..=255).text("Base hue"));
        }
        Emitter::Fixed(fixed) => {
            ui.add(egui::Slider::new(&mut fixed.vx, -64..=64).text("vx"));
            ui.add(egui::Slider::new(&mut fixed.vy, -64..=64).text("vy"));
            ui.add(egui::Slider::new(&mut fixed.ttl, 1..=255).text("ttl"));
        }
        Emitter::Fountain(fountain) => {
            ui.add(egui::Slider::new(&mut fountain.vx, -64..=64).text("vx"));
            ui.add(egui::Slider::new(&mut fountain.vy, -64..=64).text("vy"));
            ui.add(egui::Slider::new(&mut fountain.var, 0..=64).text("Spread"));
        }
        Emitter::Side(side) => {
            ui.horizontal(|ui| {
                for option in Side::ALL {
                    if ui.selectable_label(side.side == option, option.label()).clicked() {
                        side.side = option;
                    }
                }
            });
            ui.add(egui::Slider::new(&mut side.base_hue, 0..=255).text("Base hue"));
            ui.add(egui::Slider::new(&mut side.max_ttl, 1..=255).text("Max ttl"));
        }
        Emitter::Spin(spin) => {
            ui.checkbox(&mut spin.oscillate, "Oscillate");
            ui.add(egui::Slider::new(&mut spin.radius, 0..=64).text("Radius"));
            let mut rate = spin.angular_velocity;
            if ui
                .add(egui::Slider::new(&mut rate, -45..=45).text("Degrees/tick"))
                .changed()
            {
                spin.set_angular_velocity(rate);
            }
        }
    }
}
