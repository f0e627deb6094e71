use egui;

use crate::stats::{FrameStats, RingBuffer};

/// Draw live-particle and frame-energy graphs.
pub fn draw_graphs(ctx: &egui::Context, stats: &FrameStats) {
    egui::Window::new("Statistics")
        .default_pos(egui::pos2(20.0, 420.0))
        .default_size(egui::vec2(320.0, 220.0))
        .resizable(true)
        .show(ctx, |ui| {
            ui.collapsing("Live Particles", |ui| {
                draw_line_graph(ui, &stats.alive, egui::Color32::from_rgb(100, 200, 100));
            });

            ui.collapsing("Frame Energy", |ui| {
                draw_line_graph(ui, &stats.energy, egui::Color32::from_rgb(255, 170, 80));
            });
        });
}

fn draw_line_graph(ui: &mut egui::Ui, buffer: &RingBuffer, color: egui::Color32) {
    let size = egui::vec2(ui.available_width(), 80.0);
    let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
    let rect = response.rect;

    painter.rect_filled(rect, 2.0, egui::Color32::from_gray(20));

    draw_line_in_rect(&painter, buffer, rect, color);

    if let Some(val) = buffer.last() {
        painter.text(
            egui::pos2(rect.right() - 4.0, rect.top() + 2.0),
            egui::Align2::RIGHT_TOP,
            format!("{val:.0}"),
            egui::FontId::proportional(10.0),
            egui::Color32::from_gray(200),
        );
    }
}

/// Plot from zero so an idle matrix reads as a flat floor line.
fn draw_line_in_rect(
    painter: &egui::Painter,
    buffer: &RingBuffer,
    rect: egui::Rect,
    color: egui::Color32,
) {
    let len = buffer.len();
    if len < 2 {
        return;
    }

    let max_val = buffer.max().unwrap_or(0.0).max(1.0);
    let points: Vec<egui::Pos2> = buffer
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = rect.left() + (i as f32 / (len - 1) as f32) * rect.width();
            let y = rect.bottom() - (v / max_val) * rect.height();
            egui::pos2(x, y)
        })
        .collect();

    for pair in points.windows(2) {
        painter.line_segment([pair[0], pair[1]], egui::Stroke::new(1.5, color));
    }
}
