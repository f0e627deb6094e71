use macroquad::prelude::*;

use sparkmatrix::{LedMatrix, Rgb};

const BG_COLOR: Color = Color::new(0.02, 0.03, 0.08, 1.0);
const BOARD_COLOR: Color = Color::new(0.05, 0.06, 0.09, 1.0);
const OFF_COLOR: Color = Color::new(0.09, 0.10, 0.13, 1.0);
const TOOLBAR_HEIGHT: f32 = 64.0;
const MARGIN: f32 = 24.0;
/// LED diameter as a fraction of the cell pitch.
const LED_FILL: f32 = 0.72;

/// Placement of the LED grid inside the window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatrixLayout {
    pub origin: Vec2,
    pub pitch: f32,
    pub cols: i32,
    pub rows: i32,
}

impl MatrixLayout {
    /// Largest square pitch that fits `cols x rows` cells into the area,
    /// centered.
    pub fn fit(area: Rect, cols: i32, rows: i32) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        let pitch = (area.w / cols as f32).min(area.h / rows as f32).max(1.0);
        let size = vec2(pitch * cols as f32, pitch * rows as f32);
        let origin = vec2(area.x + (area.w - size.x) * 0.5, area.y + (area.h - size.y) * 0.5);
        Self {
            origin,
            pitch,
            cols,
            rows,
        }
    }

    /// Screen center of a cell. Row 0 is drawn at the bottom.
    pub fn cell_center(&self, col: i32, row: i32) -> Vec2 {
        let flipped = self.rows - 1 - row;
        self.origin + vec2((col as f32 + 0.5) * self.pitch, (flipped as f32 + 0.5) * self.pitch)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.origin.x,
            self.origin.y,
            self.pitch * self.cols as f32,
            self.pitch * self.rows as f32,
        )
    }
}

fn led_color(rgb: Rgb, brightness: u8) -> Color {
    let c = rgb.scaled(brightness);
    Color::from_rgba(c.r, c.g, c.b, 255)
}

/// Draw the frame as a board of round LEDs.
pub fn draw(matrix: &LedMatrix, brightness: u8, paused: bool) {
    clear_background(BG_COLOR);

    let area = Rect::new(
        MARGIN,
        TOOLBAR_HEIGHT + MARGIN,
        screen_width() - MARGIN * 2.0,
        screen_height() - TOOLBAR_HEIGHT - MARGIN * 2.0,
    );
    let layout = MatrixLayout::fit(area, matrix.width(), matrix.height());
    let board = layout.bounds();
    draw_rectangle(
        board.x - 6.0,
        board.y - 6.0,
        board.w + 12.0,
        board.h + 12.0,
        BOARD_COLOR,
    );

    let radius = layout.pitch * LED_FILL * 0.5;
    for (row, cells) in matrix.rows().enumerate() {
        for (col, &rgb) in cells.iter().enumerate() {
            let center = layout.cell_center(col as i32, row as i32);
            if rgb == Rgb::BLACK || brightness == 0 {
                draw_circle(center.x, center.y, radius, OFF_COLOR);
                continue;
            }
            let color = led_color(rgb, brightness);
            // Soft halo scaled by how much light the cell carries.
            let glow = (rgb.sum() as f32 / 765.0) * (brightness as f32 / 255.0);
            draw_circle(
                center.x,
                center.y,
                radius * 1.35,
                Color::new(color.r, color.g, color.b, 0.25 * glow),
            );
            draw_circle(center.x, center.y, radius, color);
        }
    }

    if paused {
        draw_paused_banner();
    }
}

fn draw_paused_banner() {
    let sh = Color::new(0.0, 0.0, 0.0, 0.5);
    let pause_text = "PAUSED (Space to resume)";
    let tw = measure_text(pause_text, None, 24, 1.0).width;
    let x = screen_width() * 0.5 - tw * 0.5;
    let y = screen_height() - 16.0;
    draw_text(pause_text, x + 1.0, y + 1.0, 24.0, sh);
    draw_text(pause_text, x, y, 24.0, Color::new(1.0, 0.8, 0.2, 0.9));
}
