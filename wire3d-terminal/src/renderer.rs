/// Character-cell canvas that rasterizes line segments for the terminal
use crossterm::{
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wire3d_core::{Color, LineSink};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    color: Option<Color>,
}

const EMPTY: Cell = Cell {
    glyph: ' ',
    color: None,
};

/// Line canvas backed by a character buffer
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![EMPTY; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Glyph at a cell, `None` outside the canvas.
    pub fn glyph(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x].glyph)
    }

    pub fn color(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x].color
        } else {
            None
        }
    }

    pub fn lit_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.color.is_some()).count()
    }

    fn plot(&mut self, x: i32, y: i32, glyph: char, color: Color) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = Cell {
                glyph,
                color: Some(color),
            };
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current: Option<Color> = None;
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = self.cells[y * self.width + x];
                if let Some(color) = cell.color {
                    if current != Some(color) {
                        let (r, g, b) = color.rgb();
                        writer.queue(SetForegroundColor(TermColor::Rgb { r, g, b }))?;
                        current = Some(color);
                    }
                }
                writer.queue(Print(cell.glyph))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }

    /// Plain text rendering without colour, one line per row.
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity((self.width + 1) * self.height);
        for row in self.cells.chunks(self.width.max(1)) {
            text.extend(row.iter().map(|c| c.glyph));
            text.push('\n');
        }
        text
    }
}

/// Glyph that best follows a segment's direction on screen (y grows down).
fn glyph_for(dx: f64, dy: f64) -> char {
    let (adx, ady) = (dx.abs(), dy.abs());
    if ady * 2.0 < adx {
        '-'
    } else if adx * 2.0 < ady {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        '\\'
    } else {
        '/'
    }
}

/// Liang-Barsky clip of a segment against `[0, max_x] x [0, max_y]`.
fn clip(
    (x0, y0): (f64, f64),
    (x1, y1): (f64, f64),
    max_x: f64,
    max_y: f64,
) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (x1 - x0, y1 - y0);
    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;
    for (p, q) in [(-dx, x0), (dx, max_x - x0), (-dy, y0), (dy, max_y - y0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some(((x0 + t0 * dx, y0 + t0 * dy), (x0 + t1 * dx, y0 + t1 * dy)))
}

impl LineSink for Canvas {
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let (fx0, fy0, fx1, fy1) = (x0 as f64, y0 as f64, x1 as f64, y1 as f64);
        let glyph = glyph_for(fx1 - fx0, fy1 - fy0);
        let Some(((cx0, cy0), (cx1, cy1))) = clip(
            (fx0, fy0),
            (fx1, fy1),
            (self.width - 1) as f64,
            (self.height - 1) as f64,
        ) else {
            return;
        };

        // Bresenham over the clipped span
        let (mut x, mut y) = (cx0.round() as i32, cy0.round() as i32);
        let (end_x, end_y) = (cx1.round() as i32, cy1.round() as i32);
        let dx = (end_x - x).abs();
        let dy = -(end_y - y).abs();
        let sx = if x < end_x { 1 } else { -1 };
        let sy = if y < end_y { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.plot(x, y, glyph, color);
            if x == end_x && y == end_y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}
