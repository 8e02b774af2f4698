//! Braille rasterizer: a dot-resolution framebuffer behind the terminal grid.
//!
//! Every terminal cell holds a 2x4 block of braille dots, so the raster is
//! twice as wide and four times as tall as the cell area, and its dots come
//! out roughly square. Primitives are composited in floating point against a
//! black background; each cell then lights the dots that are bright enough
//! and takes the average color of its lit dots as foreground.

use dial_core::{BlendMode, Paint, Point, Rgba, Size, Surface};
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use crate::scene::density_for;

const DOTS_X: usize = 2;
const DOTS_Y: usize = 4;

const BRAILLE_BLANK: u32 = 0x2800;

/// Bit of each dot in a braille code point, indexed `[row][col]`.
const DOT_BITS: [[u32; DOTS_X]; DOTS_Y] = [[0x01, 0x08], [0x02, 0x10], [0x04, 0x20], [0x40, 0x80]];

/// Ordered dither offsets, indexed `[row][col]`.
const DITHER: [[f32; DOTS_X]; DOTS_Y] = [[0.0, 0.5], [0.75, 0.25], [0.125, 0.625], [0.875, 0.375]];

/// A dot lights when its brightest channel exceeds this plus its dither share.
const LIT_FLOOR: f32 = 0.03;
const DITHER_SPREAD: f32 = 0.10;

/// Minimum reach of a primitive so sub-dot shapes still land on a dot.
const MIN_REACH: f32 = 0.71;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Rgb {
    r: f32,
    g: f32,
    b: f32,
}

impl Rgb {
    fn peak(self) -> f32 {
        self.r.max(self.g).max(self.b)
    }
}

/// A text label snapped to the cell grid.
#[derive(Debug, Clone)]
struct Label {
    col: usize,
    row: usize,
    text: String,
    color: Color,
}

/// A [`Surface`] backed by braille dots.
#[derive(Debug, Clone, Default)]
pub struct BrailleRaster {
    cols: usize,
    rows: usize,
    density: f32,
    dots: Vec<Rgb>,
    labels: Vec<Label>,
}

impl BrailleRaster {
    pub fn new(cols: u16, rows: u16) -> Self {
        let mut raster = Self::default();
        raster.resize(cols, rows);
        raster
    }

    /// Match a new cell area and clear.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.into();
        self.rows = rows.into();
        self.density = density_for(self.size());
        self.dots = vec![Rgb::default(); self.width() * self.height()];
        self.labels.clear();
    }

    /// Reset every dot to black and drop labels.
    pub fn clear(&mut self) {
        self.dots.fill(Rgb::default());
        self.labels.clear();
    }

    pub fn cols(&self) -> u16 {
        self.cols as u16
    }

    pub fn rows(&self) -> u16 {
        self.rows as u16
    }

    fn width(&self) -> usize {
        self.cols * DOTS_X
    }

    fn height(&self) -> usize {
        self.rows * DOTS_Y
    }

    /// Braille character and foreground of the cell at `col`, `row`.
    ///
    /// `None` when no dot in the cell is lit.
    pub fn cell(&self, col: usize, row: usize) -> Option<(char, Color)> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        let mut bits = 0;
        let mut sum = Rgb::default();
        let mut lit = 0.0;
        for (dy, row_bits) in DOT_BITS.iter().enumerate() {
            for (dx, bit) in row_bits.iter().enumerate() {
                let dot = self.dots[(row * DOTS_Y + dy) * self.width() + col * DOTS_X + dx];
                if dot.peak() > LIT_FLOOR + DITHER[dy][dx] * DITHER_SPREAD {
                    bits |= bit;
                    sum.r += dot.r;
                    sum.g += dot.g;
                    sum.b += dot.b;
                    lit += 1.0;
                }
            }
        }
        if bits == 0 {
            return None;
        }
        let avg = Rgb {
            r: sum.r / lit,
            g: sum.g / lit,
            b: sum.b / lit,
        };
        // lift dim colors: peak p is shown as sqrt(p)
        let gain = 1.0 / avg.peak().sqrt();
        let color = Rgba::new(avg.r * gain, avg.g * gain, avg.b * gain, 1.0);
        let ch = char::from_u32(BRAILLE_BLANK + bits).unwrap_or(' ');
        Some((ch, color.into()))
    }

    /// Composite `color` onto the dot at `x`, `y`.
    fn blend(&mut self, x: usize, y: usize, color: Rgba, blend: BlendMode) {
        let width = self.width();
        let Some(dot) = self.dots.get_mut(y * width + x) else {
            return;
        };
        let a = color.a.clamp(0.0, 1.0);
        match blend {
            BlendMode::SrcOver => {
                dot.r = color.r * a + dot.r * (1.0 - a);
                dot.g = color.g * a + dot.g * (1.0 - a);
                dot.b = color.b * a + dot.b * (1.0 - a);
            }
            BlendMode::Plus => {
                dot.r = (dot.r + color.r * a).min(1.0);
                dot.g = (dot.g + color.g * a).min(1.0);
                dot.b = (dot.b + color.b * a).min(1.0);
            }
        }
    }

    /// Dot index ranges covering the box from `min` to `max`, clipped to the raster.
    fn bounds(
        &self,
        min: Point,
        max: Point,
    ) -> Option<(std::ops::Range<usize>, std::ops::Range<usize>)> {
        let clip = |lo: f32, hi: f32, len: usize| {
            let lo = lo.floor().max(0.0) as usize;
            let hi = (hi.ceil().max(0.0) as usize).min(len);
            (lo < hi).then_some(lo..hi)
        };
        Some((
            clip(min.x, max.x, self.width())?,
            clip(min.y, max.y, self.height())?,
        ))
    }

    /// Composite `paint` onto every dot whose center passes `inside`.
    fn cover(
        &mut self,
        min: Point,
        max: Point,
        paint: &Paint,
        alpha: f32,
        blend: BlendMode,
        inside: impl Fn(Point) -> bool,
    ) {
        let Some((xs, ys)) = self.bounds(min, max) else {
            return;
        };
        for y in ys {
            for x in xs.clone() {
                let p = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                if inside(p) {
                    let color = paint.color_at(p);
                    self.blend(x, y, color.scale_alpha(alpha), blend);
                }
            }
        }
    }
}

impl Surface for BrailleRaster {
    fn size(&self) -> Size {
        Size::new(self.width() as f32, self.height() as f32)
    }

    fn density(&self) -> f32 {
        self.density
    }

    fn fill_circle(&mut self, center: Point, radius: f32, paint: &Paint, blend: BlendMode) {
        let reach = radius.max(MIN_REACH);
        let min = Point::new(center.x - reach, center.y - reach);
        let max = Point::new(center.x + reach, center.y + reach);
        self.cover(min, max, paint, 1.0, blend, |p| {
            center.distance_to(p) <= reach
        });
    }

    fn stroke_circle(
        &mut self,
        center: Point,
        radius: f32,
        width: f32,
        paint: &Paint,
        alpha: f32,
        blend: BlendMode,
    ) {
        let half = (width * 0.5).max(MIN_REACH * 0.5);
        let outer = radius + half;
        let inner = radius - half;
        let min = Point::new(center.x - outer, center.y - outer);
        let max = Point::new(center.x + outer, center.y + outer);
        self.cover(min, max, paint, alpha, blend, |p| {
            let d = center.distance_to(p);
            d >= inner && d <= outer
        });
    }

    fn line(&mut self, start: Point, end: Point, width: f32, color: Rgba) {
        let half = (width * 0.5).max(MIN_REACH * 0.85);
        let min = Point::new(start.x.min(end.x) - half, start.y.min(end.y) - half);
        let max = Point::new(start.x.max(end.x) + half, start.y.max(end.y) + half);
        let paint = Paint::Solid(color);
        self.cover(min, max, &paint, 1.0, BlendMode::SrcOver, |p| {
            distance_to_segment(p, start, end) <= half
        });
    }

    fn text(&mut self, center: Point, text: &str, color: Rgba) {
        if center.x < 0.0 || center.y < 0.0 {
            return;
        }
        let col = (center.x / DOTS_X as f32) as usize;
        let row = (center.y / DOTS_Y as f32) as usize;
        if row >= self.rows {
            return;
        }
        let len = text.chars().count();
        self.labels.push(Label {
            col: col.saturating_sub(len / 2),
            row,
            text: text.to_string(),
            color: color.into(),
        });
    }
}

impl Widget for &BrailleRaster {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cols = self.cols.min(area.width.into());
        let rows = self.rows.min(area.height.into());
        for row in 0..rows {
            for col in 0..cols {
                let Some((ch, fg)) = self.cell(col, row) else {
                    continue;
                };
                let position = (area.x + col as u16, area.y + row as u16);
                if let Some(cell) = buf.cell_mut(position) {
                    cell.set_char(ch).set_fg(fg);
                }
            }
        }
        for label in self.labels.iter().filter(|l| l.row < rows) {
            for (i, ch) in label.text.chars().enumerate() {
                let col = label.col + i;
                if col >= cols {
                    break;
                }
                let position = (area.x + col as u16, area.y + label.row as u16);
                if let Some(cell) = buf.cell_mut(position) {
                    cell.set_char(ch).set_fg(label.color);
                }
            }
        }
    }
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let ab = b - a;
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq <= f32::EPSILON {
        return p.distance_to(a);
    }
    let ap = p - a;
    let t = ((ap.x * ab.x + ap.y * ab.y) / len_sq).clamp(0.0, 1.0);
    p.distance_to(Point::new(a.x + ab.x * t, a.y + ab.y * t))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: char = '\u{28FF}';

    #[test]
    fn test_size_in_dots() {
        let raster = BrailleRaster::new(10, 5);
        assert_eq!(raster.size(), Size::new(20.0, 20.0));
        assert!(raster.cell(0, 0).is_none());
        assert!(raster.cell(10, 0).is_none());
    }

    #[test]
    fn test_filled_disc_lights_whole_cells() {
        let mut raster = BrailleRaster::new(10, 5);
        raster.fill_circle(
            Point::new(10.0, 10.0),
            8.0,
            &Paint::Solid(Rgba::WHITE),
            BlendMode::SrcOver,
        );
        // cell (5, 2) covers dots x 10..12, y 8..12, all inside the disc
        assert_eq!(raster.cell(5, 2), Some((FULL, Color::Rgb(255, 255, 255))));
        assert!(raster.cell(0, 0).is_none());
    }

    #[test]
    fn test_plus_saturates_and_src_over_replaces() {
        let mut raster = BrailleRaster::new(4, 2);
        let red = Paint::Solid(Rgba::RED.with_alpha(0.6));
        let center = Point::new(4.0, 4.0);
        raster.fill_circle(center, 20.0, &red, BlendMode::Plus);
        raster.fill_circle(center, 20.0, &red, BlendMode::Plus);
        assert_eq!(raster.dots[0], Rgb { r: 1.0, g: 0.0, b: 0.0 });

        raster.fill_circle(center, 20.0, &Paint::Solid(Rgba::GREEN), BlendMode::SrcOver);
        assert_eq!(raster.dots[0], Rgb { r: 0.0, g: 1.0, b: 0.0 });
    }

    #[test]
    fn test_faint_paint_stays_dark() {
        let mut raster = BrailleRaster::new(4, 2);
        raster.fill_circle(
            Point::new(4.0, 4.0),
            20.0,
            &Paint::Solid(Rgba::WHITE.with_alpha(0.01)),
            BlendMode::Plus,
        );
        assert!(raster.cell(0, 0).is_none());
    }

    #[test]
    fn test_ring_leaves_center_dark() {
        let mut raster = BrailleRaster::new(20, 10);
        raster.stroke_circle(
            Point::new(20.0, 20.0),
            15.0,
            2.0,
            &Paint::Solid(Rgba::WHITE),
            1.0,
            BlendMode::SrcOver,
        );
        assert!(raster.cell(10, 5).is_none());
        // the ring passes through x = 35 at the center row
        assert!(raster.cell(17, 5).is_some());
    }

    #[test]
    fn test_line_and_label_render_to_buffer() {
        let mut raster = BrailleRaster::new(10, 5);
        raster.line(
            Point::new(0.5, 2.0),
            Point::new(19.5, 2.0),
            1.0,
            Rgba::GREEN,
        );
        raster.text(Point::new(10.0, 18.0), "12", Rgba::WHITE);

        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        (&raster).render(area, &mut buf);

        assert_ne!(buf[(3, 0)].symbol(), " ");
        assert_eq!(buf[(3, 0)].fg, Color::Rgb(0, 255, 0));
        assert_eq!(buf[(4, 4)].symbol(), "1");
        assert_eq!(buf[(5, 4)].symbol(), "2");
        assert_eq!(buf[(3, 2)].symbol(), " ");
    }

    #[test]
    fn test_out_of_bounds_is_clipped() {
        let mut raster = BrailleRaster::new(2, 1);
        raster.fill_circle(
            Point::new(-50.0, -50.0),
            3.0,
            &Paint::Solid(Rgba::WHITE),
            BlendMode::SrcOver,
        );
        raster.line(
            Point::new(-10.0, 100.0),
            Point::new(100.0, 100.0),
            1.0,
            Rgba::WHITE,
        );
        raster.text(Point::new(1.0, 50.0), "9", Rgba::WHITE);
        assert!(raster.dots.iter().all(|d| d.peak() == 0.0));
        assert!(raster.labels.is_empty());
    }

    #[test]
    fn test_bounds_clip_to_raster() {
        // 2x1 cells is 4x4 dots
        let raster = BrailleRaster::new(2, 1);
        assert_eq!(
            raster.bounds(Point::new(-1.5, 1.2), Point::new(10.0, 2.5)),
            Some((0..4, 1..3))
        );
        assert_eq!(
            raster.bounds(Point::new(5.0, 0.0), Point::new(8.0, 3.0)),
            None
        );
    }

    #[test]
    fn test_resize_resets_density() {
        let mut raster = BrailleRaster::new(10, 5);
        let before = raster.density();
        raster.resize(130, 65);
        assert_eq!(raster.size(), Size::new(260.0, 260.0));
        assert!((raster.density() - 0.5).abs() < 1e-6);
        assert!(raster.density() > before);
    }
}
