//! The drawing capability the clock and its effects paint onto.

use crate::color::Rgba;
use crate::geometry::{Point, Size};
use crate::paint::{BlendMode, Paint};

/// Primitive drawing operations required by the clock and its effects.
///
/// Coordinates are surface pixels with the origin at the top-left and y
/// growing downward. Static geometry is authored in density-independent
/// units (dp) and converted with [`Surface::dp`].
pub trait Surface {
    /// Width and height of the drawable area.
    fn size(&self) -> Size;

    /// Surface pixels per dp.
    fn density(&self) -> f32;

    fn fill_circle(&mut self, center: Point, radius: f32, paint: &Paint, blend: BlendMode);

    /// Stroke a ring centered on `radius`, `width` pixels wide. `alpha`
    /// multiplies the paint's own alpha.
    fn stroke_circle(
        &mut self,
        center: Point,
        radius: f32,
        width: f32,
        paint: &Paint,
        alpha: f32,
        blend: BlendMode,
    );

    fn line(&mut self, start: Point, end: Point, width: f32, color: Rgba);

    /// Draw a short label centered on `center`.
    fn text(&mut self, center: Point, text: &str, color: Rgba);

    fn center(&self) -> Point {
        self.size().center()
    }

    fn dp(&self, value: f32) -> f32 {
        value * self.density()
    }
}

/// Fill or stroke of a recorded circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Style {
    Fill,
    Stroke { width: f32 },
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Circle {
        center: Point,
        radius: f32,
        style: Style,
        paint: Paint,
        alpha: f32,
        blend: BlendMode,
    },
    Line {
        start: Point,
        end: Point,
        width: f32,
        color: Rgba,
    },
    Text {
        center: Point,
        text: String,
        color: Rgba,
    },
}

/// A [`Surface`] that records every call in order.
///
/// Front ends replay the list onto their own raster; tests inspect it.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    size: Size,
    density: f32,
    primitives: Vec<Primitive>,
}

impl DisplayList {
    pub fn new(size: Size, density: f32) -> Self {
        Self {
            size,
            density,
            primitives: Vec::new(),
        }
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn clear(&mut self) {
        self.primitives.clear();
    }

    /// Number of recorded circles (filled or stroked).
    pub fn circle_count(&self) -> usize {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Circle { .. }))
            .count()
    }

    /// Issue every recorded call, in order, against `target`.
    pub fn replay(&self, target: &mut dyn Surface) {
        for primitive in &self.primitives {
            match primitive {
                Primitive::Circle {
                    center,
                    radius,
                    style: Style::Fill,
                    paint,
                    blend,
                    ..
                } => target.fill_circle(*center, *radius, paint, *blend),
                Primitive::Circle {
                    center,
                    radius,
                    style: Style::Stroke { width },
                    paint,
                    alpha,
                    blend,
                } => target.stroke_circle(*center, *radius, *width, paint, *alpha, *blend),
                Primitive::Line {
                    start,
                    end,
                    width,
                    color,
                } => target.line(*start, *end, *width, *color),
                Primitive::Text {
                    center,
                    text,
                    color,
                } => target.text(*center, text, *color),
            }
        }
    }
}

impl Surface for DisplayList {
    fn size(&self) -> Size {
        self.size
    }

    fn density(&self) -> f32 {
        self.density
    }

    fn fill_circle(&mut self, center: Point, radius: f32, paint: &Paint, blend: BlendMode) {
        self.primitives.push(Primitive::Circle {
            center,
            radius,
            style: Style::Fill,
            paint: paint.clone(),
            alpha: 1.0,
            blend,
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
        self.primitives.push(Primitive::Circle {
            center,
            radius,
            style: Style::Stroke { width },
            paint: paint.clone(),
            alpha: alpha.clamp(0.0, 1.0),
            blend,
        });
    }

    fn line(&mut self, start: Point, end: Point, width: f32, color: Rgba) {
        self.primitives.push(Primitive::Line {
            start,
            end,
            width,
            color,
        });
    }

    fn text(&mut self, center: Point, text: &str, color: Rgba) {
        self.primitives.push(Primitive::Text {
            center,
            text: text.to_string(),
            color,
        });
    }
}
