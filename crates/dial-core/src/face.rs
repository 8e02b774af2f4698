//! Clock face geometry: ticks, numerals, hands.

use crate::angles::HandAngles;
use crate::color::Rgba;
use crate::geometry::Point;
use crate::paint::{BlendMode, Paint};
use crate::surface::Surface;

const HOUR_TICK_LENGTH_DP: f32 = 20.0;
const MINUTE_TICK_LENGTH_DP: f32 = 10.0;
const HOUR_TICK_WIDTH_DP: f32 = 2.0;
const MINUTE_TICK_WIDTH_DP: f32 = 1.0;
/// Numerals sit this far inside the rim.
const LABEL_INSET_DP: f32 = 36.0;

const SECOND_HAND_LENGTH: f32 = 0.9;
const MINUTE_HAND_LENGTH: f32 = 0.75;
const HOUR_HAND_LENGTH: f32 = 0.5;
const SECOND_HAND_WIDTH_DP: f32 = 1.0;
const MINUTE_HAND_WIDTH_DP: f32 = 3.0;
const HOUR_HAND_WIDTH_DP: f32 = 4.0;
const CENTER_DOT_DP: f32 = 6.0;

/// Colors used for the face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacePalette {
    pub ink: Rgba,
    pub hour_marker: Rgba,
    pub second_hand: Rgba,
}

impl Default for FacePalette {
    fn default() -> Self {
        // light ink: the face is drawn on dark terminals
        Self {
            ink: Rgba::from_argb(0xFFE5E7EB),
            hour_marker: Rgba::GREEN,
            second_hand: Rgba::RED,
        }
    }
}

/// What to draw and in which colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceStyle {
    pub show_numerals: bool,
    pub palette: FacePalette,
}

impl Default for FaceStyle {
    fn default() -> Self {
        Self {
            show_numerals: true,
            palette: FacePalette::default(),
        }
    }
}

/// Draw a hand-like line from `pivot`, pointing `angle_deg` clockwise from
/// 12 o'clock.
pub fn draw_rotated_line(
    surface: &mut dyn Surface,
    angle_deg: f32,
    length: f32,
    width: f32,
    color: Rgba,
    pivot: Point,
) {
    let rad = angle_deg.to_radians();
    let tip = Point::new(pivot.x + length * rad.sin(), pivot.y - length * rad.cos());
    surface.line(tip, pivot, width, color);
}

/// Paint the face: 60 ticks, numerals, the three hands and a center dot.
///
/// `angles.second` is used as given, so callers pass the spring's display
/// angle rather than the raw stepped value.
pub fn draw_face(
    surface: &mut dyn Surface,
    center: Point,
    radius: f32,
    angles: &HandAngles,
    style: &FaceStyle,
) {
    let palette = style.palette;

    for i in 1..=60 {
        let rad = (i as f32 * 6.0 - 90.0).to_radians();
        let is_hour_marker = i % 5 == 0;
        let (length, width, color) = if is_hour_marker {
            (
                surface.dp(HOUR_TICK_LENGTH_DP),
                surface.dp(HOUR_TICK_WIDTH_DP),
                palette.hour_marker,
            )
        } else {
            (
                surface.dp(MINUTE_TICK_LENGTH_DP),
                surface.dp(MINUTE_TICK_WIDTH_DP),
                palette.ink,
            )
        };
        let start = center.polar(radius - length, rad);
        let end = center.polar(radius, rad);
        surface.line(start, end, width, color);
    }

    if style.show_numerals {
        let label_radius = radius - surface.dp(LABEL_INSET_DP);
        for hour in 1..=12 {
            let rad = (hour as f32 * 30.0 - 90.0).to_radians();
            surface.text(center.polar(label_radius, rad), &hour.to_string(), palette.ink);
        }
    }

    let second_width = surface.dp(SECOND_HAND_WIDTH_DP);
    let minute_width = surface.dp(MINUTE_HAND_WIDTH_DP);
    let hour_width = surface.dp(HOUR_HAND_WIDTH_DP);
    draw_rotated_line(
        surface,
        angles.second,
        radius * SECOND_HAND_LENGTH,
        second_width,
        palette.second_hand,
        center,
    );
    draw_rotated_line(
        surface,
        angles.minute,
        radius * MINUTE_HAND_LENGTH,
        minute_width,
        palette.ink,
        center,
    );
    draw_rotated_line(
        surface,
        angles.hour,
        radius * HOUR_HAND_LENGTH,
        hour_width,
        palette.ink,
        center,
    );

    let dot = surface.dp(CENTER_DOT_DP);
    surface.fill_circle(center, dot, &Paint::Solid(palette.ink), BlendMode::SrcOver);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use crate::surface::{DisplayList, Primitive};

    fn line_tip(p: &Primitive) -> Point {
        match p {
            Primitive::Line { start, .. } => *start,
            other => panic!("expected line, got {other:?}"),
        }
    }

    #[test]
    fn test_rotated_line_points_clockwise_from_noon() {
        let mut list = DisplayList::new(Size::new(100.0, 100.0), 1.0);
        let pivot = Point::new(50.0, 50.0);
        draw_rotated_line(&mut list, 0.0, 10.0, 1.0, Rgba::RED, pivot);
        draw_rotated_line(&mut list, 90.0, 10.0, 1.0, Rgba::RED, pivot);
        draw_rotated_line(&mut list, 180.0, 10.0, 1.0, Rgba::RED, pivot);

        let noon = line_tip(&list.primitives()[0]);
        let three = line_tip(&list.primitives()[1]);
        let six = line_tip(&list.primitives()[2]);
        assert!((noon.x - 50.0).abs() < 1e-4 && (noon.y - 40.0).abs() < 1e-4);
        assert!((three.x - 60.0).abs() < 1e-4 && (three.y - 50.0).abs() < 1e-4);
        assert!((six.x - 50.0).abs() < 1e-4 && (six.y - 60.0).abs() < 1e-4);
    }

    #[test]
    fn test_face_primitive_counts() {
        let mut list = DisplayList::new(Size::new(400.0, 400.0), 1.0);
        let angles = HandAngles::default();
        draw_face(
            &mut list,
            Point::new(200.0, 200.0),
            150.0,
            &angles,
            &FaceStyle::default(),
        );

        let lines = list
            .primitives()
            .iter()
            .filter(|p| matches!(p, Primitive::Line { .. }))
            .count();
        let texts = list
            .primitives()
            .iter()
            .filter(|p| matches!(p, Primitive::Text { .. }))
            .count();
        // 60 ticks + 3 hands
        assert_eq!(lines, 63);
        assert_eq!(texts, 12);
        assert_eq!(list.circle_count(), 1);
    }

    #[test]
    fn test_hour_markers_are_longer_and_green() {
        let mut list = DisplayList::new(Size::new(400.0, 400.0), 1.0);
        draw_face(
            &mut list,
            Point::new(200.0, 200.0),
            150.0,
            &HandAngles::default(),
            &FaceStyle::default(),
        );
        let ticks = &list.primitives()[..60];
        for (i, tick) in ticks.iter().enumerate() {
            let Primitive::Line {
                start, end, color, ..
            } = tick
            else {
                panic!("tick {i} is not a line");
            };
            let length = start.distance_to(*end);
            if (i + 1) % 5 == 0 {
                assert!((length - 20.0).abs() < 1e-3);
                assert_eq!(*color, Rgba::GREEN);
            } else {
                assert!((length - 10.0).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_numerals_can_be_hidden() {
        let mut list = DisplayList::new(Size::new(400.0, 400.0), 1.0);
        let style = FaceStyle {
            show_numerals: false,
            ..FaceStyle::default()
        };
        draw_face(
            &mut list,
            Point::new(200.0, 200.0),
            150.0,
            &HandAngles::default(),
            &style,
        );
        assert!(
            !list
                .primitives()
                .iter()
                .any(|p| matches!(p, Primitive::Text { .. }))
        );
    }
}
