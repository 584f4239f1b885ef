//! Integer scan conversion.
//!
//! Every algorithm here reduces a shape to a sequence of
//! [`Canvas::set_pixel`] calls. None of them clip: the canvas drops whatever
//! falls outside of it.

use embedded_graphics::prelude::Point;
use embedded_graphics::prelude::Size;

use crate::font;
use crate::ColorCode;

/// Anything that accepts single pixel writes.
///
/// Implementations must silently ignore points they cannot show.
pub trait Canvas {
    fn set_pixel(&mut self, p: Point, color: ColorCode);
}

impl<T: Canvas + ?Sized> Canvas for &mut T {
    fn set_pixel(&mut self, p: Point, color: ColorCode) {
        (**self).set_pixel(p, color);
    }
}

/// Drawing operations for every [`Canvas`].
///
/// # Example
/// ```rust
/// use embedded_graphics::prelude::*;
/// use matrixdeck::CanvasExt;
/// use matrixdeck::ColorCode;
/// use matrixdeck::MatrixFrameBuffer;
///
/// let mut fb = MatrixFrameBuffer::new();
/// fb.draw_rect(Point::new(0, 0), Size::new(32, 16), ColorCode::GREEN);
/// fb.draw_circle(Point::new(16, 8), 5, ColorCode::RED);
/// fb.draw_text(Point::new(1, 1), "HI", ColorCode::AMBER, 1);
/// assert_eq!(fb.get_pixel(Point::new(31, 15)), Some(ColorCode::GREEN));
/// ```
pub trait CanvasExt: Canvas {
    fn draw_line(&mut self, start: Point, end: Point, color: ColorCode) {
        draw_line(self, start, end, color);
    }

    fn draw_rect(&mut self, top_left: Point, size: Size, color: ColorCode) {
        draw_rect(self, top_left, size, color);
    }

    fn fill_rect(&mut self, top_left: Point, size: Size, color: ColorCode) {
        fill_rect(self, top_left, size, color);
    }

    fn draw_circle(&mut self, center: Point, radius: u32, color: ColorCode) {
        draw_circle(self, center, radius, color);
    }

    fn draw_char(&mut self, origin: Point, ch: char, color: ColorCode, size: u32) {
        font::draw_char(self, origin, ch, color, size);
    }

    fn draw_text(&mut self, origin: Point, text: &str, color: ColorCode, size: u32) -> Point {
        font::draw_text(self, origin, text, color, size)
    }
}

impl<T: Canvas + ?Sized> CanvasExt for T {}

fn extent(len: u32) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}

/// Bresenham line from `start` to `end`, both ends included.
///
/// Produces an 8-connected path with exactly one pixel per step along the
/// major axis.
pub fn draw_line<C: Canvas + ?Sized>(
    canvas: &mut C,
    start: Point,
    end: Point,
    color: ColorCode,
) {
    let dx = (i64::from(end.x) - i64::from(start.x)).abs();
    let dy = (i64::from(end.y) - i64::from(start.y)).abs();
    let sx = if start.x < end.x { 1 } else { -1 };
    let sy = if start.y < end.y { 1 } else { -1 };
    let mut err = dx - dy;
    let mut p = start;

    loop {
        canvas.set_pixel(p, color);
        if p == end {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            p.x += sx;
        }
        if e2 < dx {
            err += dx;
            p.y += sy;
        }
    }
}

/// Outline of the `size` box anchored at `top_left`.
///
/// An empty box draws nothing.
pub fn draw_rect<C: Canvas + ?Sized>(
    canvas: &mut C,
    top_left: Point,
    size: Size,
    color: ColorCode,
) {
    if size.width == 0 || size.height == 0 {
        return;
    }
    let left = top_left.x;
    let top = top_left.y;
    let right = left.saturating_add(extent(size.width) - 1);
    let bottom = top.saturating_add(extent(size.height) - 1);

    draw_line(canvas, Point::new(left, top), Point::new(right, top), color);
    draw_line(canvas, Point::new(left, bottom), Point::new(right, bottom), color);
    draw_line(canvas, Point::new(left, top), Point::new(left, bottom), color);
    draw_line(canvas, Point::new(right, top), Point::new(right, bottom), color);
}

/// Every pixel of the `size` box anchored at `top_left`.
pub fn fill_rect<C: Canvas + ?Sized>(
    canvas: &mut C,
    top_left: Point,
    size: Size,
    color: ColorCode,
) {
    for row in 0..size.height {
        let y = top_left.y.saturating_add_unsigned(row);
        for col in 0..size.width {
            canvas.set_pixel(Point::new(top_left.x.saturating_add_unsigned(col), y), color);
        }
    }
}

/// Midpoint circle around `center`.
///
/// Each step plots the eight reflections of one octant point. A radius of
/// zero plots the center only.
pub fn draw_circle<C: Canvas + ?Sized>(
    canvas: &mut C,
    center: Point,
    radius: u32,
    color: ColorCode,
) {
    let mut x = extent(radius);
    let mut y = 0i32;
    let mut err = 0i64;

    while x >= y {
        for (dx, dy) in [
            (x, y),
            (y, x),
            (-y, x),
            (-x, y),
            (-x, -y),
            (-y, -x),
            (y, -x),
            (x, -y),
        ] {
            canvas.set_pixel(
                Point::new(center.x.saturating_add(dx), center.y.saturating_add(dy)),
                color,
            );
        }

        y += 1;
        if err <= 0 {
            err += 2 * i64::from(y) + 1;
        }
        if err > 0 {
            x -= 1;
            err -= 2 * i64::from(x) + 1;
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::BTreeSet;
    use std::vec::Vec;

    use proptest::prelude::*;

    use super::*;
    use crate::MatrixFrameBuffer;

    /// Canvas that remembers every write, in order, without clipping.
    #[derive(Default)]
    pub(crate) struct Recorder {
        pub(crate) writes: Vec<(i32, i32, ColorCode)>,
    }

    impl Canvas for Recorder {
        fn set_pixel(&mut self, p: Point, color: ColorCode) {
            self.writes.push((p.x, p.y, color));
        }
    }

    impl Recorder {
        pub(crate) fn points(&self) -> Vec<(i32, i32)> {
            self.writes.iter().map(|&(x, y, _)| (x, y)).collect()
        }

        pub(crate) fn unique(&self) -> BTreeSet<(i32, i32)> {
            self.writes.iter().map(|&(x, y, _)| (x, y)).collect()
        }
    }

    #[test]
    fn horizontal_line() {
        let mut rec = Recorder::default();
        rec.draw_line(Point::new(0, 0), Point::new(5, 0), ColorCode::RED);
        assert_eq!(rec.points(), [(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (5, 0)]);
    }

    #[test]
    fn diagonal_line() {
        let mut rec = Recorder::default();
        rec.draw_line(Point::new(0, 0), Point::new(3, 3), ColorCode::RED);
        assert_eq!(rec.points(), [(0, 0), (1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn reversed_vertical_line() {
        let mut rec = Recorder::default();
        rec.draw_line(Point::new(2, 4), Point::new(2, 1), ColorCode::GREEN);
        assert_eq!(rec.points(), [(2, 4), (2, 3), (2, 2), (2, 1)]);
    }

    #[test]
    fn shallow_and_steep_slopes() {
        let mut rec = Recorder::default();
        rec.draw_line(Point::new(0, 0), Point::new(4, 2), ColorCode::RED);
        assert_eq!(rec.points(), [(0, 0), (1, 0), (2, 1), (3, 1), (4, 2)]);

        let mut rec = Recorder::default();
        rec.draw_line(Point::new(0, 0), Point::new(2, 4), ColorCode::RED);
        assert_eq!(rec.points(), [(0, 0), (0, 1), (1, 2), (1, 3), (2, 4)]);
    }

    #[test]
    fn single_point_line() {
        let mut rec = Recorder::default();
        rec.draw_line(Point::new(7, 7), Point::new(7, 7), ColorCode::AMBER);
        assert_eq!(rec.writes, [(7, 7, ColorCode::AMBER)]);
    }

    #[test]
    fn line_off_panel_is_clipped() {
        let mut fb = MatrixFrameBuffer::new();
        fb.draw_line(Point::new(-10, 3), Point::new(40, 3), ColorCode::RED);
        assert_eq!(fb.lit_count(), 32);
    }

    #[test]
    fn empty_rect_draws_nothing() {
        let mut rec = Recorder::default();
        rec.draw_rect(Point::new(3, 3), Size::new(0, 5), ColorCode::RED);
        rec.draw_rect(Point::new(3, 3), Size::new(5, 0), ColorCode::RED);
        rec.draw_rect(Point::new(3, 3), Size::new(0, 0), ColorCode::RED);
        assert!(rec.writes.is_empty());
    }

    #[test]
    fn rect_outline() {
        let mut rec = Recorder::default();
        rec.draw_rect(Point::new(1, 1), Size::new(4, 3), ColorCode::GREEN);
        let expected: BTreeSet<_> = [
            (1, 1),
            (2, 1),
            (3, 1),
            (4, 1),
            (1, 2),
            (4, 2),
            (1, 3),
            (2, 3),
            (3, 3),
            (4, 3),
        ]
        .into_iter()
        .collect();
        assert_eq!(rec.unique(), expected);
    }

    #[test]
    fn thin_rects_collapse_to_a_line() {
        let mut rec = Recorder::default();
        rec.draw_rect(Point::new(2, 2), Size::new(1, 3), ColorCode::RED);
        assert_eq!(rec.unique(), [(2, 2), (2, 3), (2, 4)].into_iter().collect::<BTreeSet<_>>());

        let mut rec = Recorder::default();
        rec.draw_rect(Point::new(2, 2), Size::new(1, 1), ColorCode::RED);
        assert_eq!(rec.unique(), [(2, 2)].into_iter().collect::<BTreeSet<_>>());
    }

    #[test]
    fn filled_rect_writes_its_span_once() {
        let mut rec = Recorder::default();
        rec.fill_rect(Point::new(0, 0), Size::new(4, 4), ColorCode::RED);
        assert_eq!(rec.writes.len(), 16);
        assert_eq!(rec.unique().len(), 16);
        assert!(rec.unique().iter().all(|&(x, y)| (0..4).contains(&x) && (0..4).contains(&y)));
    }

    #[test]
    fn filled_rect_is_clipped_by_the_framebuffer() {
        let mut fb = MatrixFrameBuffer::new();
        fb.fill_rect(Point::new(30, 14), Size::new(4, 4), ColorCode::AMBER);
        assert_eq!(fb.lit_count(), 4);
        fb.fill_rect(Point::new(-2, -2), Size::new(3, 3), ColorCode::AMBER);
        assert_eq!(fb.lit_count(), 5);
    }

    #[test]
    fn empty_filled_rect_draws_nothing() {
        let mut rec = Recorder::default();
        rec.fill_rect(Point::new(0, 0), Size::new(0, 4), ColorCode::RED);
        rec.fill_rect(Point::new(0, 0), Size::new(4, 0), ColorCode::RED);
        assert!(rec.writes.is_empty());
    }

    #[test]
    fn circle_radius_three() {
        let center = Point::new(10, 8);
        let mut rec = Recorder::default();
        rec.draw_circle(center, 3, ColorCode::RED);

        let points = rec.unique();
        assert!(!points.is_empty());
        for &(x, y) in &points {
            let dx = f64::from(x - center.x);
            let dy = f64::from(y - center.y);
            let d = (dx * dx + dy * dy).sqrt().round() as i32;
            assert!((2..=4).contains(&d), "({x}, {y}) is {d} away");
        }

        for &(x, y) in &points {
            let (dx, dy) = (x - center.x, y - center.y);
            for (rx, ry) in [
                (dx, dy),
                (-dx, dy),
                (dx, -dy),
                (-dx, -dy),
                (dy, dx),
                (-dy, dx),
                (dy, -dx),
                (-dy, -dx),
            ] {
                assert!(points.contains(&(center.x + rx, center.y + ry)));
            }
        }
        assert!(points.contains(&(13, 8)));
        assert!(points.contains(&(10, 5)));
    }

    #[test]
    fn circle_radius_zero_is_the_center() {
        let mut rec = Recorder::default();
        rec.draw_circle(Point::new(4, 4), 0, ColorCode::GREEN);
        assert_eq!(rec.unique(), [(4, 4)].into_iter().collect::<BTreeSet<_>>());
    }

    #[test]
    fn circle_radius_one() {
        let mut rec = Recorder::default();
        rec.draw_circle(Point::new(4, 4), 1, ColorCode::GREEN);
        assert_eq!(
            rec.unique(),
            [(3, 4), (5, 4), (4, 3), (4, 5)].into_iter().collect::<BTreeSet<_>>()
        );
    }

    #[test]
    fn circles_have_no_gaps() {
        for radius in 1..12 {
            let mut rec = Recorder::default();
            rec.draw_circle(Point::new(0, 0), radius, ColorCode::RED);
            let points = rec.unique();
            for &(x, y) in &points {
                let neighbours = points
                    .iter()
                    .filter(|&&(nx, ny)| {
                        (nx, ny) != (x, y) && (nx - x).abs() <= 1 && (ny - y).abs() <= 1
                    })
                    .count();
                assert!(neighbours >= 2, "radius {radius}: ({x}, {y}) is loose");
            }
        }
    }

    proptest! {
        #[test]
        fn lines_are_connected_and_hit_both_ends(
            x0 in -40i32..40, y0 in -40i32..40, x1 in -40i32..40, y1 in -40i32..40,
        ) {
            let mut rec = Recorder::default();
            rec.draw_line(Point::new(x0, y0), Point::new(x1, y1), ColorCode::RED);
            let points = rec.points();

            prop_assert_eq!(points.first().copied(), Some((x0, y0)));
            prop_assert_eq!(points.last().copied(), Some((x1, y1)));
            let major = (x1 - x0).abs().max((y1 - y0).abs()) as usize;
            prop_assert_eq!(points.len(), major + 1);
            prop_assert_eq!(rec.unique().len(), points.len());
            for pair in points.windows(2) {
                let (ax, ay) = pair[0];
                let (bx, by) = pair[1];
                prop_assert!((bx - ax).abs() <= 1 && (by - ay).abs() <= 1);
            }
        }
    }
}
