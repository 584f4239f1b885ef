//! 3x5 bitmap font.
//!
//! Covers ASCII `0x20..=0x5F`: space, punctuation, digits and upper-case
//! letters. Lower-case letters use the upper-case glyph. Anything else is
//! drawn as a solid box the size of a glyph cell so missing characters stay
//! visible.

use embedded_graphics::prelude::Point;
use embedded_graphics::prelude::Size;

use crate::raster::fill_rect;
use crate::raster::Canvas;
use crate::ColorCode;

/// Glyph width in font pixels.
pub const GLYPH_WIDTH: u32 = 3;
/// Glyph height in font pixels.
pub const GLYPH_HEIGHT: u32 = 5;
/// Horizontal cursor advance per character: the glyph plus one blank column.
pub const GLYPH_ADVANCE: u32 = 4;

const FIRST: u8 = b' ';
const LAST: u8 = b'_';

/// One row per entry, top to bottom. Bit 2 is the left column.
type Glyph = [u8; GLYPH_HEIGHT as usize];

#[rustfmt::skip]
const GLYPHS: [Glyph; (LAST - FIRST + 1) as usize] = [
    [0b000, 0b000, 0b000, 0b000, 0b000], // ' '
    [0b010, 0b010, 0b010, 0b000, 0b010], // '!'
    [0b101, 0b101, 0b000, 0b000, 0b000], // '"'
    [0b101, 0b111, 0b101, 0b111, 0b101], // '#'
    [0b011, 0b110, 0b010, 0b011, 0b110], // '$'
    [0b101, 0b001, 0b010, 0b100, 0b101], // '%'
    [0b010, 0b101, 0b010, 0b101, 0b011], // '&'
    [0b010, 0b010, 0b000, 0b000, 0b000], // '\''
    [0b001, 0b010, 0b010, 0b010, 0b001], // '('
    [0b100, 0b010, 0b010, 0b010, 0b100], // ')'
    [0b000, 0b101, 0b010, 0b101, 0b000], // '*'
    [0b000, 0b010, 0b111, 0b010, 0b000], // '+'
    [0b000, 0b000, 0b000, 0b010, 0b100], // ','
    [0b000, 0b000, 0b111, 0b000, 0b000], // '-'
    [0b000, 0b000, 0b000, 0b000, 0b010], // '.'
    [0b001, 0b001, 0b010, 0b100, 0b100], // '/'
    [0b111, 0b101, 0b101, 0b101, 0b111], // '0'
    [0b010, 0b110, 0b010, 0b010, 0b111], // '1'
    [0b111, 0b001, 0b111, 0b100, 0b111], // '2'
    [0b111, 0b001, 0b111, 0b001, 0b111], // '3'
    [0b101, 0b101, 0b111, 0b001, 0b001], // '4'
    [0b111, 0b100, 0b111, 0b001, 0b111], // '5'
    [0b111, 0b100, 0b111, 0b101, 0b111], // '6'
    [0b111, 0b001, 0b001, 0b001, 0b001], // '7'
    [0b111, 0b101, 0b111, 0b101, 0b111], // '8'
    [0b111, 0b101, 0b111, 0b001, 0b111], // '9'
    [0b000, 0b010, 0b000, 0b010, 0b000], // ':'
    [0b000, 0b010, 0b000, 0b010, 0b100], // ';'
    [0b001, 0b010, 0b100, 0b010, 0b001], // '<'
    [0b000, 0b111, 0b000, 0b111, 0b000], // '='
    [0b100, 0b010, 0b001, 0b010, 0b100], // '>'
    [0b111, 0b001, 0b010, 0b000, 0b010], // '?'
    [0b010, 0b101, 0b111, 0b100, 0b011], // '@'
    [0b010, 0b101, 0b111, 0b101, 0b101], // 'A'
    [0b110, 0b101, 0b110, 0b101, 0b110], // 'B'
    [0b011, 0b100, 0b100, 0b100, 0b011], // 'C'
    [0b110, 0b101, 0b101, 0b101, 0b110], // 'D'
    [0b111, 0b100, 0b110, 0b100, 0b111], // 'E'
    [0b111, 0b100, 0b110, 0b100, 0b100], // 'F'
    [0b011, 0b100, 0b101, 0b101, 0b011], // 'G'
    [0b101, 0b101, 0b111, 0b101, 0b101], // 'H'
    [0b111, 0b010, 0b010, 0b010, 0b111], // 'I'
    [0b001, 0b001, 0b001, 0b101, 0b010], // 'J'
    [0b101, 0b101, 0b110, 0b101, 0b101], // 'K'
    [0b100, 0b100, 0b100, 0b100, 0b111], // 'L'
    [0b101, 0b111, 0b101, 0b101, 0b101], // 'M'
    [0b110, 0b101, 0b101, 0b101, 0b101], // 'N'
    [0b010, 0b101, 0b101, 0b101, 0b010], // 'O'
    [0b110, 0b101, 0b110, 0b100, 0b100], // 'P'
    [0b010, 0b101, 0b101, 0b110, 0b011], // 'Q'
    [0b110, 0b101, 0b110, 0b101, 0b101], // 'R'
    [0b011, 0b100, 0b010, 0b001, 0b110], // 'S'
    [0b111, 0b010, 0b010, 0b010, 0b010], // 'T'
    [0b101, 0b101, 0b101, 0b101, 0b111], // 'U'
    [0b101, 0b101, 0b101, 0b101, 0b010], // 'V'
    [0b101, 0b101, 0b101, 0b111, 0b101], // 'W'
    [0b101, 0b101, 0b010, 0b101, 0b101], // 'X'
    [0b101, 0b101, 0b010, 0b010, 0b010], // 'Y'
    [0b111, 0b001, 0b010, 0b100, 0b111], // 'Z'
    [0b110, 0b100, 0b100, 0b100, 0b110], // '['
    [0b100, 0b100, 0b010, 0b001, 0b001], // '\\'
    [0b011, 0b001, 0b001, 0b001, 0b011], // ']'
    [0b010, 0b101, 0b000, 0b000, 0b000], // '^'
    [0b000, 0b000, 0b000, 0b000, 0b111], // '_'
];

/// Look up the bitmap for `ch`, if the font has one.
pub fn glyph(ch: char) -> Option<&'static Glyph> {
    let ch = ch.to_ascii_uppercase();
    if !ch.is_ascii() {
        return None;
    }
    match ch as u8 {
        code @ FIRST..=LAST => Some(&GLYPHS[usize::from(code - FIRST)]),
        _ => None,
    }
}

fn scale(size: u32) -> u32 {
    size.max(1)
}

/// Draw one character with its top-left corner at `origin`.
///
/// Each font pixel becomes a `size` x `size` block. Characters outside the
/// font become a filled glyph-sized box.
pub fn draw_char<C: Canvas + ?Sized>(
    canvas: &mut C,
    origin: Point,
    ch: char,
    color: ColorCode,
    size: u32,
) {
    let size = scale(size);
    let Some(rows) = glyph(ch) else {
        fill_rect(
            canvas,
            origin,
            Size::new(GLYPH_WIDTH.saturating_mul(size), GLYPH_HEIGHT.saturating_mul(size)),
            color,
        );
        return;
    };

    for (cy, bits) in (0u32..).zip(rows.iter()) {
        for cx in 0..GLYPH_WIDTH {
            if bits & (0b100 >> cx) == 0 {
                continue;
            }
            let top_left = Point::new(
                origin.x.saturating_add_unsigned(cx.saturating_mul(size)),
                origin.y.saturating_add_unsigned(cy.saturating_mul(size)),
            );
            fill_rect(canvas, top_left, Size::new(size, size), color);
        }
    }
}

/// Draw `text` left to right starting at `origin` and return the cursor
/// position after the last character.
///
/// There is no wrapping: text that runs off the canvas is dropped by it.
pub fn draw_text<C: Canvas + ?Sized>(
    canvas: &mut C,
    origin: Point,
    text: &str,
    color: ColorCode,
    size: u32,
) -> Point {
    let advance = GLYPH_ADVANCE.saturating_mul(scale(size));
    let mut cursor = origin;
    for ch in text.chars() {
        draw_char(canvas, cursor, ch, color, size);
        cursor.x = cursor.x.saturating_add_unsigned(advance);
    }
    cursor
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::raster::tests::Recorder;
    use crate::CanvasExt;
    use crate::MatrixFrameBuffer;

    fn boxed(x0: i32, y0: i32, w: i32, h: i32) -> BTreeSet<(i32, i32)> {
        (y0..y0 + h).flat_map(|y| (x0..x0 + w).map(move |x| (x, y))).collect()
    }

    #[test]
    fn table_lookup() {
        assert_eq!(glyph(' '), Some(&[0; 5]));
        assert_eq!(glyph('A'), Some(&[0b010, 0b101, 0b111, 0b101, 0b101]));
        assert_eq!(glyph('a'), glyph('A'));
        assert_eq!(glyph('_'), Some(&[0, 0, 0, 0, 0b111]));
        assert_eq!(glyph('~'), None);
        assert_eq!(glyph('{'), None);
        assert_eq!(glyph('\n'), None);
        assert_eq!(glyph('é'), None);
    }

    #[test]
    fn every_glyph_fits_three_columns() {
        assert!(GLYPHS.iter().flatten().all(|row| row & !0b111 == 0));
    }

    #[test]
    fn letter_a() {
        let mut rec = Recorder::default();
        rec.draw_char(Point::new(2, 1), 'A', ColorCode::GREEN, 1);
        let expected: BTreeSet<_> = [
            (3, 1),
            (2, 2),
            (4, 2),
            (2, 3),
            (3, 3),
            (4, 3),
            (2, 4),
            (4, 4),
            (2, 5),
            (4, 5),
        ]
        .into_iter()
        .collect();
        assert_eq!(rec.unique(), expected);
        assert!(rec.writes.iter().all(|&(_, _, c)| c == ColorCode::GREEN));
    }

    #[test]
    fn unknown_character_is_a_solid_box() {
        let mut rec = Recorder::default();
        rec.draw_char(Point::new(5, 2), '~', ColorCode::RED, 1);
        assert_eq!(rec.writes.len(), 15);
        assert_eq!(rec.unique(), boxed(5, 2, 3, 5));
    }

    #[test]
    fn unknown_character_at_the_cursor() {
        let mut rec = Recorder::default();
        let end = rec.draw_text(Point::new(1, 0), "A~", ColorCode::RED, 1);
        assert_eq!(end, Point::new(9, 0));

        let fallback: BTreeSet<_> = rec.unique().into_iter().filter(|&(x, _)| x >= 5).collect();
        assert_eq!(fallback, boxed(5, 0, 3, 5));
    }

    #[test]
    fn scaled_glyphs() {
        let mut rec = Recorder::default();
        rec.draw_char(Point::new(0, 0), '-', ColorCode::RED, 2);
        assert_eq!(rec.unique(), boxed(0, 4, 6, 2));

        let mut rec = Recorder::default();
        rec.draw_char(Point::new(0, 0), '~', ColorCode::RED, 3);
        assert_eq!(rec.unique(), boxed(0, 0, 9, 15));
    }

    #[test]
    fn cursor_advance_scales() {
        let mut rec = Recorder::default();
        assert_eq!(rec.draw_text(Point::new(0, 0), "ABC", ColorCode::RED, 1), Point::new(12, 0));
        assert_eq!(rec.draw_text(Point::new(0, 3), "ABC", ColorCode::RED, 2), Point::new(24, 3));
        // a zero multiplier draws at size 1
        assert_eq!(rec.draw_text(Point::new(0, 0), "A", ColorCode::RED, 0), Point::new(4, 0));
    }

    #[test]
    fn space_only_moves_the_cursor() {
        let mut rec = Recorder::default();
        let end = rec.draw_text(Point::new(0, 0), "   ", ColorCode::RED, 1);
        assert!(rec.writes.is_empty());
        assert_eq!(end, Point::new(12, 0));
    }

    #[test]
    fn text_runs_off_the_panel() {
        let mut fb = MatrixFrameBuffer::new();
        fb.draw_text(Point::new(1, 5), "HELLO WORLD", ColorCode::GREEN, 1);
        // "HELLO WORLD" is 44 columns wide, only the first 31 are visible
        assert!(fb.lit_count() > 0);
        assert_eq!(fb.get_pixel(Point::new(1, 5)), Some(ColorCode::GREEN));
        assert_eq!(fb.get_pixel(Point::new(0, 5)), Some(ColorCode::OFF));
        for y in 0..16 {
            assert_eq!(fb.get_pixel(Point::new(4, y)), Some(ColorCode::OFF));
        }
    }

    #[test]
    fn lower_case_matches_upper_case() {
        let mut upper = Recorder::default();
        let mut lower = Recorder::default();
        upper.draw_text(Point::new(0, 0), "HELLO", ColorCode::AMBER, 1);
        lower.draw_text(Point::new(0, 0), "hello", ColorCode::AMBER, 1);
        assert_eq!(upper.writes, lower.writes);
    }

    #[test]
    fn formatted_score() {
        use core::fmt::Write;

        let mut text: heapless::String<16> = heapless::String::new();
        write!(text, "SCORE {}", 42).unwrap();
        assert!(text.chars().all(|ch| glyph(ch).is_some()));

        let mut fb = MatrixFrameBuffer::new();
        let end = fb.draw_text(Point::new(0, 0), &text, ColorCode::RED, 1);
        assert_eq!(end, Point::new(32, 0));
        // the trailing '2' ends on the last column
        assert!((0..5).any(|y| fb.get_pixel(Point::new(30, y)) == Some(ColorCode::RED)));
    }
}
