//! Seven-segment glyph geometry.
//!
//! Digits are built from chamfered hexagons laid out on a fixed grid; the colon
//! is a pair of diamonds. All coordinates are in view pixels with `y` pointing
//! down.

use crate::{
    clock::source::{Digit, HhMm},
    foundation::core::{BezPath, Point, Vec2},
};

/// Length of one segment along its long axis.
pub const SEGMENT_LENGTH: f64 = 45.0;
/// Thickness of one segment.
pub const SEGMENT_WIDTH: f64 = 13.0;
/// Length of the chamfer cut at each segment end.
pub const CHAMFER: f64 = 8.0;
/// Gap between neighbouring digits.
pub const DIGIT_SPACING: f64 = 5.0;
/// Edge of one colon diamond.
pub const COLON_SIZE: f64 = 10.0;

/// Offset of a segment's long edge from the digit's outer edge.
///
/// Whole pixels only: half of [`SEGMENT_WIDTH`], rounded down.
const INSET: f64 = 6.0;

/// Horizontal distance between the left edges of consecutive digits.
pub const DIGIT_PITCH: f64 = SEGMENT_LENGTH * 2.0 + DIGIT_SPACING;

/// The seven canonical strokes, in activation-table column order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    Top,
    UpperRight,
    LowerRight,
    Bottom,
    LowerLeft,
    UpperLeft,
    Middle,
}

impl Segment {
    pub const ALL: [Self; 7] = [
        Self::Top,
        Self::UpperRight,
        Self::LowerRight,
        Self::Bottom,
        Self::LowerLeft,
        Self::UpperLeft,
        Self::Middle,
    ];

    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Middle | Self::Bottom)
    }

    /// Anchor of this segment's outline relative to the digit's top-left corner.
    fn anchor(self) -> Vec2 {
        let l = SEGMENT_LENGTH;
        match self {
            Self::Top => Vec2::new(INSET, 0.0),
            Self::UpperRight => Vec2::new(l, INSET),
            Self::LowerRight => Vec2::new(l, l + INSET),
            Self::Bottom => Vec2::new(INSET, 2.0 * l),
            Self::LowerLeft => Vec2::new(0.0, l + INSET),
            Self::UpperLeft => Vec2::new(0.0, INSET),
            Self::Middle => Vec2::new(INSET, l),
        }
    }
}

/// Lit segments per digit, columns in [`Segment::ALL`] order.
pub const DIGIT_SEGMENTS: [[bool; 7]; 10] = [
    [true, true, true, true, true, true, false],
    [false, true, true, false, false, false, false],
    [true, true, false, true, true, false, true],
    [true, true, true, true, false, false, true],
    [false, true, true, false, false, true, true],
    [true, false, true, true, false, true, true],
    [true, false, true, true, true, true, true],
    [true, true, true, false, false, false, false],
    [true, true, true, true, true, true, true],
    [true, true, true, true, false, true, true],
];

/// Closed outline filled with the segment color.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn translate(mut self, by: Vec2) -> Self {
        for p in &mut self.points {
            *p += by;
        }
        self
    }

    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut points = self.points.iter();
        if let Some(&first) = points.next() {
            path.move_to(first);
            for &p in points {
                path.line_to(p);
            }
            path.close_path();
        }
        path
    }
}

/// Chamfered hexagon for a horizontal segment of length `l` anchored at `(x, y)`.
pub fn horizontal_segment(x: f64, y: f64, l: f64) -> Polygon {
    let (w, t) = (SEGMENT_WIDTH, CHAMFER);
    Polygon::new(vec![
        Point::new(x + t, y),
        Point::new(x + l - t, y),
        Point::new(x + l, y + w / 2.0),
        Point::new(x + l - t, y + w),
        Point::new(x + t, y + w),
        Point::new(x, y + w / 2.0),
    ])
}

/// Chamfered hexagon for a vertical segment of length `l` anchored at `(x, y)`.
pub fn vertical_segment(x: f64, y: f64, l: f64) -> Polygon {
    let (w, t) = (SEGMENT_WIDTH, CHAMFER);
    Polygon::new(vec![
        Point::new(x, y + t),
        Point::new(x, y + l - t),
        Point::new(x + w / 2.0, y + l),
        Point::new(x + w, y + l - t),
        Point::new(x + w, y + t),
        Point::new(x + w / 2.0, y),
    ])
}

/// Diamond of edge `size` whose bounding box starts at `(x, y)`.
pub fn rhombus(x: f64, y: f64, size: f64) -> Polygon {
    let h = size / 2.0;
    Polygon::new(vec![
        Point::new(x + h, y),
        Point::new(x + size, y + h),
        Point::new(x + h, y + size),
        Point::new(x, y + h),
    ])
}

/// Outlines of every lit segment of `digit`, relative to its top-left corner.
pub fn digit_glyph(digit: Digit) -> Vec<Polygon> {
    let lit = &DIGIT_SEGMENTS[usize::from(digit.get())];
    Segment::ALL
        .iter()
        .zip(lit)
        .filter(|&(_, &on)| on)
        .map(|(&seg, _)| {
            let a = seg.anchor();
            if seg.is_horizontal() {
                horizontal_segment(a.x, a.y, SEGMENT_LENGTH)
            } else {
                vertical_segment(a.x, a.y, SEGMENT_LENGTH)
            }
        })
        .collect()
}

/// Two stacked diamonds when visible, nothing otherwise.
pub fn colon_glyph(visible: bool) -> Vec<Polygon> {
    if !visible {
        return Vec::new();
    }
    vec![
        rhombus(0.0, 0.0, COLON_SIZE),
        rhombus(0.0, COLON_SIZE * 4.0, COLON_SIZE),
    ]
}

/// Offset of the colon glyph from the clock origin.
pub fn colon_offset() -> Vec2 {
    // Half a segment down, rounded to whole pixels.
    let y = (SEGMENT_LENGTH / 2.0).floor();
    Vec2::new(DIGIT_PITCH + SEGMENT_LENGTH + DIGIT_SPACING * 5.0, y)
}

/// Every polygon of the clock face, positioned with its top-left at `origin`.
///
/// Digits run left to right at [`DIGIT_PITCH`]; the colon sits after the
/// second digit.
pub fn clock_frame(time: HhMm, colon_visible: bool, origin: Point) -> Vec<Polygon> {
    let base = origin.to_vec2();
    let mut out = Vec::with_capacity(4 * 7 + 2);
    for (i, digit) in time.digits().into_iter().enumerate() {
        let at = base + Vec2::new(i as f64 * DIGIT_PITCH, 0.0);
        out.extend(digit_glyph(digit).into_iter().map(|p| p.translate(at)));
        if i == 1 {
            let at = base + colon_offset();
            out.extend(colon_glyph(colon_visible).into_iter().map(|p| p.translate(at)));
        }
    }
    out
}

/// Colon visibility, flipped once per second.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockState {
    pub colon_visible: bool,
}

impl Default for ClockState {
    fn default() -> Self {
        Self {
            colon_visible: true,
        }
    }
}

impl ClockState {
    /// Flip the colon and return its new visibility.
    pub fn toggle(&mut self) -> bool {
        self.colon_visible = !self.colon_visible;
        self.colon_visible
    }
}
