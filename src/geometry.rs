// Exact planar geometry over rational coordinates.
//
// Vertex coordinates are arbitrary rationals; lattice membership decisions
// (is this y an integer, does this box contain an integer column) must be
// exact, so everything here works on `Ratio<i128>` and never on floats.

use num_rational::Ratio;
use num_traits::Signed;

pub type Rat = Ratio<i128>;

/// Shorthand for a rational from a numerator/denominator pair.
pub fn rat(numer: i128, denom: i128) -> Rat {
    Ratio::new(numer, denom)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: Rat,
    pub y: Rat,
}

impl Point {
    pub fn new(x: Rat, y: Rat) -> Self {
        Self { x, y }
    }

    /// Point with integer coordinates.
    pub fn lattice(x: i64, y: i64) -> Self {
        Self {
            x: Ratio::from_integer(x as i128),
            y: Ratio::from_integer(y as i128),
        }
    }
}

/// Exact axis-aligned bounding box of a vertex set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x_min: Rat,
    pub y_min: Rat,
    pub x_max: Rat,
    pub y_max: Rat,
}

impl BoundingBox {
    pub fn of(points: &[Point]) -> Self {
        assert!(!points.is_empty(), "bounding box needs at least one point");

        let mut bb = BoundingBox {
            x_min: points[0].x,
            y_min: points[0].y,
            x_max: points[0].x,
            y_max: points[0].y,
        };
        for p in &points[1..] {
            if p.x < bb.x_min {
                bb.x_min = p.x;
            }
            if p.x > bb.x_max {
                bb.x_max = p.x;
            }
            if p.y < bb.y_min {
                bb.y_min = p.y;
            }
            if p.y > bb.y_max {
                bb.y_max = p.y;
            }
        }
        bb
    }

    /// Integer-rounded box: ceil on the minima, floor on the maxima.
    pub fn lattice(&self) -> LatticeBox {
        LatticeBox {
            x_min: self.x_min.ceil().to_integer() as i64,
            y_min: self.y_min.ceil().to_integer() as i64,
            x_max: self.x_max.floor().to_integer() as i64,
            y_max: self.y_max.floor().to_integer() as i64,
        }
    }
}

/// Integer bounding box; empty when a rounded minimum exceeds its maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatticeBox {
    pub x_min: i64,
    pub y_min: i64,
    pub x_max: i64,
    pub y_max: i64,
}

impl LatticeBox {
    pub fn is_empty(&self) -> bool {
        self.x_min > self.x_max || self.y_min > self.y_max
    }

    /// Smallest lattice sum `i + j` the box can produce.
    pub fn offset(&self) -> i64 {
        self.x_min + self.y_min
    }

    /// Number of distinct lattice sums, 0 for an empty box.
    pub fn window_len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            ((self.x_max + self.y_max) - self.offset() + 1) as usize
        }
    }
}

/// Convolution window of a vertex set: `(size, k_min)`.
pub fn convolution_window(points: &[Point]) -> (usize, i64) {
    let lattice = BoundingBox::of(points).lattice();
    (lattice.window_len(), lattice.offset())
}

/// Whichever of `option_a`, `option_b` has the smaller squared distance to
/// `reference`; `option_a` on ties.
pub fn closer_point(reference: Point, option_a: Point, option_b: Point) -> Point {
    let da = (reference.x - option_a.x) * (reference.x - option_a.x)
        + (reference.y - option_a.y) * (reference.y - option_a.y);
    let db = (reference.x - option_b.x) * (reference.x - option_b.x)
        + (reference.y - option_b.y) * (reference.y - option_b.y);
    if da <= db { option_a } else { option_b }
}

/// Of the two rectangle corners not on the `diag_start`–`diag_end` diagonal,
/// the one on the opposite side of the diagonal from `reference`.
///
/// The rectangle must be nondegenerate (the diagonal spans both axes).
pub fn opposing_rect_vertex(reference: Point, diag_start: Point, diag_end: Point) -> Point {
    let corner_a = Point::new(diag_end.x, diag_start.y);
    let corner_b = Point::new(diag_start.x, diag_end.y);

    let width = (corner_a.x - diag_start.x).abs();
    let height = (corner_a.y - diag_end.y).abs();
    let dx = (corner_a.x - reference.x).abs();
    let dy = (corner_a.y - reference.y).abs();

    // dx/width + dy/height > 1, cross-multiplied to stay division-free
    if dx * height + dy * width > width * height {
        corner_a
    } else {
        corner_b
    }
}
