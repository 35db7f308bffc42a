// Convolution of integer sequences restricted to convex plane regions.
//
// An arbitrary convex polygon is reduced, by signed inclusion-exclusion, to
// base shapes: dense axis-aligned rectangles (one NTT each), sparse edges
// (direct lattice enumeration) and axis-aligned right triangles (split
// recursively at the bounding-box midpoint). Every reduction counts each
// interior and boundary lattice point of the original shape exactly once.

use num_traits::Signed;

use crate::error::{Error, Result};
use crate::geometry::{BoundingBox, LatticeBox, Point, Rat, closer_point, opposing_rect_vertex};
use crate::ntt;
use crate::window::{Sign, Window};

/// One signed piece of a decomposition.
#[derive(Debug, Clone)]
enum Piece {
    Edge(Point, Point),
    Rect(Point, Point),
    AxisTriangle([Point; 3]),
    Triangle([Point; 3]),
    Polygon(Vec<Point>),
}

impl Piece {
    fn eval(&self, a: &[i64], b: &[i64], prime: u64) -> Result<(Vec<i64>, i64)> {
        match self {
            Piece::Edge(start, end) => convolve_edge(a, b, *start, *end, prime),
            Piece::Rect(c0, c1) => convolve_rectangle(a, b, *c0, *c1, prime),
            Piece::AxisTriangle(tri) => convolve_axis_aligned_triangle(a, b, *tri, prime),
            Piece::Triangle(tri) => convolve_triangle(a, b, *tri, prime),
            Piece::Polygon(vertices) => convolve_convex_polygon(a, b, vertices, prime),
        }
    }
}

/// Evaluates steps in order and folds each signed result into the window.
fn run_steps(
    a: &[i64],
    b: &[i64],
    prime: u64,
    window: &mut Window,
    steps: Vec<(Piece, Sign)>,
) -> Result<()> {
    for (piece, sign) in steps {
        let (values, offset) = piece.eval(a, b, prime)?;
        window.accumulate(&values, offset, sign)?;
    }
    Ok(())
}

fn ensure_indexable(lattice: &LatticeBox, a: &[i64], b: &[i64]) -> Result<()> {
    if lattice.is_empty() {
        return Ok(());
    }
    if lattice.x_min < 0
        || lattice.y_min < 0
        || lattice.x_max >= a.len() as i64
        || lattice.y_max >= b.len() as i64
    {
        return Err(Error::PreconditionViolation {
            x_min: lattice.x_min,
            x_max: lattice.x_max,
            y_min: lattice.y_min,
            y_max: lattice.y_max,
            a_len: a.len(),
            b_len: b.len(),
        });
    }
    Ok(())
}

/// Convolution restricted to the lattice points of a closed segment.
///
/// Lattice points on a rational line are sparse, so they are enumerated
/// directly; the NTT never pays off on an edge.
pub fn convolve_edge(
    a: &[i64],
    b: &[i64],
    start: Point,
    end: Point,
    _prime: u64,
) -> Result<(Vec<i64>, i64)> {
    let lattice = BoundingBox::of(&[start, end]).lattice();
    let offset = lattice.offset();

    if lattice.is_empty() {
        return Ok((Vec::new(), offset));
    }
    ensure_indexable(&lattice, a, b)?;

    let mut values = vec![0i64; lattice.window_len()];

    if start.x == end.x {
        // vertical: one column of consecutive lattice points
        if !start.x.is_integer() {
            return Ok((Vec::new(), offset));
        }
        let x = start.x.to_integer() as usize;
        for (j, value) in values.iter_mut().enumerate() {
            *value = a[x] * b[lattice.y_min as usize + j];
        }
        return Ok((values, offset));
    }

    let (from, to) = if start.x < end.x {
        (start, end)
    } else {
        (end, start)
    };
    for x in lattice.x_min..=lattice.x_max {
        let y = from.y + (Rat::from_integer(x as i128) - from.x) * (to.y - from.y) / (to.x - from.x);
        if !y.is_integer() {
            continue;
        }
        let yi = y.to_integer() as i64;
        if yi < lattice.y_min || yi > lattice.y_max {
            continue;
        }
        values[(x + yi - offset) as usize] += a[x as usize] * b[yi as usize];
    }
    Ok((values, offset))
}

/// Convolution over an axis-aligned rectangle given by two opposite corners.
/// All boundary lattice points are included.
pub fn convolve_rectangle(
    a: &[i64],
    b: &[i64],
    corner0: Point,
    corner1: Point,
    prime: u64,
) -> Result<(Vec<i64>, i64)> {
    let lattice = BoundingBox::of(&[corner0, corner1]).lattice();
    let offset = lattice.offset();

    if lattice.is_empty() {
        return Ok((Vec::new(), offset));
    }
    ensure_indexable(&lattice, a, b)?;

    let rows = &a[lattice.x_min as usize..=lattice.x_max as usize];
    let cols = &b[lattice.y_min as usize..=lattice.y_max as usize];

    Ok((ntt::convolve_signed(rows, cols, prime), offset))
}

/// Convolution over an axis-aligned right triangle (legs parallel to the
/// axes), boundary included.
///
/// The general case splits at the bounding-box midpoint into a rectangle,
/// two half-scale copies of itself and two shared-edge corrections, so the
/// recursion depth is logarithmic in the box size and the dense work is all
/// rectangles.
pub fn convolve_axis_aligned_triangle(
    a: &[i64],
    b: &[i64],
    tri: [Point; 3],
    prime: u64,
) -> Result<(Vec<i64>, i64)> {
    let bb = BoundingBox::of(&tri);

    if bb.x_min == bb.x_max || bb.y_min == bb.y_max {
        return convolve_edge(
            a,
            b,
            Point::new(bb.x_min, bb.y_min),
            Point::new(bb.x_max, bb.y_max),
            prime,
        );
    }

    let lattice = bb.lattice();
    let offset = lattice.offset();
    let size = lattice.window_len();
    if size == 0 {
        return Ok((Vec::new(), offset));
    }

    // right-angle corner: the coordinate repeated among the three vertices
    let x_cat = tri[0].x + tri[1].x + tri[2].x - bb.x_min - bb.x_max;
    let y_cat = tri[0].y + tri[1].y + tri[2].y - bb.y_min - bb.y_max;
    let x_not = bb.x_min + bb.x_max - x_cat;
    let y_not = bb.y_min + bb.y_max - y_cat;

    if size == 1 {
        // single candidate lattice point; in the triangle iff its normalized
        // leg distances from the right angle sum to at most one
        ensure_indexable(&lattice, a, b)?;
        let x = lattice.x_min;
        let y = lattice.y_min;
        let dx = (Rat::from_integer(x as i128) - x_cat).abs() / (bb.x_max - bb.x_min);
        let dy = (Rat::from_integer(y as i128) - y_cat).abs() / (bb.y_max - bb.y_min);
        if dx + dy <= Rat::from_integer(1) {
            return Ok((vec![a[x as usize] * b[y as usize]], offset));
        }
        return Ok((Vec::new(), offset));
    }

    let x_mid = (bb.x_min + bb.x_max) / Rat::from_integer(2);
    let y_mid = (bb.y_min + bb.y_max) / Rat::from_integer(2);

    let cat = Point::new(x_cat, y_cat);
    let mid = Point::new(x_mid, y_mid);

    let steps = vec![
        (Piece::Rect(cat, mid), Sign::Plus),
        (
            Piece::AxisTriangle([mid, Point::new(x_cat, y_mid), Point::new(x_cat, y_not)]),
            Sign::Plus,
        ),
        (Piece::Edge(Point::new(x_mid, y_cat), mid), Sign::Minus),
        (
            Piece::AxisTriangle([mid, Point::new(x_mid, y_cat), Point::new(x_not, y_cat)]),
            Sign::Plus,
        ),
        (Piece::Edge(Point::new(x_cat, y_mid), mid), Sign::Minus),
    ];

    let mut window = Window::new(size, offset);
    run_steps(a, b, prime, &mut window, steps)?;
    Ok(window.into_parts())
}

/// Convolution over an arbitrary triangle, boundary included.
///
/// Dispatches on how many vertices coincide with corners of the triangle's
/// bounding box; each case peels the triangle into axis-aligned pieces with
/// edge corrections undoing the double-counted shared boundaries.
pub fn convolve_triangle(
    a: &[i64],
    b: &[i64],
    tri: [Point; 3],
    prime: u64,
) -> Result<(Vec<i64>, i64)> {
    let bb = BoundingBox::of(&tri);
    let lattice = bb.lattice();
    let offset = lattice.offset();

    if lattice.is_empty() {
        return Ok((Vec::new(), offset));
    }

    let on_corner = |p: &Point| {
        (p.x == bb.x_min || p.x == bb.x_max) && (p.y == bb.y_min || p.y == bb.y_max)
    };
    let mut corners = Vec::new();
    let mut free = Vec::new();
    for p in &tri {
        if on_corner(p) {
            corners.push(*p);
        } else {
            free.push(*p);
        }
    }

    if corners.len() == 3 {
        return convolve_axis_aligned_triangle(a, b, tri, prime);
    }

    let steps = match corners.len() {
        2 => {
            let (c0, c1) = (corners[0], corners[1]);
            let vf = free[0];
            if c0.x != c1.x && c0.y != c1.y {
                // collision vertices on opposite box corners: rectangle up to
                // the free vertex, two flanking axis triangles, and the far
                // half of the box subtracted back out
                let q = opposing_rect_vertex(vf, c0, c1);
                let mut b0 = Point::new(vf.x, q.y);
                let mut b1 = Point::new(q.x, vf.y);
                if closer_point(c0, b0, b1) == b1 {
                    std::mem::swap(&mut b0, &mut b1);
                }
                vec![
                    (Piece::Rect(vf, q), Sign::Plus),
                    (Piece::AxisTriangle([c0, b0, vf]), Sign::Plus),
                    (Piece::Edge(b0, vf), Sign::Minus),
                    (Piece::AxisTriangle([c1, b1, vf]), Sign::Plus),
                    (Piece::Edge(b1, vf), Sign::Minus),
                    (Piece::AxisTriangle([c0, c1, q]), Sign::Minus),
                    (Piece::Edge(c0, c1), Sign::Plus),
                ]
            } else {
                // collision vertices on the same box edge: drop a
                // perpendicular from the free vertex onto it
                let foot = if c0.x == c1.x {
                    Point::new(c0.x, vf.y)
                } else {
                    Point::new(vf.x, c0.y)
                };
                vec![
                    (Piece::AxisTriangle([c0, foot, vf]), Sign::Plus),
                    (Piece::AxisTriangle([c1, foot, vf]), Sign::Plus),
                    (Piece::Edge(foot, vf), Sign::Minus),
                ]
            }
        }
        1 => {
            // one collision vertex: start from the whole box and carve away
            // the three corner triangles outside the target
            let c0 = corners[0];
            let (u, v) = (free[0], free[1]);
            let q = Point::new(bb.x_min + bb.x_max - c0.x, bb.y_min + bb.y_max - c0.y);
            let k0 = opposing_rect_vertex(v, c0, q);
            let k1 = opposing_rect_vertex(u, c0, q);
            vec![
                (Piece::Rect(c0, q), Sign::Plus),
                (Piece::AxisTriangle([c0, k0, u]), Sign::Minus),
                (Piece::Edge(c0, u), Sign::Plus),
                (Piece::AxisTriangle([c0, k1, v]), Sign::Minus),
                (Piece::Edge(c0, v), Sign::Plus),
                (Piece::AxisTriangle([q, u, v]), Sign::Minus),
                (Piece::Edge(u, v), Sign::Plus),
            ]
        }
        _ => unreachable!("a triangle has a vertex on a corner of its bounding box"),
    };

    let mut window = Window::new(lattice.window_len(), offset);
    run_steps(a, b, prime, &mut window, steps)?;
    Ok(window.into_parts())
}

/// Convolution over a convex polygon given as vertices in boundary order
/// (either orientation), boundary included.
///
/// Two vertices make an edge, three a triangle, four a split quadrilateral;
/// beyond that the driver recurses on the even-index vertices and splices
/// the skipped ears back in, subtracting each shared diagonal once.
pub fn convolve_convex_polygon(
    a: &[i64],
    b: &[i64],
    polygon: &[Point],
    prime: u64,
) -> Result<(Vec<i64>, i64)> {
    assert!(polygon.len() >= 2, "polygon needs at least two vertices");

    match polygon.len() {
        2 => return convolve_edge(a, b, polygon[0], polygon[1], prime),
        3 => return convolve_triangle(a, b, [polygon[0], polygon[1], polygon[2]], prime),
        _ => {}
    }

    let lattice = BoundingBox::of(polygon).lattice();
    let offset = lattice.offset();
    if lattice.is_empty() {
        return Ok((Vec::new(), offset));
    }

    let k = polygon.len();
    let mut steps = Vec::new();

    if k == 4 {
        steps.push((
            Piece::Triangle([polygon[0], polygon[1], polygon[2]]),
            Sign::Plus,
        ));
        steps.push((
            Piece::Triangle([polygon[2], polygon[3], polygon[0]]),
            Sign::Plus,
        ));
        steps.push((Piece::Edge(polygon[0], polygon[2]), Sign::Minus));
    } else {
        let evens: Vec<Point> = polygon.iter().step_by(2).copied().collect();
        steps.push((Piece::Polygon(evens), Sign::Plus));

        let mut i = 0;
        while i + 2 < k {
            steps.push((
                Piece::Triangle([polygon[i], polygon[i + 1], polygon[i + 2]]),
                Sign::Plus,
            ));
            steps.push((Piece::Edge(polygon[i], polygon[i + 2]), Sign::Minus));
            i += 2;
        }
        if k % 2 == 0 {
            // even count: the last ear wraps around to close the ring
            steps.push((
                Piece::Triangle([polygon[k - 2], polygon[k - 1], polygon[0]]),
                Sign::Plus,
            ));
            steps.push((Piece::Edge(polygon[k - 2], polygon[0]), Sign::Minus));
        }
    }

    let mut window = Window::new(lattice.window_len(), offset);
    run_steps(a, b, prime, &mut window, steps)?;
    Ok(window.into_parts())
}

/// Brute-force lattice evaluation over the polygon: the slow exact model the
/// decomposition is checked against. Quadratic in the box size.
pub fn convolve_convex_polygon_naive(
    a: &[i64],
    b: &[i64],
    polygon: &[Point],
) -> Result<(Vec<i64>, i64)> {
    assert!(polygon.len() >= 2, "polygon needs at least two vertices");

    let lattice = BoundingBox::of(polygon).lattice();
    let offset = lattice.offset();
    if lattice.is_empty() {
        return Ok((Vec::new(), offset));
    }
    ensure_indexable(&lattice, a, b)?;

    let mut values = vec![0i64; lattice.window_len()];
    for x in lattice.x_min..=lattice.x_max {
        for y in lattice.y_min..=lattice.y_max {
            if contains_lattice_point(polygon, x, y) {
                values[(x + y - offset) as usize] += a[x as usize] * b[y as usize];
            }
        }
    }
    Ok((values, offset))
}

/// Closed-region membership: every boundary edge sees the point on the same
/// side (or on the edge itself). For a two-vertex "polygon" this degenerates
/// to collinearity, which within the lattice box means segment membership.
fn contains_lattice_point(polygon: &[Point], x: i64, y: i64) -> bool {
    let p = Point::lattice(x, y);
    let cross = |s: &Point, e: &Point| {
        (e.x - s.x) * (p.y - s.y) - (e.y - s.y) * (p.x - s.x)
    };

    if polygon.len() == 2 {
        return cross(&polygon[0], &polygon[1]) == Rat::from_integer(0);
    }

    let zero = Rat::from_integer(0);
    let mut has_pos = false;
    let mut has_neg = false;
    for (i, s) in polygon.iter().enumerate() {
        let e = &polygon[(i + 1) % polygon.len()];
        let side = cross(s, e);
        if side > zero {
            has_pos = true;
        } else if side < zero {
            has_neg = true;
        }
    }
    !(has_pos && has_neg)
}
