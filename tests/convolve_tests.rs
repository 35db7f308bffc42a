use polyconv::{
    Error, Point, convolution_window, convolve_axis_aligned_triangle, convolve_convex_polygon,
    convolve_convex_polygon_naive, convolve_edge, convolve_rectangle, convolve_triangle,
    ntt_prime, rat,
};

fn ones(n: usize) -> Vec<i64> {
    vec![1; n]
}

fn lattice_polygon(vertices: &[(i64, i64)]) -> Vec<Point> {
    vertices.iter().map(|&(x, y)| Point::lattice(x, y)).collect()
}

#[test]
fn test_edge_diagonal() {
    let a = ones(8);
    let p = ntt_prime(&a, &a).unwrap();
    let (values, offset) =
        convolve_edge(&a, &a, Point::lattice(0, 0), Point::lattice(7, 7), p).unwrap();
    assert_eq!(values, [1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1]);
    assert_eq!(offset, 0);
}

#[test]
fn test_edge_endpoints_only() {
    // y = x/3: only (0,0) and (3,1) are lattice points of the segment
    let a = ones(8);
    let p = ntt_prime(&a, &a).unwrap();
    let (values, offset) =
        convolve_edge(&a, &a, Point::lattice(0, 0), Point::lattice(3, 1), p).unwrap();
    assert_eq!(values, [1, 0, 0, 0, 1]);
    assert_eq!(offset, 0);
}

#[test]
fn test_edge_vertical() {
    let a = [2i64, 3, 5, 7, 11, 13, 17, 19];
    let b = ones(8);
    let p = ntt_prime(&a, &b).unwrap();
    let (values, offset) =
        convolve_edge(&a, &b, Point::lattice(2, 1), Point::lattice(2, 4), p).unwrap();
    assert_eq!(values, [5, 5, 5, 5]);
    assert_eq!(offset, 3);
}

#[test]
fn test_edge_vertical_non_integer_x_is_empty() {
    let a = ones(8);
    let p = ntt_prime(&a, &a).unwrap();
    let (values, offset) = convolve_edge(
        &a,
        &a,
        Point::new(rat(3, 2), rat(0, 1)),
        Point::new(rat(3, 2), rat(5, 1)),
        p,
    )
    .unwrap();
    assert!(values.is_empty());
    assert_eq!(offset, 2);
}

#[test]
fn test_edge_orientation_is_irrelevant() {
    let a = ones(8);
    let p = ntt_prime(&a, &a).unwrap();
    let forward = convolve_edge(&a, &a, Point::lattice(1, 5), Point::lattice(6, 0), p).unwrap();
    let backward = convolve_edge(&a, &a, Point::lattice(6, 0), Point::lattice(1, 5), p).unwrap();
    assert_eq!(forward, backward);
}

#[test]
fn test_rectangle_full() {
    let a = ones(8);
    let p = ntt_prime(&a, &a).unwrap();
    let (values, offset) =
        convolve_rectangle(&a, &a, Point::lattice(0, 0), Point::lattice(7, 7), p).unwrap();
    assert_eq!(values, [1, 2, 3, 4, 5, 6, 7, 8, 7, 6, 5, 4, 3, 2, 1]);
    assert_eq!(offset, 0);
}

#[test]
fn test_rectangle_fractional_corners_round_inward() {
    let a = ones(8);
    let p = ntt_prime(&a, &a).unwrap();
    let (values, offset) = convolve_rectangle(
        &a,
        &a,
        Point::new(rat(3, 4), rat(13, 2)),
        Point::new(rat(13, 3), rat(5, 3)),
        p,
    )
    .unwrap();
    assert_eq!(values, [1, 2, 3, 4, 4, 3, 2, 1]);
    assert_eq!(offset, 3);
}

#[test]
fn test_rectangle_fractional_single_point() {
    let a = [1i64, 1, 3, 1, 1, 1, 1, 1];
    let b = [1i64, 1, 1, 1, 1, 7, 1, 1];
    let p = ntt_prime(&a, &b).unwrap();
    let (values, offset) = convolve_rectangle(
        &a,
        &b,
        Point::new(rat(3, 2), rat(17, 4)),
        Point::new(rat(5, 2), rat(16, 3)),
        p,
    )
    .unwrap();
    assert_eq!(values, [21]);
    assert_eq!(offset, 7);
}

#[test]
fn test_rectangle_empty_box() {
    let a = ones(8);
    let p = ntt_prime(&a, &a).unwrap();
    let (values, offset) = convolve_rectangle(
        &a,
        &a,
        Point::new(rat(4, 3), rat(17, 8)),
        Point::new(rat(5, 3), rat(16, 3)),
        p,
    )
    .unwrap();
    assert!(values.is_empty());
    assert_eq!(offset, 2 + 3);
}

#[test]
fn test_axis_triangle_lower_half() {
    // right angle at the origin, legs along the axes
    let a = ones(8);
    let p = ntt_prime(&a, &a).unwrap();
    let tri = [
        Point::lattice(0, 0),
        Point::lattice(4, 0),
        Point::lattice(0, 4),
    ];
    let (values, offset) = convolve_axis_aligned_triangle(&a, &a, tri, p).unwrap();
    // diagonal k carries k + 1 points up to the hypotenuse, nothing beyond it
    assert_eq!(values, [1, 2, 3, 4, 5, 0, 0, 0, 0]);
    assert_eq!(offset, 0);
}

#[test]
fn test_axis_triangle_matches_naive() {
    let a: Vec<i64> = (1..=9).collect();
    let b: Vec<i64> = (1..=9).rev().collect();
    let p = ntt_prime(&a, &b).unwrap();
    let tri = [
        Point::lattice(8, 1),
        Point::lattice(2, 1),
        Point::lattice(8, 7),
    ];
    let fast = convolve_axis_aligned_triangle(&a, &b, tri, p).unwrap();
    let naive = convolve_convex_polygon_naive(&a, &b, &tri).unwrap();
    assert_eq!(fast, naive);
}

#[test]
fn test_axis_triangle_degenerate_is_an_edge() {
    let a = ones(8);
    let p = ntt_prime(&a, &a).unwrap();
    let flat = [
        Point::lattice(1, 3),
        Point::lattice(4, 3),
        Point::lattice(2, 3),
    ];
    let (values, offset) = convolve_axis_aligned_triangle(&a, &a, flat, p).unwrap();
    assert_eq!(values, [1, 1, 1, 1]);
    assert_eq!(offset, 4);
}

#[test]
fn test_axis_triangle_empty_box() {
    let a = ones(8);
    let p = ntt_prime(&a, &a).unwrap();
    let tri = [
        Point::new(rat(1, 4), rat(1, 4)),
        Point::new(rat(3, 4), rat(1, 4)),
        Point::new(rat(1, 2), rat(3, 4)),
    ];
    let (values, offset) = convolve_axis_aligned_triangle(&a, &a, tri, p).unwrap();
    assert!(values.is_empty());
    assert_eq!(offset, 2);
}

#[test]
fn test_axis_triangle_single_point_inside() {
    let a = [0i64, 3, 0, 0, 0, 0, 0, 0];
    let b = [0i64, 5, 0, 0, 0, 0, 0, 0];
    let p = ntt_prime(&a, &b).unwrap();
    let tri = [
        Point::new(rat(4, 5), rat(4, 5)),
        Point::new(rat(6, 5), rat(4, 5)),
        Point::new(rat(4, 5), rat(6, 5)),
    ];
    let (values, offset) = convolve_axis_aligned_triangle(&a, &b, tri, p).unwrap();
    assert_eq!(values, [15]);
    assert_eq!(offset, 2);
}

#[test]
fn test_axis_triangle_single_point_outside() {
    // the box contains (1, 1) but the hypotenuse cuts it off
    let a = ones(8);
    let p = ntt_prime(&a, &a).unwrap();
    let tri = [
        Point::new(rat(4, 5), rat(4, 5)),
        Point::new(rat(11, 10), rat(4, 5)),
        Point::new(rat(4, 5), rat(11, 10)),
    ];
    let (values, offset) = convolve_axis_aligned_triangle(&a, &a, tri, p).unwrap();
    assert!(values.is_empty());
    assert_eq!(offset, 2);
}

#[test]
fn test_triangle_known_values() {
    let a = ones(8);
    let p = ntt_prime(&a, &a).unwrap();
    let tri = [
        Point::lattice(0, 0),
        Point::lattice(4, 2),
        Point::lattice(6, 6),
    ];
    let (values, offset) = convolve_triangle(&a, &a, tri, p).unwrap();
    assert_eq!(values, [1, 0, 1, 1, 1, 1, 2, 1, 1, 1, 1, 0, 1]);
    assert_eq!(offset, 0);
}

#[test]
fn test_triangle_two_collisions_same_box_edge() {
    let a = ones(10);
    let p = ntt_prime(&a, &a).unwrap();
    let tri = [
        Point::lattice(0, 0),
        Point::lattice(0, 6),
        Point::lattice(5, 2),
    ];
    let fast = convolve_triangle(&a, &a, tri, p).unwrap();
    let naive = convolve_convex_polygon_naive(&a, &a, &tri).unwrap();
    assert_eq!(fast, naive);
}

#[test]
fn test_triangle_one_collision() {
    let a = ones(10);
    let p = ntt_prime(&a, &a).unwrap();
    let tri = [
        Point::lattice(0, 0),
        Point::lattice(8, 2),
        Point::lattice(3, 6),
    ];
    let fast = convolve_triangle(&a, &a, tri, p).unwrap();
    let naive = convolve_convex_polygon_naive(&a, &a, &tri).unwrap();
    assert_eq!(fast, naive);
}

#[test]
fn test_triangle_rational_vertices() {
    let a: Vec<i64> = (0..12).map(|i| (i * i) % 7 - 3).collect();
    let b: Vec<i64> = (0..12).map(|i| 5 - i % 4).collect();
    let p = ntt_prime(&a, &b).unwrap();
    let tri = [
        Point::new(rat(1, 2), rat(3, 1)),
        Point::new(rat(19, 2), rat(9, 2)),
        Point::new(rat(4, 1), rat(17, 2)),
    ];
    let fast = convolve_triangle(&a, &b, tri, p).unwrap();
    let naive = convolve_convex_polygon_naive(&a, &b, &tri).unwrap();
    assert_eq!(fast, naive);
}

#[test]
fn test_quadrilateral_known_values() {
    let a = ones(8);
    let p = ntt_prime(&a, &a).unwrap();
    let quad = lattice_polygon(&[(0, 0), (4, 2), (6, 4), (2, 4)]);
    let (values, offset) = convolve_convex_polygon(&a, &a, &quad, p).unwrap();
    assert_eq!(values, [1, 0, 1, 2, 1, 2, 3, 2, 2, 1, 1]);
    assert_eq!(offset, 0);
}

#[test]
fn test_twelve_gon() {
    let a = ones(8);
    let p = ntt_prime(&a, &a).unwrap();
    let gon = lattice_polygon(&[
        (0, 3),
        (1, 1),
        (3, 0),
        (4, 0),
        (6, 1),
        (7, 3),
        (7, 4),
        (6, 6),
        (4, 7),
        (3, 7),
        (1, 6),
        (0, 4),
    ]);
    let (values, offset) = convolve_convex_polygon(&a, &a, &gon, p).unwrap();
    assert_eq!(values, [0, 0, 1, 4, 5, 4, 5, 6, 5, 4, 5, 4, 1, 0, 0]);
    assert_eq!(offset, 0);
}

#[test]
fn test_twelve_gon_vertex_rotation_invariance() {
    let a = ones(8);
    let p = ntt_prime(&a, &a).unwrap();
    let gon = lattice_polygon(&[
        (0, 3),
        (1, 1),
        (3, 0),
        (4, 0),
        (6, 1),
        (7, 3),
        (7, 4),
        (6, 6),
        (4, 7),
        (3, 7),
        (1, 6),
        (0, 4),
    ]);
    let base = convolve_convex_polygon(&a, &a, &gon, p).unwrap();
    for r in 1..gon.len() {
        let mut rotated = gon.clone();
        rotated.rotate_left(r);
        let result = convolve_convex_polygon(&a, &a, &rotated, p).unwrap();
        assert_eq!(result, base, "rotation by {r} changed the result");
    }
}

#[test]
fn test_pentagon_matches_naive() {
    let a: Vec<i64> = (0..10).map(|i| i - 4).collect();
    let b: Vec<i64> = (0..10).map(|i| 2 * (i % 3) - 1).collect();
    let p = ntt_prime(&a, &b).unwrap();
    let pent = lattice_polygon(&[(1, 0), (7, 1), (9, 5), (4, 8), (0, 3)]);
    let fast = convolve_convex_polygon(&a, &b, &pent, p).unwrap();
    let naive = convolve_convex_polygon_naive(&a, &b, &pent).unwrap();
    assert_eq!(fast, naive);
}

#[test]
fn test_hexagon_matches_naive() {
    let a: Vec<i64> = (0..10).map(|i| i - 4).collect();
    let b: Vec<i64> = (0..10).map(|i| 2 * (i % 3) - 1).collect();
    let p = ntt_prime(&a, &b).unwrap();
    let hex = lattice_polygon(&[(2, 0), (6, 0), (9, 4), (7, 8), (2, 7), (0, 3)]);
    let fast = convolve_convex_polygon(&a, &b, &hex, p).unwrap();
    let naive = convolve_convex_polygon_naive(&a, &b, &hex).unwrap();
    assert_eq!(fast, naive);
}

#[test]
fn test_polygon_translation_shifts_offset() {
    let a = ones(8);
    let p = ntt_prime(&a, &a).unwrap();
    let quad = lattice_polygon(&[(0, 0), (4, 2), (6, 4), (2, 4)]);
    let shifted = lattice_polygon(&[(1, 2), (5, 4), (7, 6), (3, 6)]);

    let (values, offset) = convolve_convex_polygon(&a, &a, &quad, p).unwrap();
    let (shifted_values, shifted_offset) = convolve_convex_polygon(&a, &a, &shifted, p).unwrap();

    assert_eq!(shifted_values, values);
    assert_eq!(shifted_offset, offset + 1 + 2);
}

#[test]
fn test_polygon_as_edge() {
    let a = ones(8);
    let p = ntt_prime(&a, &a).unwrap();
    let segment = lattice_polygon(&[(0, 0), (7, 7)]);
    let (values, offset) = convolve_convex_polygon(&a, &a, &segment, p).unwrap();
    assert_eq!(values, [1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1]);
    assert_eq!(offset, 0);
}

#[test]
fn test_convolution_window_of_polygon() {
    let quad = lattice_polygon(&[(0, 0), (4, 2), (6, 4), (2, 4)]);
    assert_eq!(convolution_window(&quad), (11, 0));
}

#[test]
fn test_out_of_bounds_polygon_is_precondition_violation() {
    let a = ones(4);
    let p = ntt_prime(&a, &a).unwrap();
    let quad = lattice_polygon(&[(0, 0), (4, 2), (6, 4), (2, 4)]);
    let err = convolve_convex_polygon(&a, &a, &quad, p).unwrap_err();
    assert!(matches!(err, Error::PreconditionViolation { .. }));
}

#[test]
fn test_negative_indices_are_precondition_violation() {
    let a = ones(8);
    let p = ntt_prime(&a, &a).unwrap();
    let err =
        convolve_rectangle(&a, &a, Point::lattice(-1, 0), Point::lattice(3, 3), p).unwrap_err();
    assert!(matches!(err, Error::PreconditionViolation { .. }));
}
