//! Convolution of integer sequences restricted to a convex planar region.
//!
//! Given sequences `a` and `b` and a convex polygon `P` with rational
//! vertices, computes `c_k = Σ a_i·b_j` over the lattice points `(i, j)` of
//! `P` with `i + j = k`, exactly, together with the offset of `c`'s first
//! element. The polygon is reduced by signed inclusion-exclusion to
//! NTT-sized rectangles, sparse edges and axis-aligned triangles; the dense
//! rectangle work runs in a prime field large enough to be lossless.

pub mod congruence;
pub mod convolve;
pub mod error;
pub mod geometry;
pub mod ntt;
pub mod primes;
pub mod window;

pub use congruence::CongruenceClass;
pub use convolve::{
    convolve_axis_aligned_triangle, convolve_convex_polygon, convolve_convex_polygon_naive,
    convolve_edge, convolve_rectangle, convolve_triangle,
};
pub use error::{Error, Result};
pub use geometry::{
    BoundingBox, LatticeBox, Point, Rat, closer_point, convolution_window, opposing_rect_vertex,
    rat,
};
pub use ntt::{NttPlan, convolve_signed};
pub use primes::{next_power_of_two, ntt_prime, prime_with_residue, primitive_root, root_of_unity};
pub use window::{Sign, Window};
