use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure modes of the convolution engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A decomposition step produced a sub-slice outside its output window.
    /// Step geometries are constructed to prevent this; seeing it means a
    /// decomposition bug.
    #[error(
        "sub-slice at offset {offset} (len {len}) escapes window at offset {window_offset} (len {window_len})"
    )]
    RangeViolation {
        offset: i64,
        len: usize,
        window_offset: i64,
        window_len: usize,
    },

    /// The region's integer bounding box is not indexable in the sequences.
    #[error(
        "lattice box x ∈ [{x_min}, {x_max}], y ∈ [{y_min}, {y_max}] exceeds sequence bounds {a_len} × {b_len}"
    )]
    PreconditionViolation {
        x_min: i64,
        x_max: i64,
        y_min: i64,
        y_max: i64,
        a_len: usize,
        b_len: usize,
    },

    /// The residue-class prime walk exhausted its candidate budget.
    #[error("no prime ≡ {residue} (mod {base}) at or above {min_value} within the search budget")]
    NoPrimeFound {
        base: u64,
        residue: u64,
        min_value: u128,
    },
}
