// Prime selection for the number theoretic transform.

use log::debug;
use primal::{Sieve, is_prime};

use crate::congruence::CongruenceClass;
use crate::error::{Error, Result};

/// Candidates examined before the residue walk gives up.
const SEARCH_BUDGET: u64 = 1 << 20;

/// Smallest power of two that is at least `n` (1 for `n = 0`).
pub fn next_power_of_two(n: u64) -> u64 {
    n.max(1).next_power_of_two()
}

/// Smallest prime `p ≥ min_value` with `p mod base = residue`.
///
/// Walks the residue class in steps of `base`, starting at `base + residue`
/// and skipping ahead past `min_value` in whole steps. Primality is decided
/// by a deterministic test, so the walk itself is the only search.
pub fn prime_with_residue(base: u64, residue: u64, min_value: u64) -> Result<u64> {
    assert!(base >= 2, "residue base must be ≥ 2");
    assert!(residue < base, "residue must be reduced mod base");

    let mut candidate = base + residue;
    if candidate < min_value {
        candidate += (min_value - candidate).div_ceil(base) * base;
    }

    for _ in 0..SEARCH_BUDGET {
        // the Barrett arithmetic downstream needs q < 2^63
        if candidate >= (1u64 << 63) {
            break;
        }
        if is_prime(candidate) {
            return Ok(candidate);
        }
        candidate = match candidate.checked_add(base) {
            Some(next) => next,
            None => break,
        };
    }

    Err(Error::NoPrimeFound {
        base,
        residue,
        min_value: min_value as u128,
    })
}

/// NTT-ready prime for convolving `a` and `b`.
///
/// The prime is of the form `m·2^k + 1` where `2^k` is the transform length
/// `N = 2·next_power_of_two(max(|a|, |b|))`, and is larger than any
/// convolution coefficient the sequences can produce, so the transform is
/// lossless: the lifted result is the exact integer convolution.
pub fn ntt_prime(a: &[i64], b: &[i64]) -> Result<u64> {
    let length = 2 * next_power_of_two(a.len().max(b.len()) as u64);
    let max_a = a.iter().map(|v| v.unsigned_abs()).max().unwrap_or(0);
    let max_b = b.iter().map(|v| v.unsigned_abs()).max().unwrap_or(0);

    let bound = (max_a as u128)
        .saturating_mul(max_b as u128)
        .saturating_mul(length as u128)
        .saturating_add(1);
    if bound >= (1u128 << 63) {
        return Err(Error::NoPrimeFound {
            base: length,
            residue: 1,
            min_value: bound,
        });
    }

    let prime = prime_with_residue(length, 1, bound as u64)?;
    debug!("ntt prime {prime} ≡ 1 (mod {length}), magnitude bound {bound}");
    Ok(prime)
}

/// Smallest primitive root modulo the prime `q`.
pub fn primitive_root(q: u64) -> u64 {
    assert!(is_prime(q), "primitive root search needs a prime modulus");

    let phi = q - 1;
    let logq = 64 - q.leading_zeros();

    let sieve = Sieve::new(1usize << (1 + logq / 2));
    let class = CongruenceClass::new(q);

    let factors = sieve
        .factor(phi as usize)
        .expect("sieve limit exceeds sqrt(q), so q - 1 factors completely");

    let mut root = 1;
    loop {
        root += 1;

        let generates = factors
            .iter()
            .all(|(prime, _)| class.modexp(root, phi / (*prime as u64)) != 1);
        if generates {
            return root;
        }
    }
}

/// Primitive `n`-th root of unity modulo `q`, as `g^((q−1)/n)` for the
/// smallest primitive root `g`.
pub fn root_of_unity(q: u64, n: u64) -> u64 {
    assert_eq!((q - 1) % n, 0, "modulus {q} must satisfy q ≡ 1 (mod {n})");

    let class = CongruenceClass::new(q);
    class.modexp(primitive_root(q), (q - 1) / n)
}
