// Cyclic number theoretic transform, the dense convolution workhorse.
//
// Forward is Cooley-Tukey (natural order in, bit-reversed order out),
// inverse is Gentleman-Sande (bit-reversed in, natural out), so the
// forward-pointwise-inverse pipeline needs no explicit reordering pass.

use log::trace;

use crate::congruence::CongruenceClass;
use crate::primes::root_of_unity;

/// Ephemeral transform context for one power-of-two length and one prime.
///
/// Holds the forward and inverse twiddle tables in the order the butterfly
/// loops consume them, plus `n^{-1} mod q` for the inverse normalization.
/// Created per top-level convolution call, never shared.
#[derive(Debug, Clone)]
pub struct NttPlan {
    class: CongruenceClass,
    n: usize,
    tf: Vec<u64>,
    itf: Vec<u64>,
    inv_n: u64,
}

impl NttPlan {
    /// Build a plan for length `n` modulo `q`.
    ///
    /// # Panics
    /// * If `n` is not a power of two ≥ 2
    /// * If `q` does not satisfy `q ≡ 1 (mod n)`
    pub fn new(q: u64, n: usize) -> Self {
        assert!(
            n.is_power_of_two() && n >= 2,
            "transform length must be a power of 2 ≥ 2, got {n}"
        );
        assert_eq!(
            (q - 1) % (n as u64),
            0,
            "modulus {q} must satisfy q ≡ 1 (mod {n})"
        );

        let class = CongruenceClass::new(q);
        let omega = root_of_unity(q, n as u64);
        let inv_omega = class.modinv(omega);
        trace!("ntt plan: n = {n}, q = {q}, omega = {omega}");

        let pow = powers(&class, omega, n);
        let ipow = powers(&class, inv_omega, n);

        // Stage with m blocks uses the primitive 2m-th roots omega^(n/2m),
        // one per block, in bit-reversed block order.
        let mut tf = vec![1u64; n];
        let mut itf = vec![1u64; n];
        let mut m = 1;
        while m < n {
            let stride = n / (2 * m);
            let bits = m.trailing_zeros() as usize;
            for i in 0..m {
                let rev = bit_reverse(i, bits);
                tf[m + i] = pow[stride * rev];
                itf[m + i] = ipow[stride * rev];
            }
            m <<= 1;
        }

        let inv_n = class.modinv(n as u64);

        Self {
            class,
            n,
            tf,
            itf,
            inv_n,
        }
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn modulus(&self) -> u64 {
        self.class.q()
    }

    /// Forward transform in place.
    pub fn forward(&self, values: &mut [u64]) {
        assert_eq!(values.len(), self.n, "input must have len = {}", self.n);

        let mut t = self.n >> 1;
        let mut m = 1;

        while m < self.n {
            for i in 0..m {
                let j1 = 2 * i * t;
                let s = self.tf[m + i];

                for j in j1..j1 + t {
                    let u = values[j];
                    let v = self.class.modmul(values[j + t], s);

                    values[j] = self.class.modadd(u, v);
                    values[j + t] = self.class.modsub(u, v);
                }
            }

            m <<= 1;
            t >>= 1;
        }
    }

    /// Inverse transform in place, including the `1/n` normalization.
    pub fn inverse(&self, values: &mut [u64]) {
        assert_eq!(values.len(), self.n, "input must have len = {}", self.n);

        let mut t = 1;
        let mut h = self.n >> 1;

        while h > 0 {
            let mut j1 = 0;

            for i in 0..h {
                let s = self.itf[h + i];

                for j in j1..j1 + t {
                    let u = values[j];
                    let v = values[j + t];

                    values[j] = self.class.modadd(u, v);
                    values[j + t] = self.class.modmul(self.class.modsub(u, v), s);
                }

                j1 += t << 1;
            }

            h >>= 1;
            t <<= 1;
        }

        for value in values.iter_mut() {
            *value = self.class.modmul(*value, self.inv_n);
        }
    }

    /// Dense convolution of two residue vectors, truncated to the linear
    /// convolution length `a + b − 1`. Requires `a.len() + b.len() ≤ n` so
    /// the cyclic wrap-around stays in the zero padding.
    pub fn convolve(&self, a: &[u64], b: &[u64]) -> Vec<u64> {
        assert!(!a.is_empty() && !b.is_empty(), "inputs must be non-empty");
        assert!(
            a.len() + b.len() <= self.n,
            "inputs of len {} + {} overflow transform length {}",
            a.len(),
            b.len(),
            self.n
        );

        let mut fa = vec![0u64; self.n];
        let mut fb = vec![0u64; self.n];
        fa[..a.len()].copy_from_slice(a);
        fb[..b.len()].copy_from_slice(b);

        self.forward(&mut fa);
        self.forward(&mut fb);

        for (x, &y) in fa.iter_mut().zip(fb.iter()) {
            *x = self.class.modmul(*x, y);
        }

        self.inverse(&mut fa);
        fa.truncate(a.len() + b.len() - 1);
        fa
    }
}

fn powers(class: &CongruenceClass, base: u64, n: usize) -> Vec<u64> {
    let mut pow = vec![1u64; n];
    for i in 1..n {
        pow[i] = class.modmul(pow[i - 1], base);
    }
    pow
}

/// Reverse the low `bit_length` bits of `number`.
pub fn bit_reverse(number: usize, bit_length: usize) -> usize {
    let mut reversed = 0;
    for i in 0..bit_length {
        if (number >> i) & 1 != 0 {
            reversed |= 1 << (bit_length - 1 - i);
        }
    }
    reversed
}

/// Exact convolution of two signed integer sequences via one NTT.
///
/// Inputs are reduced into the field of `q`; the result is lifted to the
/// centered representative, which is exact because `q` (chosen by
/// [`crate::primes::ntt_prime`]) exceeds twice any coefficient magnitude.
pub fn convolve_signed(a: &[i64], b: &[i64], q: u64) -> Vec<i64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let n = (a.len() + b.len()).next_power_of_two();
    let plan = NttPlan::new(q, n);

    let ra: Vec<u64> = a.iter().map(|&v| v.rem_euclid(q as i64) as u64).collect();
    let rb: Vec<u64> = b.iter().map(|&v| v.rem_euclid(q as i64) as u64).collect();

    let half = q >> 1;
    plan.convolve(&ra, &rb)
        .into_iter()
        .map(|c| {
            if c > half {
                c as i64 - q as i64
            } else {
                c as i64
            }
        })
        .collect()
}
