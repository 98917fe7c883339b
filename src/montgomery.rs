// rsa4096: RSA-4096 Montgomery arithmetic
// Copyright (C) 2026 rsa4096 Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use log::debug;

use crate::bigint::{BigUint, CAPACITY, LIMB_BITS};
use crate::error::{RsaError, RsaResult};

/// Precomputed Montgomery reduction parameters for one odd modulus.
///
/// With `k = used(n)` the radix is `R = 2^(32k)`, which exceeds `n`
/// whenever the top limb of `n` is non-zero. The context is immutable
/// after construction and safe to share across threads.
#[derive(Debug)]
pub struct MontgomeryCtx {
    n: BigUint,
    k: usize,
    n_prime: u32,
    r_squared: BigUint,
    active: bool,
}

impl MontgomeryCtx {
    /// Builds a context for `modulus`. Fails with `ZeroModulus` or
    /// `EvenModulus` for invalid moduli. A modulus too wide to leave
    /// REDC working room inside the fixed capacity yields an inactive
    /// context; arithmetic on it is refused and callers fall back to
    /// plain modular exponentiation.
    pub fn new(modulus: &BigUint) -> RsaResult<Self> {
        if modulus.is_zero() {
            return Err(RsaError::ZeroModulus);
        }
        if modulus.is_even() {
            return Err(RsaError::EvenModulus);
        }

        let k = modulus.num_limbs();
        if 2 * k + 1 > CAPACITY {
            debug!(
                "montgomery: modulus of {k} limbs leaves no reduction working room, \
                 context disabled"
            );
            return Ok(Self {
                n: modulus.clone(),
                k,
                n_prime: 0,
                r_squared: BigUint::zero(),
                active: false,
            });
        }

        let n_prime = word_inverse_neg(modulus.limbs()[0])?;

        // r_squared = (R mod n)^2 mod n, reducing R first to keep the
        // product narrow.
        let r = BigUint::one().shl_bits(LIMB_BITS * k)?;
        let r_mod_n = r.rem(modulus)?;
        let r_squared = r_mod_n.square()?.rem(modulus)?;

        debug!(
            "montgomery: context ready, k={k}, n'={n_prime:#010x}, {} bit modulus",
            modulus.bits()
        );

        Ok(Self {
            n: modulus.clone(),
            k,
            n_prime,
            r_squared,
            active: true,
        })
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn modulus(&self) -> &BigUint {
        &self.n
    }

    /// Montgomery reduction: maps `t` in `[0, n*R)` to `t * R^-1 mod n`.
    ///
    /// Word-by-word REDC: each round cancels the lowest remaining limb by
    /// adding `m * n` with `m = t_i * n' mod 2^32`, then the accumulator
    /// is shifted down by `k` limbs and reduced by at most one final
    /// subtraction.
    pub fn redc(&self, t: &BigUint) -> RsaResult<BigUint> {
        if !self.active {
            return Err(RsaError::InternalInvariantBroken(
                "montgomery context inactive",
            ));
        }
        if t.num_limbs() > 2 * self.k {
            return Err(RsaError::InternalInvariantBroken(
                "redc operand exceeds n * R",
            ));
        }

        let k = self.k;
        let n_limbs = self.n.limbs();
        let mut a = [0u32; CAPACITY];
        a[..t.num_limbs()].copy_from_slice(t.limbs());

        for i in 0..k {
            let m = a[i].wrapping_mul(self.n_prime);

            // The 64-bit carry absorbs both the product high halves and
            // the addition overflow.
            let mut carry = 0u64;
            for (j, &nj) in n_limbs.iter().enumerate() {
                let p = m as u64 * nj as u64;
                let sum = a[i + j] as u64 + (p as u32) as u64 + carry;
                a[i + j] = sum as u32;
                carry = (sum >> LIMB_BITS) + (p >> LIMB_BITS);
            }

            let mut pos = i + k;
            while carry != 0 {
                let sum = a[pos] as u64 + carry;
                a[pos] = sum as u32;
                carry = sum >> LIMB_BITS;
                pos += 1;
            }
        }

        // Divide by R: a limb shift, not a bit shift.
        let mut out = BigUint::zero();
        out.limbs[..CAPACITY - k].copy_from_slice(&a[k..]);
        out.used = CAPACITY - k;
        out.normalize();

        if out >= self.n {
            out = out.sub(&self.n)?;
        }
        if out >= self.n {
            return Err(RsaError::InternalInvariantBroken(
                "redc result not reduced below modulus",
            ));
        }
        Ok(out)
    }

    /// `a * R mod n`. Inputs at or above `n` are reduced first rather
    /// than leaning on the REDC domain assumption.
    pub fn to_form(&self, a: &BigUint) -> RsaResult<BigUint> {
        let reduced;
        let a = if a >= &self.n {
            reduced = a.rem(&self.n)?;
            &reduced
        } else {
            a
        };
        self.redc(&a.mul(&self.r_squared)?)
    }

    /// `a * R^-1 mod n`, the inverse of [`to_form`](Self::to_form).
    pub fn from_form(&self, a: &BigUint) -> RsaResult<BigUint> {
        let reduced;
        let a = if a >= &self.n {
            reduced = a.rem(&self.n)?;
            &reduced
        } else {
            a
        };
        self.redc(a)
    }

    /// Product of two values already in Montgomery form; the result stays
    /// in form.
    pub fn mul(&self, a: &BigUint, b: &BigUint) -> RsaResult<BigUint> {
        self.redc(&a.mul(b)?)
    }

    /// `base ^ exp mod n` by left-to-right binary scan in Montgomery form.
    pub fn exp(&self, base: &BigUint, exp: &BigUint) -> RsaResult<BigUint> {
        if !self.active {
            return Err(RsaError::InternalInvariantBroken(
                "montgomery context inactive",
            ));
        }
        if exp.is_zero() {
            return Ok(BigUint::one());
        }
        if base.is_zero() {
            return Ok(BigUint::zero());
        }

        let base_m = self.to_form(base)?;
        let mut acc = self.to_form(&BigUint::one())?;

        let bits = exp.bits();
        for i in (0..bits).rev() {
            if i != bits - 1 {
                acc = self.mul(&acc, &acc)?;
            }
            if exp.bit(i) {
                acc = self.mul(&acc, &base_m)?;
            }
        }

        self.from_form(&acc)
    }

    /// Human-readable parameter summary.
    pub fn info(&self) -> String {
        if self.active {
            format!(
                "modulus: {} bits, k: {} limbs, R: 2^{}, n': {:#010x}, status: active",
                self.n.bits(),
                self.k,
                LIMB_BITS * self.k,
                self.n_prime
            )
        } else {
            format!(
                "modulus: {} bits, k: {} limbs, status: inactive",
                self.n.bits(),
                self.k
            )
        }
    }
}

/// `(-n0^-1) mod 2^32` for an odd limb, by Hensel lifting.
///
/// Five iterations of `x <- x * (2 - n0 * x)` double the correct low
/// bits each round, which converges from 1 bit to all 32 for any odd
/// starting limb.
fn word_inverse_neg(n0: u32) -> RsaResult<u32> {
    debug_assert!(n0 & 1 == 1, "word inverse requires an odd limb");

    let mut x = n0;
    for _ in 0..5 {
        x = x.wrapping_mul(2u32.wrapping_sub(n0.wrapping_mul(x)));
    }

    if n0.wrapping_mul(x) != 1 {
        return Err(RsaError::InternalInvariantBroken(
            "word inverse failed to converge",
        ));
    }

    let n_prime = x.wrapping_neg();
    if n0.wrapping_mul(n_prime) != u32::MAX {
        return Err(RsaError::InternalInvariantBroken(
            "n' verification failed",
        ));
    }
    Ok(n_prime)
}
