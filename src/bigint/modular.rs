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

use crate::error::{RsaError, RsaResult};

use super::BigUint;

/// Exponents up to this many limbs use plain square-and-multiply; wider
/// ones switch to the 4-bit sliding window.
const WINDOW_THRESHOLD_LIMBS: usize = 20;

/// Single-limb moduli up to this bound invert by trial search.
const TRIAL_INVERSE_MAX: u32 = 10_000;

impl BigUint {
    /// `self ^ exp mod modulus` using plain big-integer arithmetic.
    ///
    /// Every intermediate is reduced immediately after the multiplication
    /// that produced it, so values never exceed `modulus` between steps.
    pub fn mod_exp(&self, exp: &Self, modulus: &Self) -> RsaResult<Self> {
        if modulus.is_zero() {
            return Err(RsaError::DivisionByZero);
        }
        if exp.is_zero() {
            return Ok(Self::one());
        }
        if self.is_zero() {
            return Ok(Self::zero());
        }
        if modulus.is_one() {
            return Ok(Self::zero());
        }

        if exp.used > WINDOW_THRESHOLD_LIMBS {
            self.mod_exp_window(exp, modulus)
        } else {
            self.mod_exp_binary(exp, modulus)
        }
    }

    /// Right-to-left binary square-and-multiply.
    fn mod_exp_binary(&self, exp: &Self, modulus: &Self) -> RsaResult<Self> {
        let mut result = Self::one();
        let mut base = self.rem(modulus)?;
        let mut exp = exp.clone();

        while !exp.is_zero() {
            if exp.is_odd() {
                result = result.mul(&base)?.rem(modulus)?;
            }
            exp = exp.shr_bits(1);
            if !exp.is_zero() {
                base = base.square()?.rem(modulus)?;
            }
        }

        Ok(result)
    }

    /// Left-to-right 4-bit sliding window over a 16-entry power table.
    fn mod_exp_window(&self, exp: &Self, modulus: &Self) -> RsaResult<Self> {
        let base = self.rem(modulus)?;

        let mut table: [Self; 16] = core::array::from_fn(|_| Self::zero());
        table[0] = Self::one();
        table[1] = base.clone();
        for i in 2..16 {
            table[i] = table[i - 1].mul(&base)?.rem(modulus)?;
        }

        let exp_bits = exp.bits();
        let mut result = Self::one();
        let mut started = false;

        // Windows align to bit zero, so only the leading one may be narrow.
        let mut width = match exp_bits % 4 {
            0 => 4,
            w => w,
        };
        let mut bit_pos = exp_bits as isize - 1;
        while bit_pos >= 0 {
            let mut window = 0usize;
            for j in 0..width {
                if exp.bit((bit_pos as usize) - j) {
                    window |= 1 << (width - 1 - j);
                }
            }

            if !started {
                if window != 0 {
                    result = table[window].clone();
                    started = true;
                }
            } else {
                for _ in 0..width {
                    result = result.square()?.rem(modulus)?;
                }
                if window != 0 {
                    result = result.mul(&table[window])?.rem(modulus)?;
                }
            }

            bit_pos -= width as isize;
            width = 4;
        }

        Ok(result)
    }

    /// Modular inverse by extended Euclid: the result `x` satisfies
    /// `self * x = 1 (mod modulus)` and lies in `[1, modulus)`.
    pub fn mod_inverse(&self, modulus: &Self) -> RsaResult<Self> {
        if self.is_zero() || modulus.is_zero() {
            return Err(RsaError::ZeroOperand);
        }
        if modulus.is_one() {
            return Err(RsaError::NoInverse);
        }

        let a = self.rem(modulus)?;
        if a.is_zero() {
            return Err(RsaError::NoInverse);
        }

        if modulus.used == 1 && modulus.limbs[0] <= TRIAL_INVERSE_MAX {
            return Self::inverse_by_trial(a.limbs[0], modulus.limbs[0]);
        }

        // Coefficients can go negative, so each carries a sign tag.
        let mut old_r = a;
        let mut r = modulus.clone();
        let mut old_s = (Self::one(), false);
        let mut s = (Self::zero(), false);

        while !r.is_zero() {
            let (q, rem) = old_r.div_rem(&r)?;
            let qs = (q.mul(&s.0)?, s.1);
            let new_s = Self::signed_sub(&old_s, &qs)?;

            old_r = r;
            r = rem;
            old_s = s;
            s = new_s;
        }

        if !old_r.is_one() {
            return Err(RsaError::NoInverse);
        }

        // old_s is the coefficient of the (reduced) input in Bezout form.
        let mag = old_s.0.rem(modulus)?;
        let inverse = if old_s.1 && !mag.is_zero() {
            modulus.sub(&mag)?
        } else {
            mag
        };

        if inverse.is_zero() {
            return Err(RsaError::InternalInvariantBroken(
                "modular inverse reduced to zero",
            ));
        }
        Ok(inverse)
    }

    fn inverse_by_trial(a: u32, m: u32) -> RsaResult<Self> {
        for i in 1..m {
            if (a as u64 * i as u64) % m as u64 == 1 {
                return Ok(Self::from_u32(i));
            }
        }
        Err(RsaError::NoInverse)
    }

    /// `a - b` over sign-tagged magnitudes; `true` tags a negative value.
    fn signed_sub(a: &(Self, bool), b: &(Self, bool)) -> RsaResult<(Self, bool)> {
        if a.1 == b.1 {
            if a.0 >= b.0 {
                Ok((a.0.sub(&b.0)?, a.1))
            } else {
                Ok((b.0.sub(&a.0)?, !a.1))
            }
        } else {
            Ok((a.0.add(&b.0)?, a.1))
        }
    }
}
