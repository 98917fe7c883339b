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

use core::cmp::Ordering;

use crate::error::{RsaError, RsaResult};

use super::{BigUint, CAPACITY, LIMB_BITS};

impl BigUint {
    /// Long division: returns `(q, r)` with `self = q * divisor + r` and
    /// `0 <= r < divisor`. Knuth Algorithm D for multi-limb divisors, a
    /// one-pass fast path for single-limb ones.
    pub fn div_rem(&self, divisor: &Self) -> RsaResult<(Self, Self)> {
        if divisor.is_zero() {
            return Err(RsaError::DivisionByZero);
        }

        if self.is_zero() {
            return Ok((Self::zero(), Self::zero()));
        }

        match self.cmp(divisor) {
            Ordering::Less => return Ok((Self::zero(), self.clone())),
            Ordering::Equal => return Ok((Self::one(), Self::zero())),
            Ordering::Greater => {}
        }

        if divisor.used == 1 {
            let (q, r) = self.div_rem_u32(divisor.limbs[0]);
            return Ok((q, Self::from_u32(r)));
        }

        Ok(self.div_rem_knuth(divisor))
    }

    /// `self mod m`.
    pub fn rem(&self, m: &Self) -> RsaResult<Self> {
        Ok(self.div_rem(m)?.1)
    }

    /// Single-limb division in one pass over the dividend.
    pub(crate) fn div_rem_u32(&self, divisor: u32) -> (Self, u32) {
        debug_assert!(divisor != 0, "div_rem_u32 called with zero divisor");

        let mut q = Self::zero();
        let mut rem = 0u64;

        for i in (0..self.used).rev() {
            let cur = (rem << LIMB_BITS) | self.limbs[i] as u64;
            q.limbs[i] = (cur / divisor as u64) as u32;
            rem = cur % divisor as u64;
        }

        q.used = self.used;
        q.normalize();
        (q, rem as u32)
    }

    /// Knuth Algorithm D. Caller guarantees `self > divisor` and
    /// `divisor.used >= 2`, so the working copies below stay in bounds.
    fn div_rem_knuth(&self, divisor: &Self) -> (Self, Self) {
        let n = divisor.used;
        let m = self.used - n;
        let shift = divisor.limbs[n - 1].leading_zeros() as usize;

        // Normalize so the divisor's top limb has its high bit set.
        let mut vn = [0u32; CAPACITY];
        let mut un = [0u32; CAPACITY + 1];

        if shift == 0 {
            vn[..n].copy_from_slice(&divisor.limbs[..n]);
            un[..self.used].copy_from_slice(&self.limbs[..self.used]);
        } else {
            for i in (1..n).rev() {
                vn[i] = (divisor.limbs[i] << shift) | (divisor.limbs[i - 1] >> (LIMB_BITS - shift));
            }
            vn[0] = divisor.limbs[0] << shift;

            un[self.used] = self.limbs[self.used - 1] >> (LIMB_BITS - shift);
            for i in (1..self.used).rev() {
                un[i] = (self.limbs[i] << shift) | (self.limbs[i - 1] >> (LIMB_BITS - shift));
            }
            un[0] = self.limbs[0] << shift;
        }

        let mut q = Self::zero();

        for j in (0..=m).rev() {
            let hi = ((un[j + n] as u64) << LIMB_BITS) | un[j + n - 1] as u64;
            let mut qhat = hi / vn[n - 1] as u64;
            let mut rhat = hi % vn[n - 1] as u64;

            // The second operand is only evaluated once qhat fits a limb,
            // keeping the product inside 64 bits.
            while qhat >= 1 << LIMB_BITS
                || qhat * vn[n - 2] as u64 > ((rhat << LIMB_BITS) | un[j + n - 2] as u64)
            {
                qhat -= 1;
                rhat += vn[n - 1] as u64;
                if rhat >= 1 << LIMB_BITS {
                    break;
                }
            }

            // Multiply and subtract qhat * vn from un at offset j.
            let mut carry = 0u64;
            let mut borrow = 0i64;
            for i in 0..n {
                let p = qhat * vn[i] as u64 + carry;
                carry = p >> LIMB_BITS;
                let t = un[j + i] as i64 - (p as u32) as i64 - borrow;
                un[j + i] = t as u32;
                borrow = i64::from(t < 0);
            }
            let t = un[j + n] as i64 - carry as i64 - borrow;
            un[j + n] = t as u32;

            if t < 0 {
                // qhat was one too large, add the divisor back.
                qhat -= 1;
                let mut c = 0u64;
                for i in 0..n {
                    let s = un[j + i] as u64 + vn[i] as u64 + c;
                    un[j + i] = s as u32;
                    c = s >> LIMB_BITS;
                }
                un[j + n] = un[j + n].wrapping_add(c as u32);
            }

            q.limbs[j] = qhat as u32;
        }

        q.used = m + 1;
        q.normalize();

        // Denormalize the remainder left in un[..n].
        let mut r = Self::zero();
        if shift == 0 {
            r.limbs[..n].copy_from_slice(&un[..n]);
        } else {
            for i in 0..n {
                r.limbs[i] = un[i] >> shift;
                if i + 1 < n {
                    r.limbs[i] |= un[i + 1] << (LIMB_BITS - shift);
                }
            }
        }
        r.used = n;
        r.normalize();

        (q, r)
    }
}
