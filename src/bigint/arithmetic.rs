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

impl PartialEq for BigUint {
    fn eq(&self, other: &Self) -> bool {
        self.used == other.used && self.limbs[..self.used] == other.limbs[..other.used]
    }
}

impl Eq for BigUint {}

impl PartialOrd for BigUint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigUint {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.used.cmp(&other.used) {
            Ordering::Equal => {
                for i in (0..self.used).rev() {
                    match self.limbs[i].cmp(&other.limbs[i]) {
                        Ordering::Equal => continue,
                        ord => return ord,
                    }
                }
                Ordering::Equal
            }
            ord => ord,
        }
    }
}

impl BigUint {
    /// `self + other`, failing with `Overflow` when the carry would need
    /// a limb beyond the fixed capacity.
    pub fn add(&self, other: &Self) -> RsaResult<Self> {
        let mut out = Self::zero();
        let n = self.used.max(other.used);
        let mut carry = 0u64;

        for i in 0..n {
            let sum = self.limb(i) as u64 + other.limb(i) as u64 + carry;
            out.limbs[i] = sum as u32;
            carry = sum >> LIMB_BITS;
        }

        out.used = n;
        if carry != 0 {
            if n == CAPACITY {
                return Err(RsaError::Overflow);
            }
            out.limbs[n] = carry as u32;
            out.used = n + 1;
        }

        out.normalize();
        Ok(out)
    }

    /// `self - other`, failing with `Underflow` when `self < other`.
    pub fn sub(&self, other: &Self) -> RsaResult<Self> {
        if self < other {
            return Err(RsaError::Underflow);
        }

        let mut out = Self::zero();
        let mut borrow = 0i64;

        for i in 0..self.used {
            let diff = self.limbs[i] as i64 - other.limb(i) as i64 - borrow;
            if diff < 0 {
                out.limbs[i] = (diff + (1i64 << LIMB_BITS)) as u32;
                borrow = 1;
            } else {
                out.limbs[i] = diff as u32;
                borrow = 0;
            }
        }

        out.used = self.used;
        out.normalize();
        Ok(out)
    }

    /// Schoolbook `self * other`, O(used(a) * used(b)).
    pub fn mul(&self, other: &Self) -> RsaResult<Self> {
        if self.is_zero() || other.is_zero() {
            return Ok(Self::zero());
        }
        if self.used + other.used > CAPACITY {
            return Err(RsaError::Overflow);
        }

        let mut out = Self::zero();
        for i in 0..self.used {
            let mut carry = 0u64;

            for j in 0..other.used {
                let t = self.limbs[i] as u64 * other.limbs[j] as u64
                    + out.limbs[i + j] as u64
                    + carry;
                out.limbs[i + j] = t as u32;
                carry = t >> LIMB_BITS;
            }

            // The running sum never exceeds the final product, so the
            // carry chain stays inside used(a) + used(b) limbs.
            let mut k = i + other.used;
            while carry != 0 {
                let t = out.limbs[k] as u64 + carry;
                out.limbs[k] = t as u32;
                carry = t >> LIMB_BITS;
                k += 1;
            }
        }

        out.used = self.used + other.used;
        out.normalize();
        Ok(out)
    }

    pub fn square(&self) -> RsaResult<Self> {
        self.mul(self)
    }

    /// `self * w + c` in a single limb scan.
    pub fn mul_add_word(&self, w: u32, c: u32) -> RsaResult<Self> {
        let mut out = Self::zero();
        let mut carry = c as u64;

        for i in 0..self.used {
            let t = self.limbs[i] as u64 * w as u64 + carry;
            out.limbs[i] = t as u32;
            carry = t >> LIMB_BITS;
        }

        out.used = self.used;
        if carry != 0 {
            if self.used == CAPACITY {
                return Err(RsaError::Overflow);
            }
            out.limbs[self.used] = carry as u32;
            out.used = self.used + 1;
        }

        out.normalize();
        Ok(out)
    }

    /// `self + w` in a single limb scan.
    pub fn add_word(&self, w: u32) -> RsaResult<Self> {
        let mut out = self.clone();
        let mut carry = w as u64;
        let mut i = 0;

        while carry != 0 {
            if i == CAPACITY {
                return Err(RsaError::Overflow);
            }
            let sum = out.limb(i) as u64 + carry;
            out.limbs[i] = sum as u32;
            carry = sum >> LIMB_BITS;
            if i >= out.used {
                out.used = i + 1;
            }
            i += 1;
        }

        out.normalize();
        Ok(out)
    }
}
