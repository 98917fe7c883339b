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

use super::{BigUint, CAPACITY, LIMB_BITS};

impl BigUint {
    /// Bit at position `i`; false beyond the capacity.
    #[inline]
    pub fn bit(&self, i: usize) -> bool {
        let limb_idx = i / LIMB_BITS;
        let bit_idx = i % LIMB_BITS;

        if limb_idx >= self.used {
            false
        } else {
            (self.limbs[limb_idx] >> bit_idx) & 1 == 1
        }
    }

    /// Left shift by `n` bits, failing with `Overflow` when the result
    /// would need more than the fixed capacity.
    pub fn shl_bits(&self, n: usize) -> RsaResult<Self> {
        if n == 0 || self.is_zero() {
            return Ok(self.clone());
        }

        let total_bits = self.bits() + n;
        if total_bits > CAPACITY * LIMB_BITS {
            return Err(RsaError::Overflow);
        }

        let limb_shift = n / LIMB_BITS;
        let bit_shift = n % LIMB_BITS;
        let mut out = Self::zero();

        if bit_shift == 0 {
            for i in 0..self.used {
                out.limbs[i + limb_shift] = self.limbs[i];
            }
        } else {
            let mut carry = 0u32;
            for i in 0..self.used {
                let limb = self.limbs[i];
                out.limbs[i + limb_shift] = (limb << bit_shift) | carry;
                carry = limb >> (LIMB_BITS - bit_shift);
            }
            if carry != 0 {
                out.limbs[self.used + limb_shift] = carry;
            }
        }

        out.used = (total_bits + LIMB_BITS - 1) / LIMB_BITS;
        out.normalize();
        Ok(out)
    }

    /// Right shift by `n` bits; zero when the shift exceeds the bit length.
    pub fn shr_bits(&self, n: usize) -> Self {
        if n == 0 || self.is_zero() {
            return self.clone();
        }

        let limb_shift = n / LIMB_BITS;
        let bit_shift = n % LIMB_BITS;

        if limb_shift >= self.used {
            return Self::zero();
        }

        let new_len = self.used - limb_shift;
        let mut out = Self::zero();

        if bit_shift == 0 {
            for i in 0..new_len {
                out.limbs[i] = self.limbs[i + limb_shift];
            }
        } else {
            for i in 0..new_len {
                out.limbs[i] = self.limbs[i + limb_shift] >> bit_shift;
                if i + limb_shift + 1 < self.used {
                    out.limbs[i] |= self.limbs[i + limb_shift + 1] << (LIMB_BITS - bit_shift);
                }
            }
        }

        out.used = new_len;
        out.normalize();
        out
    }
}
