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

use super::{BigUint, CAPACITY};

impl BigUint {
    /// Parses a decimal string, most significant digit first.
    ///
    /// Empty input reads as zero; any non-digit character is rejected.
    pub fn from_decimal(s: &str) -> RsaResult<Self> {
        let mut out = Self::zero();
        for &b in s.as_bytes() {
            if !b.is_ascii_digit() {
                return Err(RsaError::BadFormat("decimal"));
            }
            out = out.mul_add_word(10, (b - b'0') as u32)?;
        }
        Ok(out)
    }

    /// Decimal rendering; zero prints as `"0"`.
    pub fn to_decimal(&self) -> String {
        if self.is_zero() {
            return String::from("0");
        }

        let mut digits = Vec::new();
        let mut x = self.clone();
        while !x.is_zero() {
            let (q, r) = x.div_rem_u32(10);
            digits.push(b'0' + r as u8);
            x = q;
        }

        digits.reverse();
        // Digits are ASCII by construction.
        String::from_utf8(digits).unwrap_or_default()
    }

    /// Parses a hex string, case-insensitive, with an optional `0x` prefix.
    pub fn from_hex(s: &str) -> RsaResult<Self> {
        let s = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        let mut out = Self::zero();
        for c in s.chars() {
            let digit = c.to_digit(16).ok_or(RsaError::BadFormat("hex"))?;
            out = out.mul_add_word(16, digit)?;
        }
        Ok(out)
    }

    /// Lower-case hex rendering, no prefix, no leading zeros.
    pub fn to_hex(&self) -> String {
        if self.is_zero() {
            return String::from("0");
        }

        let bytes = self.to_bytes_be();
        let mut hex = String::with_capacity(bytes.len() * 2);

        const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

        for (i, &b) in bytes.iter().enumerate() {
            if i == 0 && b < 16 {
                hex.push(HEX_CHARS[b as usize] as char);
            } else {
                hex.push(HEX_CHARS[(b >> 4) as usize] as char);
                hex.push(HEX_CHARS[(b & 0xf) as usize] as char);
            }
        }

        hex
    }

    /// Reads an unsigned big-endian byte string (OS2IP).
    ///
    /// Empty input reads as zero. Fails with `Overflow` when the value
    /// needs more than the fixed capacity.
    pub fn from_bytes_be(bytes: &[u8]) -> RsaResult<Self> {
        let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        let bytes = &bytes[start..];

        if (bytes.len() + 3) / 4 > CAPACITY {
            return Err(RsaError::Overflow);
        }

        let mut out = Self::zero();
        for (i, &byte) in bytes.iter().rev().enumerate() {
            out.limbs[i / 4] |= (byte as u32) << ((i % 4) * 8);
        }
        out.used = (bytes.len() + 3) / 4;
        out.normalize();
        Ok(out)
    }

    /// Minimum-length unsigned big-endian encoding (I2OSP); one byte for zero.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        if self.is_zero() {
            return vec![0];
        }

        let len = (self.bits() + 7) / 8;
        let mut bytes = vec![0u8; len];
        for (i, b) in bytes.iter_mut().enumerate() {
            let pos = len - 1 - i;
            *b = (self.limbs[pos / 4] >> ((pos % 4) * 8)) as u8;
        }
        bytes
    }

    /// Writes the minimum-length big-endian encoding into `buf`, returning
    /// the number of bytes written. Fails with `BufferTooSmall` (reporting
    /// the needed length) when `buf` is shorter than the encoding.
    pub fn to_bytes_be_into(&self, buf: &mut [u8]) -> RsaResult<usize> {
        let bytes = self.to_bytes_be();
        if buf.len() < bytes.len() {
            return Err(RsaError::BufferTooSmall {
                needed: bytes.len(),
            });
        }
        buf[..bytes.len()].copy_from_slice(&bytes);
        Ok(bytes.len())
    }

    /// Fixed-width big-endian encoding, left-padded with zeros.
    pub fn to_bytes_be_padded(&self, size: usize) -> RsaResult<Vec<u8>> {
        let bytes = self.to_bytes_be();
        if bytes.len() > size {
            return Err(RsaError::BufferTooSmall {
                needed: bytes.len(),
            });
        }

        let mut out = vec![0u8; size];
        out[size - bytes.len()..].copy_from_slice(&bytes);
        Ok(out)
    }
}

impl core::fmt::Display for BigUint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl core::fmt::Debug for BigUint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "BigUint(0x{})", self.to_hex())
    }
}

impl core::fmt::LowerHex for BigUint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
