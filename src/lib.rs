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

//! Fixed-capacity big-integer arithmetic and Montgomery REDC for
//! textbook RSA up to 4096 bits.
//!
//! The crate is built from two layers: [`BigUint`], an exact
//! multi-precision unsigned integer over inline base-2^32 limbs, and
//! [`MontgomeryCtx`], a precomputed reduction context that turns modular
//! exponentiation into a chain of multiplications free of trial
//! division. [`mod_exp_hybrid`] picks between the Montgomery and plain
//! engines per call, and [`RsaKey`] wraps a key pair with the
//! decimal/hex/byte codecs.
//!
//! # Security
//!
//! This is *textbook* RSA: no padding, and every branch in the
//! exponentiation ladder is data-dependent. Do not use it where chosen
//! ciphertext attacks or timing side channels are in scope.

mod bigint;
mod error;
mod hybrid;
mod montgomery;
mod rsa;

pub use bigint::{BigUint, CAPACITY, LIMB_BITS};
pub use error::{RsaError, RsaResult};
pub use hybrid::mod_exp_hybrid;
pub use montgomery::MontgomeryCtx;
pub use rsa::RsaKey;
