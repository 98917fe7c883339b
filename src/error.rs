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

use thiserror::Error;

/// Failure kinds for big-integer, Montgomery, and RSA operations.
///
/// Arithmetic never truncates silently: any operation whose result would
/// not fit the fixed limb capacity reports `Overflow` and yields nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RsaError {
    /// Input string could not be parsed in the named base.
    #[error("malformed {0} input")]
    BadFormat(&'static str),

    /// Output buffer shorter than the encoded value.
    #[error("output buffer too small, {needed} bytes required")]
    BufferTooSmall { needed: usize },

    /// Result exceeds the fixed limb capacity.
    #[error("arithmetic overflow beyond fixed capacity")]
    Overflow,

    /// Subtraction of a larger value from a smaller one.
    #[error("arithmetic underflow")]
    Underflow,

    /// Divisor or modulus is zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Modular inverse requested for a zero operand or zero modulus.
    #[error("modular inverse of zero operand")]
    ZeroOperand,

    /// Operands are not coprime, no modular inverse exists.
    #[error("no modular inverse exists")]
    NoInverse,

    /// Montgomery context requested for an even modulus.
    #[error("montgomery modulus must be odd")]
    EvenModulus,

    /// Montgomery context requested for a zero modulus.
    #[error("montgomery modulus must be non-zero")]
    ZeroModulus,

    /// Input outside the valid range of the operation.
    #[error("domain error: {0}")]
    DomainError(&'static str),

    /// An internal invariant was violated; indicates a bug, not bad input.
    #[error("internal invariant broken: {0}")]
    InternalInvariantBroken(&'static str),
}

/// Common result alias.
pub type RsaResult<T> = core::result::Result<T, RsaError>;
