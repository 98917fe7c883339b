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

use log::{debug, warn};

use crate::bigint::BigUint;
use crate::error::{RsaError, RsaResult};
use crate::montgomery::MontgomeryCtx;

/// Below this modulus width Montgomery setup cost dominates and the
/// plain engine wins.
const MONTGOMERY_MIN_BITS: usize = 512;

/// `base ^ exp mod modulus`, choosing between Montgomery REDC and plain
/// square-and-multiply per call.
///
/// Montgomery runs when a matching active context is supplied, the
/// modulus is odd, and it is wide enough to amortize the conversions;
/// anything else routes to the plain engine. A Montgomery-side overflow
/// or invariant failure retries on the plain engine with the original
/// operands before the failure is surfaced.
pub fn mod_exp_hybrid(
    base: &BigUint,
    exp: &BigUint,
    modulus: &BigUint,
    mont: Option<&MontgomeryCtx>,
) -> RsaResult<BigUint> {
    if modulus.is_zero() {
        return Err(RsaError::DivisionByZero);
    }

    let ctx = mont.filter(|ctx| {
        ctx.is_active()
            && modulus.is_odd()
            && ctx.modulus() == modulus
            && modulus.bits() >= MONTGOMERY_MIN_BITS
    });

    let mut result = match ctx {
        Some(ctx) => {
            debug!("modexp: montgomery redc, {} bit modulus", modulus.bits());
            match ctx.exp(base, exp) {
                Ok(r) => r,
                Err(e @ (RsaError::Overflow | RsaError::InternalInvariantBroken(_))) => {
                    warn!("modexp: montgomery failed ({e}), retrying with plain engine");
                    match base.mod_exp(exp, modulus) {
                        Ok(r) => r,
                        Err(_) => return Err(e),
                    }
                }
                Err(e) => return Err(e),
            }
        }
        None => {
            debug!("modexp: plain engine, {} bit modulus", modulus.bits());
            base.mod_exp(exp, modulus)?
        }
    };

    if result >= *modulus {
        result = result.rem(modulus)?;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_modulus_skips_montgomery() {
        // Both paths must agree even though the selector picks the plain
        // engine below the width threshold.
        let n = BigUint::from_u32(143);
        let ctx = MontgomeryCtx::new(&n).unwrap();
        let base = BigUint::from_u32(42);
        let exp = BigUint::from_u32(7);

        let hybrid = mod_exp_hybrid(&base, &exp, &n, Some(&ctx)).unwrap();
        let direct = base.mod_exp(&exp, &n).unwrap();
        assert_eq!(hybrid, direct);
    }

    #[test]
    fn even_modulus_uses_plain_engine() {
        let n = BigUint::from_u32(100);
        let result = mod_exp_hybrid(
            &BigUint::from_u32(7),
            &BigUint::from_u32(13),
            &n,
            None,
        )
        .unwrap();
        // 7^13 mod 100 = 7
        assert_eq!(result.to_u32(), Some(7));
    }

    #[test]
    fn zero_modulus_rejected() {
        let err = mod_exp_hybrid(
            &BigUint::from_u32(2),
            &BigUint::from_u32(3),
            &BigUint::zero(),
            None,
        )
        .unwrap_err();
        assert_eq!(err, RsaError::DivisionByZero);
    }

    #[test]
    fn mismatched_context_is_ignored() {
        let n = BigUint::from_u32(143);
        let other = MontgomeryCtx::new(&BigUint::from_u32(35)).unwrap();
        let result = mod_exp_hybrid(
            &BigUint::from_u32(2),
            &BigUint::from_u32(5),
            &n,
            Some(&other),
        )
        .unwrap();
        assert_eq!(result.to_u32(), Some(32));
    }
}
