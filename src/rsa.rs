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
use crate::hybrid::mod_exp_hybrid;
use crate::montgomery::MontgomeryCtx;

/// Textbook RSA key: a modulus, one exponent, and the Montgomery context
/// precomputed at load time when the modulus allows it.
///
/// The public/private distinction is informational; the arithmetic is
/// identical either way. No padding is applied anywhere.
pub struct RsaKey {
    pub n: BigUint,
    pub exp: BigUint,
    pub is_private: bool,
    mont: Option<MontgomeryCtx>,
}

impl RsaKey {
    /// Loads a key from decimal strings.
    pub fn from_decimal(n: &str, exp: &str, is_private: bool) -> RsaResult<Self> {
        Self::load(
            BigUint::from_decimal(n)?,
            BigUint::from_decimal(exp)?,
            is_private,
        )
    }

    /// Loads a key from hex strings.
    pub fn from_hex(n: &str, exp: &str, is_private: bool) -> RsaResult<Self> {
        Self::load(BigUint::from_hex(n)?, BigUint::from_hex(exp)?, is_private)
    }

    /// Loads a key from big-endian byte strings.
    pub fn from_bytes(n: &[u8], exp: &[u8], is_private: bool) -> RsaResult<Self> {
        Self::load(
            BigUint::from_bytes_be(n)?,
            BigUint::from_bytes_be(exp)?,
            is_private,
        )
    }

    fn load(n: BigUint, exp: BigUint, is_private: bool) -> RsaResult<Self> {
        if n.is_zero() {
            return Err(RsaError::DomainError("modulus must be non-zero"));
        }
        if exp.is_zero() {
            return Err(RsaError::DomainError("exponent must be non-zero"));
        }

        // An even modulus or a failed setup degrades to the plain engine
        // rather than rejecting the key.
        let mont = if n.is_odd() {
            match MontgomeryCtx::new(&n) {
                Ok(ctx) if ctx.is_active() => Some(ctx),
                Ok(_) => None,
                Err(e) => {
                    warn!("montgomery setup failed ({e}), using plain arithmetic");
                    None
                }
            }
        } else {
            debug!("even modulus, montgomery disabled");
            None
        };

        debug!(
            "loaded {} bit {} key, montgomery {}",
            n.bits(),
            if is_private { "private" } else { "public" },
            if mont.is_some() { "active" } else { "off" },
        );

        Ok(Self {
            n,
            exp,
            is_private,
            mont,
        })
    }

    #[inline]
    pub fn montgomery(&self) -> Option<&MontgomeryCtx> {
        self.mont.as_ref()
    }

    /// `message ^ exp mod n`. The message must be below the modulus;
    /// zero encrypts to zero.
    pub fn encrypt(&self, message: &BigUint) -> RsaResult<BigUint> {
        if message >= &self.n {
            return Err(RsaError::DomainError("message must be below the modulus"));
        }
        if message.is_zero() {
            return Ok(BigUint::zero());
        }
        mod_exp_hybrid(message, &self.exp, &self.n, self.mont.as_ref())
    }

    /// `ciphertext ^ exp mod n` with a private key.
    pub fn decrypt(&self, ciphertext: &BigUint) -> RsaResult<BigUint> {
        if !self.is_private {
            return Err(RsaError::DomainError("decryption requires a private key"));
        }
        if ciphertext >= &self.n {
            return Err(RsaError::DomainError(
                "ciphertext must be below the modulus",
            ));
        }
        if ciphertext.is_zero() {
            return Ok(BigUint::zero());
        }
        mod_exp_hybrid(ciphertext, &self.exp, &self.n, self.mont.as_ref())
    }

    /// Encrypts a decimal message, returning lower-case hex.
    pub fn encrypt_decimal(&self, message: &str) -> RsaResult<String> {
        let m = BigUint::from_decimal(message)?;
        Ok(self.encrypt(&m)?.to_hex())
    }

    /// Decrypts a hex ciphertext, returning decimal.
    pub fn decrypt_hex(&self, ciphertext: &str) -> RsaResult<String> {
        let c = BigUint::from_hex(ciphertext)?;
        Ok(self.decrypt(&c)?.to_decimal())
    }

    /// Encrypts a big-endian byte message, returning minimum-length
    /// big-endian bytes.
    pub fn encrypt_bytes(&self, message: &[u8]) -> RsaResult<Vec<u8>> {
        let m = BigUint::from_bytes_be(message)?;
        Ok(self.encrypt(&m)?.to_bytes_be())
    }

    /// Decrypts a big-endian byte ciphertext.
    pub fn decrypt_bytes(&self, ciphertext: &[u8]) -> RsaResult<Vec<u8>> {
        let c = BigUint::from_bytes_be(ciphertext)?;
        Ok(self.decrypt(&c)?.to_bytes_be())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keypair_35() -> (RsaKey, RsaKey) {
        (
            RsaKey::from_decimal("35", "5", false).unwrap(),
            RsaKey::from_decimal("35", "5", true).unwrap(),
        )
    }

    #[test]
    fn known_vectors_n35() {
        let (public, private) = keypair_35();
        for (m, c) in [(2u32, 32u32), (3, 33), (4, 9)] {
            let encrypted = public.encrypt(&BigUint::from_u32(m)).unwrap();
            assert_eq!(encrypted.to_u32(), Some(c), "encrypt {m}");

            let decrypted = private.decrypt(&encrypted).unwrap();
            assert_eq!(decrypted.to_u32(), Some(m), "decrypt {c}");
        }
    }

    #[test]
    fn zero_short_circuits() {
        let (public, private) = keypair_35();
        assert!(public.encrypt(&BigUint::zero()).unwrap().is_zero());
        assert!(private.decrypt(&BigUint::zero()).unwrap().is_zero());
    }

    #[test]
    fn unit_exponent_is_identity() {
        let key = RsaKey::from_decimal("35", "1", false).unwrap();
        let m = BigUint::from_u32(34);
        assert_eq!(key.encrypt(&m).unwrap(), m);
    }

    #[test]
    fn message_at_or_above_modulus_rejected() {
        let (public, _) = keypair_35();
        for m in [35u32, 36, 1000] {
            let err = public.encrypt(&BigUint::from_u32(m)).unwrap_err();
            assert_eq!(err, RsaError::DomainError("message must be below the modulus"));
        }
    }

    #[test]
    fn decrypt_needs_private_key() {
        let (public, _) = keypair_35();
        let err = public.decrypt(&BigUint::from_u32(2)).unwrap_err();
        assert!(matches!(err, RsaError::DomainError(_)));
    }

    #[test]
    fn zero_key_components_rejected() {
        assert!(RsaKey::from_decimal("0", "5", false).is_err());
        assert!(RsaKey::from_decimal("35", "0", false).is_err());
    }

    #[test]
    fn string_round_trip_n143() {
        let public = RsaKey::from_decimal("143", "7", false).unwrap();
        let private = RsaKey::from_decimal("143", "103", true).unwrap();

        let ciphertext = public.encrypt_decimal("42").unwrap();
        let plaintext = private.decrypt_hex(&ciphertext).unwrap();
        assert_eq!(plaintext, "42");
    }

    #[test]
    fn bytes_round_trip_n143() {
        let public = RsaKey::from_decimal("143", "7", false).unwrap();
        let private = RsaKey::from_decimal("143", "103", true).unwrap();

        let ciphertext = public.encrypt_bytes(&[42]).unwrap();
        let plaintext = private.decrypt_bytes(&ciphertext).unwrap();
        assert_eq!(plaintext, vec![42]);
    }

    #[test]
    fn even_modulus_key_still_works() {
        // n = 22 = 2 * 11, phi = 10, e = 3, d = 7.
        let public = RsaKey::from_decimal("22", "3", false).unwrap();
        let private = RsaKey::from_decimal("22", "7", true).unwrap();
        assert!(public.montgomery().is_none());

        let c = public.encrypt(&BigUint::from_u32(5)).unwrap();
        let m = private.decrypt(&c).unwrap();
        assert_eq!(m.to_u32(), Some(5));
    }
}
