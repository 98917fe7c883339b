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

use rand::{Rng, SeedableRng};

use crate::error::RsaError;

use super::{BigUint, CAPACITY};

fn rng() -> rand::rngs::StdRng {
    rand::rngs::StdRng::seed_from_u64(0x5eed_4096)
}

fn random_biguint(rng: &mut impl Rng, max_limbs: usize) -> BigUint {
    let len = rng.gen_range(0..=max_limbs);
    let mut out = BigUint::zero();
    for i in 0..len {
        out.limbs[i] = rng.gen();
    }
    out.used = len;
    out.normalize();
    out
}

fn assert_normalized(x: &BigUint) {
    if x.used > 0 {
        assert_ne!(x.limbs[x.used - 1], 0, "top limb is zero");
    }
    for i in x.used..CAPACITY {
        assert_eq!(x.limbs[i], 0, "limb {i} beyond used is non-zero");
    }
}

#[test]
fn test_zero() {
    let z = BigUint::zero();
    assert!(z.is_zero());
    assert!(!z.is_one());
    assert_eq!(z.bits(), 0);
    assert_eq!(z.num_limbs(), 0);
}

#[test]
fn test_one() {
    let one = BigUint::one();
    assert!(!one.is_zero());
    assert!(one.is_one());
    assert_eq!(one.bits(), 1);
}

#[test]
fn test_from_u64() {
    let n = BigUint::from_u64(0x1234_5678_9ABC_DEF0);
    assert_eq!(n.num_limbs(), 2);
    assert_eq!(n.limbs()[0], 0x9ABC_DEF0);
    assert_eq!(n.limbs()[1], 0x1234_5678);
    assert_eq!(n.to_u64(), Some(0x1234_5678_9ABC_DEF0));
}

#[test]
fn test_bits() {
    assert_eq!(BigUint::from_u32(255).bits(), 8);
    assert_eq!(BigUint::from_u32(256).bits(), 9);
    assert_eq!(BigUint::from_u64(1 << 40).bits(), 41);
}

#[test]
fn test_comparison() {
    let a = BigUint::from_u32(100);
    let b = BigUint::from_u32(200);
    let c = BigUint::from_u64(1 << 40);

    assert!(a < b);
    assert!(b > a);
    assert!(b < c);
    assert!(a <= a);
    assert!(a == a.clone());
    assert!(a != b);
}

#[test]
fn test_add_carry_chain() {
    let a = BigUint::from_u32(u32::MAX);
    let b = BigUint::one();
    let c = a.add(&b).unwrap();
    assert_eq!(c.to_u64(), Some(1 << 32));
    assert_normalized(&c);
}

#[test]
fn test_add_overflow() {
    let mut a = BigUint::zero();
    a.limbs = [u32::MAX; CAPACITY];
    a.used = CAPACITY;
    assert_eq!(a.add(&BigUint::one()).unwrap_err(), RsaError::Overflow);
}

#[test]
fn test_sub_equal_is_zero() {
    let a = BigUint::from_u64(0xFFFF_FFFF_FFFF);
    let d = a.sub(&a).unwrap();
    assert!(d.is_zero());
    assert_eq!(d.num_limbs(), 0);
}

#[test]
fn test_sub_borrow_chain() {
    let a = BigUint::from_u64(1 << 32);
    let b = BigUint::one();
    let d = a.sub(&b).unwrap();
    assert_eq!(d.to_u32(), Some(u32::MAX));
    assert_normalized(&d);
}

#[test]
fn test_sub_underflow() {
    let a = BigUint::from_u32(1);
    let b = BigUint::from_u32(2);
    assert_eq!(a.sub(&b).unwrap_err(), RsaError::Underflow);
}

#[test]
fn test_mul_small() {
    let a = BigUint::from_u32(12345);
    let b = BigUint::from_u32(67890);
    assert_eq!(a.mul(&b).unwrap().to_u64(), Some(12345u64 * 67890));
}

#[test]
fn test_mul_by_zero() {
    let a = BigUint::from_u64(0xDEAD_BEEF_CAFE);
    assert!(a.mul(&BigUint::zero()).unwrap().is_zero());
    assert!(BigUint::zero().mul(&a).unwrap().is_zero());
}

#[test]
fn test_mul_max_limbs() {
    let a = BigUint::from_u32(u32::MAX);
    let b = BigUint::from_u32(u32::MAX);
    let c = a.mul(&b).unwrap();
    assert_eq!(c.to_u64(), Some(u32::MAX as u64 * u32::MAX as u64));
}

#[test]
fn test_mul_overflow() {
    // Two operands whose limb counts sum past the capacity must be
    // refused, never truncated.
    let mut a = BigUint::zero();
    for i in 0..CAPACITY / 2 + 1 {
        a.limbs[i] = u32::MAX;
    }
    a.used = CAPACITY / 2 + 1;
    assert_eq!(a.mul(&a).unwrap_err(), RsaError::Overflow);
}

#[test]
fn test_mul_add_word() {
    let a = BigUint::from_u32(1000);
    let r = a.mul_add_word(10, 7).unwrap();
    assert_eq!(r.to_u32(), Some(10007));

    let max = BigUint::from_u32(u32::MAX);
    let r = max.mul_add_word(u32::MAX, u32::MAX).unwrap();
    let expected = u32::MAX as u64 * u32::MAX as u64 + u32::MAX as u64;
    assert_eq!(r.to_u64(), Some(expected));
}

#[test]
fn test_add_word() {
    let a = BigUint::from_u32(u32::MAX);
    let r = a.add_word(1).unwrap();
    assert_eq!(r.to_u64(), Some(1 << 32));
}

#[test]
fn test_shift_left_right_identity() {
    let mut rng = rng();
    for _ in 0..50 {
        let a = random_biguint(&mut rng, 8);
        let k = rng.gen_range(0..200);
        if let Ok(shifted) = a.shl_bits(k) {
            assert_eq!(shifted.shr_bits(k), a, "shift identity failed at k={k}");
            assert_normalized(&shifted);
        }
    }
}

#[test]
fn test_shift_left_overflow() {
    let a = BigUint::one();
    assert!(a.shl_bits(CAPACITY * 32 - 1).is_ok());
    assert_eq!(a.shl_bits(CAPACITY * 32).unwrap_err(), RsaError::Overflow);
}

#[test]
fn test_shift_right_to_zero() {
    let a = BigUint::from_u64(0xFFFF_FFFF_FFFF);
    assert!(a.shr_bits(48).is_zero());
    assert!(a.shr_bits(10_000).is_zero());
}

#[test]
fn test_shift_by_zero_is_copy() {
    let a = BigUint::from_u64(0x1234_5678_9ABC);
    assert_eq!(a.shl_bits(0).unwrap(), a);
    assert_eq!(a.shr_bits(0), a);
}

#[test]
fn test_bit() {
    let a = BigUint::from_u32(0b1010);
    assert!(!a.bit(0));
    assert!(a.bit(1));
    assert!(!a.bit(2));
    assert!(a.bit(3));
    assert!(!a.bit(64));
    assert!(!a.bit(CAPACITY * 32 + 5));
}

#[test]
fn test_div_rem_small() {
    let a = BigUint::from_u32(1000);
    let b = BigUint::from_u32(7);
    let (q, r) = a.div_rem(&b).unwrap();
    assert_eq!(q.to_u32(), Some(142));
    assert_eq!(r.to_u32(), Some(6));
}

#[test]
fn test_div_by_zero() {
    let a = BigUint::from_u32(5);
    assert_eq!(
        a.div_rem(&BigUint::zero()).unwrap_err(),
        RsaError::DivisionByZero
    );
}

#[test]
fn test_div_rem_identity_random() {
    let mut rng = rng();
    for _ in 0..200 {
        let a = random_biguint(&mut rng, 40);
        let mut b = random_biguint(&mut rng, 20);
        if b.is_zero() {
            b = BigUint::from_u32(rng.gen_range(1..u32::MAX));
        }

        let (q, r) = a.div_rem(&b).unwrap();
        assert!(r < b, "remainder not below divisor");
        let back = q.mul(&b).unwrap().add(&r).unwrap();
        assert_eq!(back, a, "a != q*b + r");
        assert_normalized(&q);
        assert_normalized(&r);
    }
}

#[test]
fn test_add_sub_inverse_random() {
    let mut rng = rng();
    for _ in 0..200 {
        let a = random_biguint(&mut rng, 60);
        let b = random_biguint(&mut rng, 60);
        let sum = a.add(&b).unwrap();
        assert_eq!(sum.sub(&b).unwrap(), a);
    }
}

#[test]
fn test_mod_idempotent() {
    let mut rng = rng();
    for _ in 0..100 {
        let a = random_biguint(&mut rng, 30);
        let mut m = random_biguint(&mut rng, 10);
        if m.is_zero() {
            m = BigUint::from_u32(97);
        }
        let once = a.rem(&m).unwrap();
        let twice = once.rem(&m).unwrap();
        assert_eq!(once, twice);
    }
}

#[test]
fn test_decimal_round_trip() {
    for s in ["0", "1", "9", "10", "12345678901234567890123456789012345678901"] {
        let n = BigUint::from_decimal(s).unwrap();
        assert_eq!(n.to_decimal(), s, "decimal round trip for {s}");
    }
}

#[test]
fn test_decimal_canonicalizes() {
    let n = BigUint::from_decimal("000042").unwrap();
    assert_eq!(n.to_decimal(), "42");
}

#[test]
fn test_decimal_rejects_garbage() {
    assert_eq!(
        BigUint::from_decimal("12a4").unwrap_err(),
        RsaError::BadFormat("decimal")
    );
    assert_eq!(
        BigUint::from_decimal("-5").unwrap_err(),
        RsaError::BadFormat("decimal")
    );
}

#[test]
fn test_empty_input_reads_zero() {
    assert!(BigUint::from_decimal("").unwrap().is_zero());
    assert!(BigUint::from_hex("").unwrap().is_zero());
    assert!(BigUint::from_bytes_be(&[]).unwrap().is_zero());
}

#[test]
fn test_hex_round_trip() {
    for s in ["0", "1", "deadbeef", "123456789abcdef0123456789abcdef"] {
        let n = BigUint::from_hex(s).unwrap();
        assert_eq!(n.to_hex(), s, "hex round trip for {s}");
    }
}

#[test]
fn test_hex_case_and_prefix() {
    let a = BigUint::from_hex("DEADBEEF").unwrap();
    let b = BigUint::from_hex("0xdeadbeef").unwrap();
    assert_eq!(a, b);
    assert_eq!(a.to_hex(), "deadbeef");
    assert!(BigUint::from_hex("xyz").is_err());
}

#[test]
fn test_bytes_round_trip() {
    let mut rng = rng();
    for _ in 0..100 {
        let a = random_biguint(&mut rng, 40);
        let bytes = a.to_bytes_be();
        let back = BigUint::from_bytes_be(&bytes).unwrap();
        assert_eq!(back, a);
    }
}

#[test]
fn test_bytes_leading_zeros_stripped() {
    let a = BigUint::from_bytes_be(&[0, 0, 0x12, 0x34]).unwrap();
    assert_eq!(a.to_u32(), Some(0x1234));
    assert_eq!(a.to_bytes_be(), vec![0x12, 0x34]);
}

#[test]
fn test_bytes_zero_is_one_byte() {
    assert_eq!(BigUint::zero().to_bytes_be(), vec![0]);
}

#[test]
fn test_bytes_into_buffer_too_small() {
    let a = BigUint::from_u64(0x1_0000_0000);
    let mut buf = [0u8; 2];
    assert_eq!(
        a.to_bytes_be_into(&mut buf).unwrap_err(),
        RsaError::BufferTooSmall { needed: 5 }
    );

    let mut buf = [0u8; 8];
    assert_eq!(a.to_bytes_be_into(&mut buf).unwrap(), 5);
    assert_eq!(&buf[..5], &[1, 0, 0, 0, 0]);
}

#[test]
fn test_bytes_padded() {
    let a = BigUint::from_u32(0x1234);
    assert_eq!(a.to_bytes_be_padded(4).unwrap(), vec![0, 0, 0x12, 0x34]);
    assert!(a.to_bytes_be_padded(1).is_err());
}

#[test]
fn test_mod_exp_edge_cases() {
    let m = BigUint::from_u32(35);

    // exp = 0 yields one
    let r = BigUint::from_u32(7)
        .mod_exp(&BigUint::zero(), &m)
        .unwrap();
    assert!(r.is_one());

    // base = 0 with positive exponent yields zero
    let r = BigUint::zero().mod_exp(&BigUint::one(), &m).unwrap();
    assert!(r.is_zero());

    // modulus = 1 yields zero
    let r = BigUint::from_u32(5)
        .mod_exp(&BigUint::one(), &BigUint::one())
        .unwrap();
    assert!(r.is_zero());

    // zero modulus is rejected
    assert_eq!(
        BigUint::from_u32(5)
            .mod_exp(&BigUint::one(), &BigUint::zero())
            .unwrap_err(),
        RsaError::DivisionByZero
    );
}

#[test]
fn test_mod_exp_known_values() {
    let cases = [
        (3u32, 10u32, 7u32, 4u32),
        (2, 5, 35, 32),
        (3, 5, 35, 33),
        (4, 5, 35, 9),
        (34, 1, 35, 34),
        (7, 120, 143, 1),
    ];
    for (b, e, m, want) in cases {
        let r = BigUint::from_u32(b)
            .mod_exp(&BigUint::from_u32(e), &BigUint::from_u32(m))
            .unwrap();
        assert_eq!(r.to_u32(), Some(want), "{b}^{e} mod {m}");
    }
}

#[test]
fn test_mod_exp_result_below_modulus() {
    let mut rng = rng();
    for _ in 0..50 {
        let b = random_biguint(&mut rng, 6);
        let e = BigUint::from_u32(rng.gen_range(0..64));
        let m = BigUint::from_u32(rng.gen_range(2..u32::MAX));
        let r = b.mod_exp(&e, &m).unwrap();
        assert!(r < m);
    }
}

#[test]
fn test_mod_exp_window_agrees_with_binary() {
    // An exponent wide enough to engage the sliding window; compare with
    // the same computation split into narrow chunks via Fermat.
    let m = BigUint::from_u32(1_000_003);
    let base = BigUint::from_u32(12345);

    // exp = 2^700 spans 22 limbs; verify against square-chaining.
    let exp = BigUint::one().shl_bits(700).unwrap();
    let windowed = base.mod_exp(&exp, &m).unwrap();

    let mut expect = base.rem(&m).unwrap();
    for _ in 0..700 {
        expect = expect.square().unwrap().rem(&m).unwrap();
    }
    assert_eq!(windowed, expect);
}

#[test]
fn test_mod_inverse_small() {
    let inv = BigUint::from_u32(3)
        .mod_inverse(&BigUint::from_u32(7))
        .unwrap();
    assert_eq!(inv.to_u32(), Some(5));

    let inv = BigUint::from_u32(7)
        .mod_inverse(&BigUint::from_u32(120))
        .unwrap();
    assert_eq!(inv.to_u32(), Some(103));
}

#[test]
fn test_mod_inverse_multi_limb() {
    // Modulus wide enough to bypass the trial-search fast path.
    let m = BigUint::from_u64((1u64 << 61) - 1);
    let a = BigUint::from_u64(0xABCD_EF01_2345);
    let inv = a.mod_inverse(&m).unwrap();

    assert!(inv >= BigUint::one() && inv < m);
    let check = a.mul(&inv).unwrap().rem(&m).unwrap();
    assert!(check.is_one());
}

#[test]
fn test_mod_inverse_contract() {
    // gcd != 1
    assert_eq!(
        BigUint::from_u32(4)
            .mod_inverse(&BigUint::from_u32(8))
            .unwrap_err(),
        RsaError::NoInverse
    );

    // zero operands
    assert_eq!(
        BigUint::zero()
            .mod_inverse(&BigUint::from_u32(7))
            .unwrap_err(),
        RsaError::ZeroOperand
    );
    assert_eq!(
        BigUint::from_u32(3)
            .mod_inverse(&BigUint::zero())
            .unwrap_err(),
        RsaError::ZeroOperand
    );
}

#[test]
fn test_mod_inverse_random() {
    let mut rng = rng();
    let m = BigUint::from_u64(0xFFFF_FFFF_FFFF_FFC5);
    for _ in 0..30 {
        let a = random_biguint(&mut rng, 4);
        if a.is_zero() {
            continue;
        }
        match a.mod_inverse(&m) {
            Ok(inv) => {
                let check = a.mul(&inv).unwrap().rem(&m).unwrap();
                assert!(check.is_one(), "a * a^-1 != 1 for a = {a:?}");
            }
            Err(RsaError::NoInverse) => {}
            Err(e) => panic!("unexpected error {e}"),
        }
    }
}

#[test]
fn test_display_formats() {
    let n = BigUint::from_u32(0xDEAD_BEEF);
    assert_eq!(format!("{n}"), "3735928559");
    assert_eq!(format!("{n:x}"), "deadbeef");
    assert_eq!(format!("{n:?}"), "BigUint(0xdeadbeef)");
}
