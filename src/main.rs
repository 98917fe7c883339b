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

use std::io::{self, Write};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use rsa4096::{mod_exp_hybrid, BigUint, MontgomeryCtx, RsaKey};

/// 1024-bit keypair generated offline with e = 65537.
const N_1024_HEX: &str = "890dabac075aadfe78f0da9a5d8690b8ac193600ab021cedc84ad77dca5fa986c9161d2e7ef50088cb8527e1209d20204f4f1f90435d728e911a9d396b5ce7e45c8204b6bfa3df3f6f4bf5414bc01b0db04ee766b4ac25cd074d36553171609b3d05728210cf19ed05ce2d87a32c4334cac9af3933529ae40e2029bfc390daab";
const D_1024_HEX: &str = "13eabcabff559a3b84efdb94db4a96f57f6d1a7ff65a144229fd565b9d71517d98f371c23408fecee264b36af0066588cc7dbf2483e5aca4334a1ed71d571f0bc62a62c1612175957fa46806b19b5126b53041a9480b67b6006995578eb9e4d84fdd09a17b4a072c669d25cd4f57150d9a5a6b5f89144549a54efdfbc31046e1";

/// 4096-bit keypair generated offline with e = 65537, plus one
/// known-answer pair under it.
const N_4096_HEX: &str = "9dcb93a406112ff83d29410d074413432be0e3710e5765ec32a225dfc0862da60f263bc93c7b4fb5cef9f25261514e86cbaf3bc3977c59dbf104f4a8cdfbfadc4896ae7bb293912e1ed5d29b41664d69e51159bd033d9d6dfc8c9bab3b261b3010ab936ee9cba1852043bd14bfdd5b2db149dd9d53e8202cecf7d4ebbd1b2a974f00efe2911da98452055e20499df0f19c585524573a8cf8a68a184ed66b683bd4a16473f908b00daebeaa24467bc5200547d555a6c92313f086a03fff9669fbcdbf57fceeccd430935474a457b1e273bc8b0eb4742f749f8d63182c86245b137559f37fc0c39f4dbdf514b48dac281e1832654a956130433d2369015acd2b451f252ee8b84cf65b0b4722f2abddd007130859e458c61894a92e5df6ffc325b794b3164561a41d63bd0cb156c589588b2551ff7b7741b95c2155eb2bbd40fb9e7fa732e4bbb9c2a2a1fbce5e0ff66060f9fa6d7467b651933c54936a91ae274b6a5858557c0eced7bd038ae8b781919363e69ff5d4ab259ec9abcba71007a4c5e5e6e665e4cab384224f24ef96bab3e2a3b3eea5e6ef75a46f8bdfc9447dd76d34ac1f6046dd8dc106f5f08482875273ee2d5601dccf79f1d509110d920695b9c6925ca3b54ac4e16a4add01f0af7f90d9608ec3203795ebb8b0588438c71ae14177978eaa43ec790a1fb8fe4e859c76ae4fc19f9c1ba1a82d33e50732593029";
const D_4096_HEX: &str = "4019d61538bdbcadec32991170d52fba06d629aee0b3925cfc48b0780fdeb226965ae2c8a20039e6527968fe1c388a5ce9db7abcbf0a2dfad213404c5eb93134516c9cdef5314b35e022de96615fecaccaf85c6b1328f18e1f9d0313f1484e9d1cf88640f54ada87990ecb7de55f47cded0a63b3a8c55064cfb2f1d4fe124e1fff61131207ff73c0a40d382a879d58a6ddeb685305f86c120a9d68b8861445d8a04d1be09cd6f1a5ed49d9163967c83174d3b48f41dccd9a2908978ac80a536d8e2c5fd309333e33a97612983c63afe9723b4f32f14be1e57aeb3983c4ce7a0d128c0305efc9c82a2db3a4c0a018c2874f2f11c4d5a0109a0ff9158c0e55f0705373550638cabd893b9a7f2f264603a7e78ea880b1e8e60dfe9f7ba7b76d7ba0d6697a6b035919a61e728f3068715ac92e7ae29ae784fc01e00b001221d16c4f6cc0bc4968ef3c85238b23f75b29cfc175d84449e8d80897271218a5306593fa41681ac0be6abf2de7b4bf107c21ccd9a8c48cf1d2de842a0ac8c7d19e8d56795c6f59600b6f7739fc0a88dd3323d05e9eaf7cfef41cb14100d5d06ec7aec20b224e56827ce3a80eac02553a4a6a53ef446d61ab89b04f8c1b3d15dbd2ddd622cd5c3ac5479cc34b4d1d61818729ee5ae9c0001d549f1a82b0bd7103a965b062bd3f8722779675d124d44077698a6c0168152c2364e5454fefa88b5bcfa3cfad";
const M_4096_HEX: &str = "4f1aed2d8a4b8c73ae416ea9b87c3b2e709ff1b9a1cb3287fc";
const C_4096_HEX: &str = "2f0785667e258a11f5bdda94fa05e6d55293006e9691f9b4eca3608bbcd025a4624dd9e8eecb75904d7056b54c109f63fec8aa15924cf6f4a712368e8113848dd60bc5c012d19d0e5066a8e730af6ef3a01947cf64bfb2432510f4bf16e5a7515436882587e28c0f7fc98c7cb86262077af98fe06756f78de429963fb6078eb2c4c6067808062eed14b00392674d71fe7e8ca7547fe23b05540594ec42962212968b306573c658ea4f456e7bcd364708c9fbcd55463b64332106deabc77d80acb4e3de77c96a29bb502b32a968c8fac49d0267d2bb0a3dab6d04205ee17dedb9b6dc8d071b7f3b59db6156ed2dd00970712dd31c5fd02a892d2769b9e3b64ad5bd6246f9e13bec46f0178a812704c2ecad9fd097421a33a9e14544840141175e6e38fced15517f1a9f703a9a02896a1ded0693d0c3e60613bfe616948b147a148ba320c9530127b9ea7556253dfd78fede11dac9fef3d43f8ad589d2ad5dc6d7171b84cd468903bcdf92b95bfa3cf43460400b819cf9b890f1ead94741a3f5f81aa6d4f24503393dd412f07155646e5a7c428b8437a133391203c62a1b8e71f31564c003735c66efafb4147c7469273552871be34721833fea40980200e83e4269fc854cfa229c474272b2e7ed143ee35f1cd84845a504b740ace167c8fca5426671be6002cc15783649fb188c3dbcebf86a9ecb31379da3bb263ad93fd8675c";

const E_65537: &str = "10001";

#[derive(Parser, Debug)]
#[command(
    name = "rsa4096",
    about = "RSA-4096 modular exponentiation verification and benchmark harness"
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Known-answer encryption vectors under n = 35
    Verify,
    /// Round-trip with the n = 143 keypair
    Test,
    /// Time repeated encryptions on small and 1024-bit keys
    Benchmark,
    /// Byte-oriented encrypt/decrypt round-trips
    Binary,
    /// Interactive key and message entry from stdin
    Manual,
    /// Round-trip with a real 4096-bit keypair
    Real4096,
    /// Show which engine the selector picks per modulus shape
    Hybrid,
    /// Montgomery form conversion round-trips
    Roundtrip,
    /// Zero, one, and modulus-boundary edge cases
    Boundary,
    /// Montgomery context construction and parameters
    Montgomery,
    /// Cross-check the plain and Montgomery engines
    Algorithms,
}

/// Pass/fail bookkeeping shared by all subcommands.
struct Harness {
    passed: u32,
    failed: u32,
}

impl Harness {
    fn new(title: &str) -> Self {
        println!("===============================================");
        println!("{title}");
        println!("===============================================");
        Self {
            passed: 0,
            failed: 0,
        }
    }

    fn check(&mut self, name: &str, ok: bool) {
        if ok {
            println!("  PASS  {name}");
            self.passed += 1;
        } else {
            println!("  FAIL  {name}");
            self.failed += 1;
        }
    }

    fn finish(self) -> Result<()> {
        println!("-----------------------------------------------");
        println!("  {}/{} checks passed", self.passed, self.passed + self.failed);
        if self.failed > 0 {
            bail!("{} checks failed", self.failed);
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    match args.command {
        Command::Verify => run_verify(),
        Command::Test => run_test(),
        Command::Benchmark => run_benchmark(),
        Command::Binary => run_binary(),
        Command::Manual => run_manual(),
        Command::Real4096 => run_real4096(),
        Command::Hybrid => run_hybrid(),
        Command::Roundtrip => run_roundtrip(),
        Command::Boundary => run_boundary(),
        Command::Montgomery => run_montgomery(),
        Command::Algorithms => run_algorithms(),
    }
}

fn key_1024(private: bool) -> Result<RsaKey> {
    let exp = if private { D_1024_HEX } else { E_65537 };
    RsaKey::from_hex(N_1024_HEX, exp, private).context("loading 1024-bit key")
}

fn key_4096(private: bool) -> Result<RsaKey> {
    let exp = if private { D_4096_HEX } else { E_65537 };
    RsaKey::from_hex(N_4096_HEX, exp, private).context("loading 4096-bit key")
}

fn run_verify() -> Result<()> {
    let mut h = Harness::new("Known-answer vectors, n = 35, e = d = 5");
    println!("n = 35 = 5 x 7, phi = 24, e = d = 5 (5 * 5 = 25 = 1 mod 24)");

    let public = RsaKey::from_decimal("35", "5", false)?;
    let private = RsaKey::from_decimal("35", "5", true)?;

    for (message, expected) in [("2", 32u32), ("3", 33), ("4", 9)] {
        let encrypted_hex = public.encrypt_decimal(message)?;
        let encrypted = BigUint::from_hex(&encrypted_hex)?;
        println!("  {message} -> 0x{encrypted_hex} ({encrypted})");
        h.check(
            &format!("encrypt {message} = {expected}"),
            encrypted.to_u32() == Some(expected),
        );

        let decrypted = private.decrypt_hex(&encrypted_hex)?;
        h.check(&format!("round-trip {message}"), decrypted == message);
    }

    h.finish()
}

fn run_test() -> Result<()> {
    let mut h = Harness::new("Keypair test, n = 143 = 11 x 13, e = 7, d = 103");

    let public = RsaKey::from_decimal("143", "7", false)?;
    let private = RsaKey::from_decimal("143", "103", true)?;

    let ciphertext = public.encrypt_decimal("42")?;
    println!("  42 -> 0x{ciphertext}");
    let plaintext = private.decrypt_hex(&ciphertext)?;
    println!("  0x{ciphertext} -> {plaintext}");
    h.check("round-trip 42", plaintext == "42");

    // Every residue must survive the round trip.
    let mut all = true;
    for m in 0u32..143 {
        let value = BigUint::from_u32(m);
        let back = private.decrypt(&public.encrypt(&value)?)?;
        if back != value {
            println!("  residue {m} failed");
            all = false;
        }
    }
    h.check("all residues round-trip", all);

    h.finish()
}

fn run_benchmark() -> Result<()> {
    println!("===============================================");
    println!("Benchmarks");
    println!("===============================================");

    let key = RsaKey::from_decimal("35", "5", false)?;
    let operations = 100u32;
    let start = Instant::now();
    for i in 0..operations {
        let message = BigUint::from_u32(i % 20 + 1);
        key.encrypt(&message)?;
    }
    let elapsed = start.elapsed();
    println!(
        "  small key:   {operations} encryptions in {:.3} ms ({:.0} ops/s)",
        elapsed.as_secs_f64() * 1e3,
        operations as f64 / elapsed.as_secs_f64()
    );

    let public = key_1024(false)?;
    let private = key_1024(true)?;
    let message = BigUint::from_u64(0x1234_5678_9abc_def1);

    let operations = 50;
    let start = Instant::now();
    let mut ciphertext = BigUint::zero();
    for _ in 0..operations {
        ciphertext = public.encrypt(&message)?;
    }
    let elapsed = start.elapsed();
    println!(
        "  1024-bit encrypt (e = 65537): {:.3} ms/op",
        elapsed.as_secs_f64() * 1e3 / operations as f64
    );

    let start = Instant::now();
    let decrypted = private.decrypt(&ciphertext)?;
    println!(
        "  1024-bit decrypt (full exponent): {:.3} ms",
        start.elapsed().as_secs_f64() * 1e3
    );

    if decrypted != message {
        bail!("benchmark round-trip produced a wrong result");
    }
    println!("  round-trip verified");
    Ok(())
}

fn run_binary() -> Result<()> {
    let mut h = Harness::new("Binary (byte string) operations");

    let public = RsaKey::from_decimal("143", "7", false)?;
    let private = RsaKey::from_decimal("143", "103", true)?;
    let ciphertext = public.encrypt_bytes(&[42])?;
    let plaintext = private.decrypt_bytes(&ciphertext)?;
    h.check("single byte under n = 143", plaintext == [42]);

    let public = key_1024(false)?;
    let private = key_1024(true)?;
    let message = b"the quick brown fox jumps over the lazy dog";
    let ciphertext = public.encrypt_bytes(message)?;
    println!("  {} byte message -> {} byte ciphertext", message.len(), ciphertext.len());
    let plaintext = private.decrypt_bytes(&ciphertext)?;
    h.check("multi-byte under 1024-bit key", plaintext == message);

    // An oversized message must be refused, not truncated.
    let oversized = [0xFFu8; 129];
    h.check(
        "oversized message rejected",
        public.encrypt_bytes(&oversized).is_err(),
    );

    h.finish()
}

fn run_manual() -> Result<()> {
    println!("===============================================");
    println!("Manual key test (type 'quit' to leave)");
    println!("===============================================");

    let n = prompt("Modulus n (decimal): ")?;
    if n == "quit" {
        return Ok(());
    }
    let e = prompt("Public exponent e (decimal): ")?;
    if e == "quit" {
        return Ok(());
    }
    let d = prompt("Private exponent d (decimal): ")?;
    if d == "quit" {
        return Ok(());
    }

    let public = RsaKey::from_decimal(&n, &e, false).context("loading public key")?;
    let private = RsaKey::from_decimal(&n, &d, true).context("loading private key")?;
    println!("Keys loaded, modulus is {} bits", public.n.bits());
    if let Some(ctx) = public.montgomery() {
        println!("Montgomery: {}", ctx.info());
    } else {
        println!("Montgomery: disabled for this modulus");
    }

    loop {
        let message = prompt("Message (decimal): ")?;
        if message == "quit" {
            break;
        }
        match public.encrypt_decimal(&message) {
            Ok(ciphertext) => {
                println!("  encrypted: 0x{ciphertext}");
                match private.decrypt_hex(&ciphertext) {
                    Ok(plaintext) if plaintext == message => {
                        println!("  round-trip OK");
                    }
                    Ok(plaintext) => {
                        println!("  round-trip MISMATCH: got {plaintext}");
                    }
                    Err(e) => println!("  decryption failed: {e}"),
                }
            }
            Err(e) => println!("  encryption failed: {e}"),
        }
    }
    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(String::from("quit"));
    }
    Ok(line.trim().to_string())
}

fn run_real4096() -> Result<()> {
    let mut h = Harness::new("Real 4096-bit keypair");

    let start = Instant::now();
    let public = key_4096(false)?;
    let private = key_4096(true)?;
    println!(
        "  loaded {} bit modulus in {:.2} ms",
        public.n.bits(),
        start.elapsed().as_secs_f64() * 1e3
    );
    if let Some(ctx) = public.montgomery() {
        println!("  {}", ctx.info());
    }

    let message = BigUint::from_hex(M_4096_HEX)?;
    let expected = BigUint::from_hex(C_4096_HEX)?;

    let start = Instant::now();
    let ciphertext = public.encrypt(&message)?;
    println!(
        "  encrypt (e = 65537): {:.2} ms",
        start.elapsed().as_secs_f64() * 1e3
    );
    h.check("known-answer ciphertext", ciphertext == expected);

    let start = Instant::now();
    let decrypted = private.decrypt(&ciphertext)?;
    println!(
        "  decrypt (4096-bit exponent): {:.2} ms",
        start.elapsed().as_secs_f64() * 1e3
    );
    h.check("round-trip", decrypted == message);

    h.finish()
}

fn run_hybrid() -> Result<()> {
    let mut h = Harness::new("Hybrid engine selection");

    // Even modulus: Montgomery impossible, plain engine serves.
    let even = RsaKey::from_decimal("22", "3", false)?;
    h.check("even modulus has no context", even.montgomery().is_none());
    h.check(
        "even modulus still encrypts",
        even.encrypt(&BigUint::from_u32(5))?.to_u32() == Some(reference_pow(5, 3, 22)),
    );

    // Small odd modulus: context exists but the selector skips it.
    let small = RsaKey::from_decimal("143", "7", false)?;
    h.check("small odd modulus has a context", small.montgomery().is_some());
    h.check(
        "small odd modulus encrypts",
        small.encrypt(&BigUint::from_u32(42))?.to_u32() == Some(reference_pow(42, 7, 143)),
    );

    // Wide modulus: Montgomery carries the call; both engines agree.
    let public = key_1024(false)?;
    let message = BigUint::from_u64(0xfeed_beef_dead);
    let via_selector = public.encrypt(&message)?;
    let via_plain = message.mod_exp(&public.exp, &public.n)?;
    h.check("wide modulus engines agree", via_selector == via_plain);

    h.finish()
}

/// Reference exponentiation for operands small enough for u64.
fn reference_pow(base: u64, exp: u32, modulus: u64) -> u32 {
    let mut result = 1u64;
    for _ in 0..exp {
        result = result * base % modulus;
    }
    result as u32
}

fn run_roundtrip() -> Result<()> {
    let mut h = Harness::new("Montgomery form conversion round-trips");

    let n = BigUint::from_u32(143);
    let ctx = MontgomeryCtx::new(&n)?;
    let mut all = true;
    for a in 1u32..143 {
        let value = BigUint::from_u32(a);
        let back = ctx.from_form(&ctx.to_form(&value)?)?;
        if back != value {
            println!("  residue {a} failed");
            all = false;
        }
    }
    h.check("every residue mod 143", all);

    let n = BigUint::from_hex(N_1024_HEX)?;
    let ctx = MontgomeryCtx::new(&n)?;
    let mut all = true;
    for seed in 1u64..=32 {
        let value = BigUint::from_u64(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        let back = ctx.from_form(&ctx.to_form(&value)?)?;
        if back != value {
            println!("  sample {seed} failed");
            all = false;
        }
    }
    h.check("samples under the 1024-bit modulus", all);

    h.finish()
}

fn run_boundary() -> Result<()> {
    let mut h = Harness::new("Zero, one, and boundary values");

    let n35 = BigUint::from_u32(35);

    let r = BigUint::zero().mod_exp(&BigUint::one(), &n35)?;
    h.check("0^1 mod 35 = 0", r.is_zero());

    let r = BigUint::from_u32(7).mod_exp(&BigUint::zero(), &n35)?;
    h.check("7^0 mod 35 = 1", r.is_one());

    let r = BigUint::from_u32(5)
        .mod_exp(&BigUint::from_u32(5), &BigUint::zero());
    h.check("zero modulus rejected", r.is_err());

    let r = BigUint::one().mod_exp(&BigUint::from_u32(999_999), &n35)?;
    h.check("1^999999 mod 35 = 1", r.is_one());

    let r = BigUint::from_u32(5).mod_exp(&BigUint::one(), &BigUint::one())?;
    h.check("5^1 mod 1 = 0", r.is_zero());

    let r = BigUint::from_u32(34).mod_exp(&BigUint::one(), &n35)?;
    h.check("34^1 mod 35 = 34", r.to_u32() == Some(34));

    let r = BigUint::from_u32(34).mod_exp(&BigUint::from_u32(2), &n35)?;
    h.check("34^2 mod 35 = 1", r.is_one());

    let key = RsaKey::from_decimal("35", "5", false)?;
    h.check("encrypt 0 = 0", key.encrypt(&BigUint::zero())?.is_zero());
    h.check(
        "encrypt at modulus rejected",
        key.encrypt(&n35).is_err(),
    );

    h.finish()
}

fn run_montgomery() -> Result<()> {
    let mut h = Harness::new("Montgomery context construction");

    h.check(
        "even modulus rejected",
        MontgomeryCtx::new(&BigUint::from_u32(100)).is_err(),
    );
    h.check(
        "zero modulus rejected",
        MontgomeryCtx::new(&BigUint::zero()).is_err(),
    );

    for modulus in [&BigUint::from_u32(143), &BigUint::from_hex(N_1024_HEX)?] {
        let ctx = MontgomeryCtx::new(modulus)?;
        println!("  {}", ctx.info());
        h.check(
            &format!("{} bit context active", modulus.bits()),
            ctx.is_active(),
        );

        // to_form(1) must equal R mod n.
        let k = modulus.num_limbs();
        let r_mod_n = BigUint::one().shl_bits(32 * k)?.rem(modulus)?;
        h.check(
            &format!("{} bit to_form(1) = R mod n", modulus.bits()),
            ctx.to_form(&BigUint::one())? == r_mod_n,
        );
    }

    h.finish()
}

fn run_algorithms() -> Result<()> {
    let mut h = Harness::new("Engine agreement: plain vs Montgomery");

    // Narrow exponent: binary scan on both sides.
    let public = key_1024(false)?;
    let message = BigUint::from_u64(0x0123_4567_89ab_cdef);
    let plain = message.mod_exp(&public.exp, &public.n)?;
    let hybrid = mod_exp_hybrid(&message, &public.exp, &public.n, public.montgomery())?;
    h.check("e = 65537 agreement", plain == hybrid);

    // Wide exponent: the plain engine runs its sliding window against
    // the Montgomery ladder.
    let private = key_1024(true)?;
    let ciphertext = public.encrypt(&message)?;
    let plain = ciphertext.mod_exp(&private.exp, &private.n)?;
    let hybrid = mod_exp_hybrid(
        &ciphertext,
        &private.exp,
        &private.n,
        private.montgomery(),
    )?;
    h.check("full exponent agreement", plain == hybrid);
    h.check("both recover the message", plain == message);

    h.finish()
}
