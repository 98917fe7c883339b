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

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rsa4096::{BigUint, MontgomeryCtx};

const N_1024_HEX: &str = "890dabac075aadfe78f0da9a5d8690b8ac193600ab021cedc84ad77dca5fa986c9161d2e7ef50088cb8527e1209d20204f4f1f90435d728e911a9d396b5ce7e45c8204b6bfa3df3f6f4bf5414bc01b0db04ee766b4ac25cd074d36553171609b3d05728210cf19ed05ce2d87a32c4334cac9af3933529ae40e2029bfc390daab";

fn bench_modexp(c: &mut Criterion) {
    let n = BigUint::from_hex(N_1024_HEX).unwrap();
    let ctx = MontgomeryCtx::new(&n).unwrap();
    let base = BigUint::from_u64(0x1234_5678_9abc_def1);
    let exp = BigUint::from_u32(65_537);

    c.bench_function("modexp_1024_plain_e65537", |b| {
        b.iter(|| black_box(&base).mod_exp(black_box(&exp), &n).unwrap())
    });

    c.bench_function("modexp_1024_montgomery_e65537", |b| {
        b.iter(|| ctx.exp(black_box(&base), black_box(&exp)).unwrap())
    });

    c.bench_function("montgomery_ctx_build_1024", |b| {
        b.iter(|| MontgomeryCtx::new(black_box(&n)).unwrap())
    });
}

fn bench_codec(c: &mut Criterion) {
    let n = BigUint::from_hex(N_1024_HEX).unwrap();

    c.bench_function("to_decimal_1024", |b| b.iter(|| black_box(&n).to_decimal()));

    let decimal = n.to_decimal();
    c.bench_function("from_decimal_1024", |b| {
        b.iter(|| BigUint::from_decimal(black_box(&decimal)).unwrap())
    });
}

criterion_group!(benches, bench_modexp, bench_codec);
criterion_main!(benches);
