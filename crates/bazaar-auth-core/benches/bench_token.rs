//! Benchmarks for the token hot path

use bazaar_auth_core::{AuthConfig, SigningKey, SigningKeys, TokenCodec};
use bazaar_types::{Principal, RegularUser, Roles, SubjectId, SuperAdmin, TrustDomain};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn codec() -> TokenCodec {
    TokenCodec::new(AuthConfig::new(SigningKeys::new(
        SigningKey::new([1u8; 32]).unwrap(),
        SigningKey::new([2u8; 32]).unwrap(),
        SigningKey::new([3u8; 32]).unwrap(),
    )))
}

fn principal_for(domain: TrustDomain) -> Principal {
    match domain {
        TrustDomain::SuperAdmin => Principal::SuperAdmin(SuperAdmin {
            id: SubjectId::new(),
            username: "root".into(),
            email: "root@example.com".into(),
        }),
        _ => Principal::RegularUser(RegularUser {
            id: SubjectId::new(),
            email: "bench@example.com".into(),
            username: "bench".into(),
            roles: Roles {
                is_staff: true,
                ..Roles::default()
            },
        }),
    }
}

fn bench_encode(c: &mut Criterion) {
    let codec = codec();
    let mut group = c.benchmark_group("token_encode");

    for domain in TrustDomain::ALL {
        let principal = principal_for(domain);
        group.bench_with_input(
            BenchmarkId::from_parameter(domain),
            &principal,
            |b, principal| {
                b.iter(|| codec.encode(black_box(principal), domain));
            },
        );
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let codec = codec();
    let mut group = c.benchmark_group("token_decode");

    for domain in TrustDomain::ALL {
        let token = codec.encode(&principal_for(domain), domain).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(domain), &token, |b, token| {
            b.iter(|| codec.decode(black_box(token), domain));
        });
    }

    group.finish();
}

fn bench_cross_domain_reject(c: &mut Criterion) {
    let codec = codec();
    let token = codec
        .encode(&principal_for(TrustDomain::User), TrustDomain::User)
        .unwrap();

    c.bench_function("token_decode_wrong_domain", |b| {
        b.iter(|| codec.decode(black_box(&token), TrustDomain::Admin));
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_cross_domain_reject);
criterion_main!(benches);
