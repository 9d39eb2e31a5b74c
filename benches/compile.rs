use std::fmt::Write as _;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::distributions::{Distribution, Uniform};
use rand::thread_rng;

use sigaddr::{parse, NoVars};

fn random_cidr_list(count: usize) -> String {
    let mut rng = thread_rng();
    let octet = Uniform::from(0u8..=255);
    let prefix = Uniform::from(8u8..=30);
    let mut text = String::new();
    for i in 0..count {
        if i > 0 {
            text.push(',');
        }
        let _ = write!(
            text,
            "{}.{}.{}.{}/{}",
            octet.sample(&mut rng),
            octet.sample(&mut rng),
            octet.sample(&mut rng),
            octet.sample(&mut rng),
            prefix.sample(&mut rng),
        );
    }
    text
}

fn bench_compile(c: &mut Criterion) {
    for size in [10, 100, 1_000] {
        let text = random_cidr_list(size);
        c.bench_function(&format!("compile_ipv4_{size}"), |b| {
            b.iter(|| black_box(parse(black_box(&text), &NoVars).unwrap()))
        });
    }
}

fn bench_compile_with_negation(c: &mut Criterion) {
    let positive = random_cidr_list(500);
    let negative: String = random_cidr_list(200)
        .split(',')
        .map(|s| format!("!{s}"))
        .collect::<Vec<_>>()
        .join(",");
    let text = format!("[{positive},{negative}]");
    c.bench_function("compile_ipv4_with_negation", |b| {
        b.iter(|| black_box(parse(black_box(&text), &NoVars).unwrap()))
    });
}

criterion_group!(benches, bench_compile, bench_compile_with_negation);
criterion_main!(benches);
