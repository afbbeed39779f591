use bookshelf_import::text_parser::{parse_text_with_context, validate_parse_results};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn sample_text(links: usize) -> String {
    (0..links)
        .map(|i| {
            format!(
                "{}. Book number {}: https://www.goodreads.com/book/show/{} \u{2014} notes about it\n\
                 Shared via bit.ly/{:x} and mentioned by someone@example.com.\n\n",
                i + 1,
                i,
                1000 + i,
                i
            )
        })
        .collect()
}

fn bench_parse(c: &mut Criterion) {
    let small = sample_text(10);
    let large = sample_text(200);

    c.bench_function("parse_text_with_context/10", |b| {
        b.iter(|| parse_text_with_context(black_box(&small)))
    });
    c.bench_function("parse_text_with_context/200", |b| {
        b.iter(|| parse_text_with_context(black_box(&large)))
    });
    c.bench_function("parse_and_validate/200", |b| {
        b.iter(|| validate_parse_results(parse_text_with_context(black_box(&large)), 50))
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
