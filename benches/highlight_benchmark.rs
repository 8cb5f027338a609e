//! Highlight benchmark: classification cost per line.
//!
//! The renderer classifies every visible line on every frame, so this needs
//! to stay cheap.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use forge::Highlighter;

fn classify_plain(c: &mut Criterion) {
    let highlighter = Highlighter::new();
    let line = "a perfectly ordinary line of text with no tokens";

    c.bench_function("classify_plain", |b| {
        b.iter(|| highlighter.classify(black_box(line)))
    });
}

fn classify_key_value(c: &mut Criterion) {
    let highlighter = Highlighter::new();
    let line = "  endpoint: https://example.com/api  # production";

    c.bench_function("classify_key_value", |b| {
        b.iter(|| highlighter.classify(black_box(line)))
    });
}

fn classify_dense_punctuation(c: &mut Criterion) {
    let highlighter = Highlighter::new();
    let line = "matrix: [[1, 2], [3, 4], {a: 'x', b: \"y\"}]";

    c.bench_function("classify_dense_punctuation", |b| {
        b.iter(|| highlighter.classify(black_box(line)))
    });
}

fn classify_screenful(c: &mut Criterion) {
    let highlighter = Highlighter::new();
    let lines: Vec<String> = (0..40)
        .map(|i| format!("key{i}: value{i} # comment {i}"))
        .collect();

    c.bench_function("classify_screenful", |b| {
        b.iter(|| {
            for line in &lines {
                black_box(highlighter.classify(line));
            }
        })
    });
}

criterion_group!(
    benches,
    classify_plain,
    classify_key_value,
    classify_dense_punctuation,
    classify_screenful
);
criterion_main!(benches);
