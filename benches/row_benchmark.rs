//! Row benchmark: Measure tab expansion and column mapping.
//!
//! Target: < 1µs per 80-column row update

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use quill::{LineBuffer, Row};

fn row_update(c: &mut Criterion) {
    let mut plain = Row::new(0, "x".repeat(80).chars());
    let mut tabbed = Row::new(0, "\tkey\t= value;\t\t// trailing".chars());

    c.bench_function("row_update_plain_80", |b| {
        b.iter(|| plain.update(black_box(8)))
    });

    c.bench_function("row_update_tabs", |b| {
        b.iter(|| tabbed.update(black_box(8)))
    });
}

fn row_columns(c: &mut Criterion) {
    let mut row = Row::new(0, "\tfn main() {\t\tprintln!(\"hi\");\t}".chars());
    row.update(8);
    let len = row.len();

    c.bench_function("row_render_column", |b| {
        b.iter(|| row.render_column(black_box(len), 8))
    });

    c.bench_function("row_raw_column", |b| {
        b.iter(|| row.raw_column(black_box(30), 8))
    });
}

fn row_find(c: &mut Criterion) {
    let lines: Vec<String> = (0..1000).map(|i| format!("line {i}: The Quick Brown Fox")).collect();
    let buffer = LineBuffer::from_lines(8, &lines);

    c.bench_function("row_find_case_insensitive", |b| {
        b.iter(|| buffer.rows().iter().filter_map(|row| row.find(black_box("brown fox"))).count())
    });
}

criterion_group!(benches, row_update, row_columns, row_find);
criterion_main!(benches);
