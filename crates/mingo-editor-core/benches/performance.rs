use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mingo_editor_core::{DiagnosticRecord, map_records};

fn large_source(function_count: usize) -> String {
    let mut out = String::with_capacity(function_count * 96);
    for i in 0..function_count {
        out.push_str(&format!(
            "let f{i} = fn(a, b) {{ if (a > b) {{ return a; }} else {{ return b + {i}; }} }};\n"
        ));
    }
    out
}

fn bench_format_large_source(c: &mut Criterion) {
    let source = large_source(10_000);
    c.bench_function("format/10k_functions", |b| {
        b.iter(|| {
            let formatted = mingo_editor_core::format(black_box(&source));
            black_box(formatted.len());
        })
    });
}

fn bench_reformat_formatted_source(c: &mut Criterion) {
    let formatted = mingo_editor_core::format(&large_source(10_000));
    c.bench_function("format/10k_functions_already_formatted", |b| {
        b.iter(|| black_box(mingo_editor_core::format(black_box(&formatted)).len()))
    });
}

fn bench_map_records(c: &mut Criterion) {
    let records = (0..50_000)
        .map(|i| DiagnosticRecord::new(i, i % 80, "expected next token to be SEMICOLON"))
        .collect::<Vec<_>>();
    c.bench_function("map_records/50k", |b| {
        b.iter(|| black_box(map_records(black_box(&records)).len()))
    });
}

criterion_group!(
    benches,
    bench_format_large_source,
    bench_reformat_formatted_source,
    bench_map_records
);
criterion_main!(benches);
