//! Benchmarks for schema inference operations
//!
//! Run with: cargo bench -p xml-typegen-core

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use xml_typegen_core::inference::{XMLConverter, merge_trees};
use xml_typegen_core::validation::identifier;

/// Generate sample XML documents for benchmarking
fn generate_sample_documents(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            format!(
                r#"<order id="{}" region="r{}"><customer tier="{}"><name>Customer {}</name><email>c{}@example.com</email></customer><line sku="A{}" qty="{}"/><line sku="B{}" qty="1"/><note>{}</note></order>"#,
                i,
                i % 5,
                i % 3,
                i,
                i,
                i,
                1 + i % 9,
                i,
                if i % 2 == 0 { "rush" } else { "" }
            )
        })
        .collect()
}

/// Benchmark identifier sanitization for various raw names
fn bench_identifier(c: &mut Criterion) {
    let mut group = c.benchmark_group("identifier");

    let test_cases = vec![
        ("plain", "order"),
        ("dashed", "shipping-address"),
        ("prefixed", "xs:complexType"),
        ("leading_digits", "3d-model"),
        ("unicode", "straße"),
    ];

    for (name, value) in test_cases {
        group.bench_with_input(BenchmarkId::new("sanitize", name), &value, |b, value| {
            b.iter(|| black_box(identifier(value)));
        });
    }

    group.finish();
}

/// Benchmark ingestion with varying document counts
fn bench_ingestion(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingestion");

    for count in [10, 100, 500].iter() {
        let documents = generate_sample_documents(*count);
        group.throughput(Throughput::Elements(*count as u64));

        group.bench_with_input(
            BenchmarkId::new("ingest_str", count),
            &documents,
            |b, documents| {
                b.iter(|| {
                    let mut converter = XMLConverter::new();
                    for document in documents {
                        converter.ingest_str(document).unwrap();
                    }
                    black_box(converter.stats())
                });
            },
        );
    }

    group.finish();
}

/// Benchmark code generation from an accumulated schema
fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation");

    let mut converter = XMLConverter::new();
    let documents = generate_sample_documents(100);
    converter.ingest_batch(&documents).unwrap();

    group.bench_function("generate_string", |b| {
        b.iter(|| black_box(converter.generate_string()));
    });

    group.finish();
}

/// Benchmark tree merging
fn bench_merging(c: &mut Criterion) {
    let mut group = c.benchmark_group("merging");

    let documents = generate_sample_documents(200);
    let (left, right) = documents.split_at(100);
    let mut a = XMLConverter::new();
    let mut b = XMLConverter::new();
    a.ingest_batch(left).unwrap();
    b.ingest_batch(right).unwrap();

    group.bench_function("merge_trees", |bench| {
        bench.iter(|| black_box(merge_trees(a.tree(), b.tree())));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_identifier,
    bench_ingestion,
    bench_generation,
    bench_merging
);
criterion_main!(benches);
