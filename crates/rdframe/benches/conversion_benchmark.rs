use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rdframe::{
    build, flatten, ColumnDescriptor, DataFrame, GraphStore, Identifier, Literal, PrefixMap, Triple,
};

fn prefixes() -> PrefixMap {
    PrefixMap::with_standard_prefixes().with("ex", "http://example.org/")
}

/// Graph with a mix of repeated, tagged and URI-valued properties
fn generate_graph(subjects: usize) -> GraphStore {
    let mut graph = GraphStore::new();
    for s in 0..subjects {
        let subject = format!("http://example.org/entity{}", s);
        for v in 0..(s % 4 + 1) {
            graph.insert(Triple::new(
                subject.as_str(),
                "http://example.org/label",
                Literal::language_tagged(format!("label {} {}", s, v), "en"),
            ));
        }
        graph.insert(Triple::new(
            subject.as_str(),
            "http://example.org/related",
            Identifier::uri(format!("http://example.org/entity{}", (s + 1) % subjects)),
        ));
        graph.insert(Triple::new(
            subject.as_str(),
            "http://example.org/name",
            Literal::simple(format!("name {}", s)),
        ));
    }
    graph
}

fn benchmark_column_names(c: &mut Criterion) {
    let names = [
        "ex:p",
        "http://example.org/string{Literal}[1](xsd:string)@en-GB",
        "skos:broader{URIRef}",
    ];

    c.bench_function("column_decode", |b| {
        b.iter(|| {
            for name in names.iter() {
                black_box(ColumnDescriptor::decode(black_box(name)));
            }
        });
    });
}

fn benchmark_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversion");
    let prefixes = prefixes();

    for size in [100, 1000, 5000].iter() {
        let graph = generate_graph(*size);

        group.bench_with_input(BenchmarkId::new("build", size), &graph, |b, graph| {
            b.iter(|| black_box(build(graph, &prefixes)));
        });

        let frame: DataFrame = build(&graph, &prefixes);

        group.bench_with_input(BenchmarkId::new("flatten", size), &frame, |b, frame| {
            b.iter(|| black_box(flatten(frame, &prefixes).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_column_names, benchmark_conversion);
criterion_main!(benches);
