use chisel_raw_json::Parser;
use criterion::{criterion_group, criterion_main, Criterion};
use pprof::criterion::{Output, PProfProfiler};

macro_rules! build_serialize_benchmark {
    ($func : tt, $filename : expr) => {
        fn $func(c: &mut Criterion) {
            let parser = Parser::default();
            let parsed = parser
                .parse_file(format!("fixtures/json/bench/{}.json", $filename))
                .unwrap();
            c.bench_function(concat!("serialize of ", $filename), |b| {
                b.iter(|| parsed.to_string())
            });
        }
    };
}

build_serialize_benchmark!(benchmark_catalogue, "catalogue");
build_serialize_benchmark!(benchmark_feed, "feed");
build_serialize_benchmark!(benchmark_deep_nesting, "deep_nesting");

criterion_group! {
    name = benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = benchmark_catalogue, benchmark_feed, benchmark_deep_nesting
}
criterion_main!(benches);
