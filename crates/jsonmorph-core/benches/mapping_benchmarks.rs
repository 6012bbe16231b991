//! Benchmarks for path evaluation and schema mapping
//!
//! These cover the hot paths: parsing and executing path expressions, walking
//! nested schemas, merging into targets and expanding generators.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use jsonmorph_core::jsonpath::JSONPath;
use jsonmorph_core::{map, ArrayMergeMode, MapOptions, Mapper, ObjectMergeMode, Schema};
use serde_json::{json, Value};

fn create_test_data() -> Value {
    json!({
        "store": {
            "book": [
                {"category": "reference", "author": "Nigel Rees", "title": "Sayings of the Century", "price": 8.95},
                {"category": "fiction", "author": "Evelyn Waugh", "title": "Sword of Honour", "price": 12.99},
                {"category": "fiction", "author": "Herman Melville", "title": "Moby Dick", "price": 8.99},
                {"category": "fiction", "author": "J. R. R. Tolkien", "title": "The Lord of the Rings", "price": 22.99}
            ],
            "bicycle": {"color": "red", "price": 19.95}
        }
    })
}

fn create_large_data(size: usize) -> Value {
    let items: Vec<Value> = (0..size)
        .map(|i| {
            json!({
                "id": i,
                "name": format!("Item {}", i),
                "price": (i as f64) * 1.5 + 10.0,
                "tags": ["tag1", "tag2"]
            })
        })
        .collect();

    json!({"items": items})
}

fn bench_path_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_parsing");

    let expressions = vec![
        "$.store.book[0].title",
        "$.store.book[*].author",
        "$..author",
        "$.store.book[?(@.price < 10)]",
        "$.store.book[0,1]",
        "$.store.book[1:3]",
    ];

    for expr in expressions {
        group.bench_with_input(BenchmarkId::new("parse", expr), expr, |b, expr| {
            b.iter(|| {
                let result = JSONPath::parse(black_box(expr));
                black_box(result)
            })
        });
    }

    group.finish();
}

fn bench_path_execution(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_execution");
    let data = create_test_data();

    let test_cases = vec![
        ("property", "$.store.book[0].title"),
        ("wildcard", "$.store.book[*].author"),
        ("recursive", "$..price"),
        ("filter", "$.store.book[?(@.category == 'fiction' && @.price < 20)]"),
    ];

    for (name, expr) in test_cases {
        let Ok(jsonpath) = JSONPath::parse(expr) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::new("execute", name), &jsonpath, |b, path| {
            b.iter(|| {
                let result = path.execute(black_box(&data));
                black_box(result)
            })
        });
    }

    group.finish();
}

fn bench_object_mapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("object_mapping");
    let data = create_test_data();
    let schema = Schema::from(json!({
        "catalog": {
            "first": "$.store.book[0].title",
            "authors": "$.store.book[*].author",
            "bike": {"color": "$.store.bicycle.color", "price": {"@path": "$.store.bicycle.cost", "@default": 0}},
            "source": "bookstore"
        }
    }));
    let target = json!({"catalog": {"id": 42, "authors": ["Anonymous"]}});

    group.bench_function("no_target", |b| {
        b.iter(|| black_box(map(black_box(&data), &schema, None, MapOptions::default())))
    });

    for (name, mode) in [("overwrite", ObjectMergeMode::Overwrite), ("preserve", ObjectMergeMode::Preserve)] {
        let options = MapOptions::new().object_merge_mode(mode);
        group.bench_with_input(BenchmarkId::new("with_target", name), &options, |b, options| {
            b.iter(|| black_box(map(black_box(&data), &schema, Some(&target), *options)))
        });
    }

    group.finish();
}

fn bench_generator(c: &mut Criterion) {
    let mut group = c.benchmark_group("generator");
    let mapper = Mapper::new().with_options(MapOptions::new().array_merge_mode(ArrayMergeMode::Append));
    let schema = Schema::from(json!([{
        "@element": {
            "id": "$.items[*].id",
            "name": "$.items[*].name",
            "tag": {"@path": "$.items[0].tags", "@padding": "wrap"},
            "kind": "item"
        }
    }]));

    for size in [10, 100, 1000] {
        let data = create_large_data(size);
        group.bench_with_input(BenchmarkId::new("expand", size), &data, |b, data| {
            b.iter(|| black_box(mapper.map(black_box(data), &schema, None)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_path_parsing,
    bench_path_execution,
    bench_object_mapping,
    bench_generator
);

criterion_main!(benches);
