use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jsinspect::runtime::{JSMap, JSObject};
use jsinspect::{describe, parse_value, InspectOptions, Value, ValueDescriber};

fn bench_describe_primitives(c: &mut Criterion) {
    let values = [
        Value::int(42),
        Value::number(3.14),
        Value::number(f64::NAN),
        Value::string("Hello, JavaScript!"),
        Value::bigint(9_007_199_254_740_993_i64),
    ];

    c.bench_function("describe primitives", |b| {
        b.iter(|| {
            for v in &values {
                black_box(describe(v));
            }
        })
    });
}

fn bench_describe_array_10k(c: &mut Criterion) {
    let array = Value::array((0..10_000).map(Value::int).collect());
    let all = ValueDescriber::new(InspectOptions::new().with_max_items(usize::MAX));

    c.bench_function("describe array 10k", |b| {
        b.iter(|| black_box(all.describe(&array)))
    });
}

fn bench_describe_records(c: &mut Criterion) {
    let records: Vec<Value> = (0..1000)
        .map(|i| {
            let mut obj = JSObject::with_class("Point");
            obj.set("x", Value::int(i));
            obj.set("y", Value::int(i * 2));
            obj.set("label", Value::string(format!("point {}", i)));
            Value::object(obj)
        })
        .collect();
    let list = Value::array(records);
    let all = ValueDescriber::new(InspectOptions::new().with_max_items(usize::MAX));

    c.bench_function("describe records 1k", |b| {
        b.iter(|| black_box(all.describe(&list)))
    });
}

fn bench_describe_map(c: &mut Criterion) {
    let map: JSMap = (0..1000)
        .map(|i| (Value::string(format!("key{}", i)), Value::number(i as f64 / 3.0)))
        .collect();
    let map = Value::map(map);

    c.bench_function("describe map 1k", |b| {
        b.iter(|| black_box(describe(&map)))
    });
}

fn bench_cyclic(c: &mut Criterion) {
    let record = Value::object(JSObject::new());
    if let Value::Object(obj) = &record {
        let mut obj = obj.borrow_mut();
        obj.set("self", record.clone());
        obj.set("list", Value::array(vec![record.clone(); 100]));
    }

    c.bench_function("describe cyclic", |b| {
        b.iter(|| black_box(describe(&record)))
    });

    if let Value::Object(obj) = &record {
        let mut obj = obj.borrow_mut();
        obj.delete("self");
        obj.delete("list");
    }
}

fn bench_parse_literal(c: &mut Criterion) {
    let source = r#"{
        name: '山田太郎',
        age: 30,
        tags: ['a', 'b', 'c'],
        created: new Date('2023-12-25T10:30:00Z'),
        lookup: new Map([['key1', 'value1'], ['key2', 'value2']]),
        unique: new Set([1, 2, 3, 3, 4, 5, 5]),
        pattern: /^[^\s@]+@[^\s@]+\.[^\s@]+$/,
        greet(name) { return `hello ${name}`; },
        payload: Buffer.from('SGVsbG8=', 'base64'),
    }"#;

    c.bench_function("parse literal", |b| {
        b.iter(|| black_box(parse_value(source).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_describe_primitives,
    bench_describe_array_10k,
    bench_describe_records,
    bench_describe_map,
    bench_cyclic,
    bench_parse_literal,
);

criterion_main!(benches);
