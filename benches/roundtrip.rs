use criterion::{black_box, criterion_group, criterion_main, Criterion};
use treejson::{from_str, to_string, to_string_with_options, FormatOptions};

fn sample_document() -> String {
    let mut entries = Vec::with_capacity(200);
    for i in 0..200 {
        entries.push(format!(
            r#"{{"id":{i},"name":"item-{i}","score":{}.5,"tags":["a","b\nc"],"extra":null}}"#,
            i * 3
        ));
    }
    format!("[{}]", entries.join(","))
}

fn bench_parse(c: &mut Criterion) {
    let document = sample_document();
    c.bench_function("parse_array_of_objects", |b| {
        b.iter(|| from_str(black_box(&document)).unwrap())
    });
}

fn bench_serialize(c: &mut Criterion) {
    let document = sample_document();
    let root = from_str(&document).unwrap();
    c.bench_function("serialize_compact", |b| {
        b.iter(|| to_string(black_box(&root)))
    });
    let pretty = FormatOptions::pretty();
    c.bench_function("serialize_pretty", |b| {
        b.iter(|| to_string_with_options(black_box(&root), &pretty))
    });
}

criterion_group!(benches, bench_parse, bench_serialize);
criterion_main!(benches);
