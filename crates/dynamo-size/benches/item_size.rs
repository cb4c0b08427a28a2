//! Item size estimation over a realistic order record, from native values,
//! plain JSON and DynamoDB JSON.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use dynamo_size::{
    calculate_bytes, calculate_bytes_json, calculate_bytes_wire, item_from_json, item_to_wire,
    Serializer,
};

fn order_json(lines: usize) -> String {
    let items: Vec<String> = (0..lines)
        .map(|i| {
            format!(
                r#"{{"sku": "SKU-{i:05}", "qty": {}, "price": {}.99, "tags": ["red", "sale"]}}"#,
                i % 7 + 1,
                i * 3
            )
        })
        .collect();
    format!(
        r#"{{"pk": "ORDER#1234", "sk": "2025-01-01T00:00:00Z", "customer": {{"name": "Alice", "tier": "gold"}}, "lines": [{}], "paid": true, "note": null}}"#,
        items.join(",")
    )
}

fn bench_item_size(c: &mut Criterion) {
    let json = order_json(200);
    let item = item_from_json(&json).unwrap();
    let wire = item_to_wire(&Serializer::default().serialize_item(&item).unwrap()).to_string();

    c.bench_function("item_size/native", |b| {
        b.iter(|| calculate_bytes(black_box(&item)).unwrap())
    });
    c.bench_function("item_size/json", |b| {
        b.iter(|| calculate_bytes_json(black_box(&json)).unwrap())
    });
    c.bench_function("item_size/wire", |b| {
        b.iter(|| calculate_bytes_wire(black_box(&wire)).unwrap())
    });
}

criterion_group!(benches, bench_item_size);
criterion_main!(benches);
