// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! End-to-end completion pipeline benchmarks
//!
//! Measures statement resolution plus classification plus generation for a
//! keystroke, against the standard schema and a wide synthetic one.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqlsense_catalog::build_foreign_keys;
use sqlsense_engine::{CompletionEngine, CompletionRequest, resolve_statement};
use sqlsense_ir::{ColumnDescriptor, DialectId, SchemaSnapshot, TableDescriptor};
use sqlsense_test_utils::{MockSnapshotBuilder, split_cursor};

fn wide_snapshot(tables: usize, columns: usize) -> SchemaSnapshot {
    (0..tables).fold(MockSnapshotBuilder::new().with_standard_schema(), |builder, t| {
        let cols = (0..columns)
            .map(|c| ColumnDescriptor::new(format!("col_{c}"), "text"))
            .collect();
        builder.with_table(TableDescriptor::new("wide", format!("table_{t:04}")), cols)
    })
    .build()
}

fn bench_resolve_statement(c: &mut Criterion) {
    let buffer = "SELECT 1;\n".repeat(500) + "SELECT * FROM orders WHERE id = 1;";
    let cursor = buffer.len() - 3;
    c.bench_function("statement/resolve_last_of_500", |b| {
        b.iter(|| resolve_statement(black_box(&buffer), cursor, DialectId::PostgreSQL));
    });
}

fn bench_completion_by_context(c: &mut Criterion) {
    let snapshot = MockSnapshotBuilder::new().with_standard_schema().build();
    let fks = build_foreign_keys(&snapshot);
    let engine = CompletionEngine::for_dialect(DialectId::PostgreSQL);

    let cases = [
        ("from", "SELECT * FROM ord|"),
        ("dot", "SELECT o.| FROM orders o"),
        ("join_on", "SELECT * FROM orders o JOIN customers c ON |"),
        ("where", "SELECT * FROM orders o WHERE to|"),
    ];

    let mut group = c.benchmark_group("completion/standard_schema");
    for (name, marked) in cases {
        let (buffer, cursor) = split_cursor(marked);
        let request = CompletionRequest::new(buffer, cursor).explicit();
        group.bench_with_input(BenchmarkId::from_parameter(name), &request, |b, request| {
            b.iter(|| engine.complete(black_box(request), &snapshot, &fks));
        });
    }
    group.finish();
}

fn bench_completion_by_schema_size(c: &mut Criterion) {
    let engine = CompletionEngine::for_dialect(DialectId::PostgreSQL);
    let request = CompletionRequest::new("SELECT * FROM tab", 17);

    let mut group = c.benchmark_group("completion/schema_size");
    for tables in [10, 100, 1000] {
        let snapshot = wide_snapshot(tables, 20);
        let fks = build_foreign_keys(&snapshot);
        group.bench_with_input(BenchmarkId::from_parameter(tables), &snapshot, |b, snapshot| {
            b.iter(|| engine.complete(black_box(&request), snapshot, &fks));
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(50);
    targets =
        bench_resolve_statement,
        bench_completion_by_context,
        bench_completion_by_schema_size
);

criterion_main!(benches);
