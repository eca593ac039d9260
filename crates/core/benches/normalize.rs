use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use normform_core::normal_form::closure;
use normform_core::{
    highest_normal_form, normalize, AttributeSet, FunctionalDependency, NormalForm, Relation,
    Table, Value,
};

/// A chain `A0 -> A1 -> ... -> A{width-1}` keyed by `A0`, with `rows` rows.
///
/// Every attribute after `A1` takes `rows / (i + 1)` distinct values, so no
/// determinant but `A0` is a superkey and each link is a 3NF violation.
fn build_chain(width: usize, rows: usize) -> Relation {
    let header: Vec<String> = (0..width).map(|i| format!("A{i}")).collect();
    let cells = (0..rows).map(|row| {
        (0..width)
            .map(|i| {
                let distinct = (rows / (i + 1)).max(1);
                Value::from(i64::try_from(row % distinct).unwrap_or_default())
            })
            .collect::<Vec<_>>()
    });
    let table = Table::from_rows(&header, cells).expect("rectangular table");
    let fds: Vec<FunctionalDependency> = (1..width)
        .map(|i| {
            format!("A{} -> A{i}", i - 1)
                .parse()
                .expect("should parse")
        })
        .collect();
    Relation::new("Chain", table, AttributeSet::from_names(["A0"]))
        .and_then(|relation| relation.with_dependencies(fds, vec![]))
        .expect("valid relation")
}

fn bench_closure(c: &mut Criterion) {
    let mut group = c.benchmark_group("closure");
    for width in [8, 32, 128] {
        let relation = build_chain(width, 4);
        let start = AttributeSet::from_names(["A0"]);
        group.bench_with_input(BenchmarkId::from_parameter(width), &relation, |b, relation| {
            b.iter(|| closure(black_box(relation.fds()), black_box(&start)));
        });
    }
    group.finish();
}

fn bench_highest_normal_form(c: &mut Criterion) {
    let mut group = c.benchmark_group("highest_normal_form");
    for rows in [100, 1_000, 10_000] {
        let relation = build_chain(6, rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &relation, |b, relation| {
            b.iter(|| highest_normal_form(black_box(relation)));
        });
    }
    group.finish();
}

fn bench_normalize_bcnf(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_bcnf");
    for (width, rows) in [(4, 100), (8, 1_000), (16, 1_000)] {
        let relation = build_chain(width, rows);
        group.bench_with_input(
            BenchmarkId::new(format!("width_{width}"), rows),
            &relation,
            |b, relation| {
                b.iter(|| normalize(black_box(relation.clone()), NormalForm::BoyceCodd));
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_closure,
    bench_highest_normal_form,
    bench_normalize_bcnf
);
criterion_main!(benches);
