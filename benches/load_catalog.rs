//! This bench loads a large generated catalog where every course lists a
//! handful of prerequisites, some of which do not exist.

#![allow(missing_docs)]

use std::fmt::Write;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use planner::{CatalogIndex, Loader, SortedIds};

/// Generates a catalog in a scrambled id order so the index stays shallow.
fn catalog(size: usize) -> String {
    let mut text = String::new();
    for i in 0..size {
        let id = (i * 7919) % size;
        write!(text, "C{id:05},Course {id}").unwrap();
        for offset in 1..=3 {
            write!(text, ",C{:05}", (id + offset * 13) % (size + size / 10)).unwrap();
        }
        text.push('\n');
    }
    text
}

fn load(c: &mut Criterion) {
    let text = catalog(5_000);
    c.bench_function("load 5000 courses", |b| {
        b.iter_batched(
            CatalogIndex::new,
            |mut index| {
                Loader::default().load_str(&text, &mut index).unwrap();
                index
            },
            BatchSize::SmallInput,
        );
    });
}

fn sort_universe(c: &mut Criterion) {
    let ids: Vec<String> = (0..5_000).map(|i| format!("C{:05}", (i * 7919) % 5_000)).collect();
    c.bench_function("sort 5000 ids", |b| {
        b.iter_batched(
            || ids.clone(),
            SortedIds::from_unsorted,
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, load, sort_universe);
criterion_main!(benches);
