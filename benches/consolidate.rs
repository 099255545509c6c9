//! Benchmarks for stub tree consolidation over an in-memory filesystem.
//!
//! The synthetic input mimics a fetched board package set: a seeded stdlib,
//! many loose modules, and packages that shadow some of them.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use stubmerge::config::Layout;
use stubmerge::consolidate;
use stubmerge::filesystem::MemoryFS;

/// Creates an input root with `modules` loose modules, every fourth of which
/// is shadowed by a package of the same name.
fn create_input(modules: usize) -> MemoryFS {
    let mut fs = MemoryFS::new();
    fs.add_file_string("input_micropython_stubs/stdlib/builtins.pyi", "class int: ...\n")
        .unwrap();
    fs.add_dir("input_micropython_stubs/stubs").unwrap();
    fs.add_file_string("input_micropython_stubs/_mpy_shed/__init__.pyi", "")
        .unwrap();
    fs.add_file_string("input_micropython_stubs/__builtins__.pyi", "def const(x): ...\n")
        .unwrap();

    for i in 0..modules {
        let content = format!("def f{}() -> None: ...\n", i);
        fs.add_file_string(format!("input_micropython_stubs/mod{}.pyi", i), &content)
            .unwrap();
        if i % 4 == 0 {
            fs.add_file_string(format!("input_micropython_stubs/mod{}/__init__.pyi", i), &content)
                .unwrap();
            fs.add_file_string(format!("input_micropython_stubs/mod{}/sub.pyi", i), &content)
                .unwrap();
        }
    }
    fs
}

fn bench_consolidate(c: &mut Criterion) {
    let mut group = c.benchmark_group("consolidate");
    let layout = Layout::default();

    for count in [10, 100, 500] {
        let input = create_input(count);
        group.bench_with_input(BenchmarkId::new("modules", count), &input, |b, input| {
            b.iter(|| {
                let mut fs = input.clone();
                let report = consolidate::execute(&mut fs, black_box(&layout)).unwrap();
                black_box(report)
            })
        });
    }

    group.finish();
}

fn bench_rerun(c: &mut Criterion) {
    let layout = Layout::default();
    let mut consolidated = create_input(100);
    consolidate::execute(&mut consolidated, &layout).unwrap();

    // Second and later runs also pay for removing the previous output
    c.bench_function("consolidate_rerun_100", |b| {
        b.iter(|| {
            let mut fs = consolidated.clone();
            black_box(consolidate::execute(&mut fs, &layout).unwrap())
        })
    });
}

criterion_group!(benches, bench_consolidate, bench_rerun);
criterion_main!(benches);
