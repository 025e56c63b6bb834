use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use docindex::index::{TreeIndex, Variant};

/// Builds an index of the given variant holding `0..num_nodes`, inserted
/// in shuffled order so the unbalanced baseline isn't measured on its
/// degenerate linked-list shape.
fn build_index(variant: Variant, num_nodes: usize) -> TreeIndex<i32, i32> {
    let mut rng = StdRng::seed_from_u64(1_000);
    let mut keys: Vec<i32> = (0..num_nodes as i32).collect();
    keys.shuffle(&mut rng);

    let mut index = TreeIndex::new(variant);
    for key in keys {
        index.insert(key, key);
    }
    index
}

/// Helper to bench a function on an index.
/// It creates a group for the given name and closure and runs tests for
/// various sizes and engines before finishing the group.
fn bench_helper(c: &mut Criterion, name: &str, f: impl Fn(&mut TreeIndex<i32, i32>, i32)) {
    let mut group = c.benchmark_group(name);

    for num_levels in [3, 7, 11, 15] {
        let num_nodes = 2usize.pow(num_levels as u32) - 1;
        let largest_element_in_tree = num_nodes as i32 - 1;

        for variant in Variant::ALL {
            let index = build_index(variant, num_nodes);
            let id = BenchmarkId::new(variant.to_string(), largest_element_in_tree);

            group.bench_function(id, |b| {
                b.iter_custom(|iters| {
                    let mut time = std::time::Duration::ZERO;
                    for _ in 0..iters {
                        // Clone outside the timer: search mutates the
                        // splay engine and insert mutates all three.
                        let mut index = black_box(index.clone());
                        let instant = std::time::Instant::now();
                        f(&mut index, black_box(largest_element_in_tree));
                        time += instant.elapsed();
                    }
                    time
                })
            });
        }
    }

    group.finish();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_helper(c, "find", |index, i| {
        let _value = black_box(index.search(&i));
    });
    bench_helper(c, "find-miss", |index, i| {
        let _value = black_box(index.search(&(i + 1)));
    });
    bench_helper(c, "insert", |index, i| {
        index.insert(i + 1, i + 1);
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
