//! Shared helpers for the integration tests

#![allow(dead_code)]

use tree_heap::{Comparator, Reclaimer, TreeHeap, ValueFormatter};

pub fn init_test() {
    drop(env_logger::builder().is_test(true).try_init());
}

/// Asserts the structural invariants that must hold at every observable point
pub fn assert_invariants<T, C, F, R>(heap: &TreeHeap<T, C, F, R>)
where
    C: Comparator<T>,
    F: ValueFormatter<T>,
    R: Reclaimer<T>,
{
    assert!(heap.is_complete(), "tree is not complete: {}", heap);
    assert_eq!(
        heap.count_nodes(),
        heap.size(),
        "reachable node count does not match size"
    );
    if heap.is_built() {
        assert!(heap.is_heap_ordered(), "heap order violated: {}", heap);
    }
}

/// Inserts `values` in order and builds
pub fn built_heap(values: &[i32]) -> TreeHeap<i32> {
    let mut heap = TreeHeap::new();
    for &v in values {
        heap.insert(v).unwrap();
    }
    heap.build().unwrap();
    heap
}

pub fn drain<T, C, F, R>(heap: &mut TreeHeap<T, C, F, R>) -> Vec<T>
where
    C: Comparator<T>,
    F: ValueFormatter<T>,
    R: Reclaimer<T>,
{
    let mut out = Vec::with_capacity(heap.size());
    while !heap.is_empty() {
        out.push(heap.extract().unwrap());
        assert_invariants(heap);
    }
    out
}
