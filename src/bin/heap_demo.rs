//! Pushes and pops a run of integers through a `BrandedTreeHeap`.
//!
//! Mirrors the classic exercise: insert 1..=14, drop the minimum, drain the
//! rest, then rebuild, copy and drain the copies.

use anyhow::{Context, Result};
use tripod_heap::{BrandedTreeHeap, GhostToken};

fn main() -> Result<()> {
    GhostToken::new(|mut token| -> Result<()> {
        let mut heap = BrandedTreeHeap::new();
        heap.extend_from(&mut token, 1..=14)
            .context("filling the heap")?;

        heap.pop(&mut token).context("dropping the minimum")?;

        let mut drained = Vec::with_capacity(heap.len());
        while let Some(value) = heap.pop(&mut token).context("draining the heap")? {
            drained.push(value);
        }
        println!("drained:  {}", join(&drained));

        heap.extend_from(&mut token, drained.iter().copied())
            .context("rebuilding the heap")?;
        let copy = heap.clone();
        let mut assigned = BrandedTreeHeap::new();
        assigned.clone_from(&copy);

        let copied = copy.into_sorted_vec(&mut token).context("draining the copy")?;
        let reassigned = assigned.into_sorted_vec(&mut token).context("draining the assigned copy")?;
        println!("copy:     {}", join(&copied));
        println!("assigned: {}", join(&reassigned));
        println!("original still holds {} elements", heap.len());

        Ok(())
    })
}

fn join(values: &[i32]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
