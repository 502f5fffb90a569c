//! Serde support.
//!
//! A heap serializes as a plain sequence of its values in level order. Reading
//! it back pushes the values in that same order, which for a sequence written
//! by `Serialize` reproduces the original shape without a single exchange.

use super::BrandedTreeHeap;
use crate::collections::order::HeapOrder;
use core::fmt;
use core::marker::PhantomData;
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

impl<'brand, T: Serialize, C> Serialize for BrandedTreeHeap<'brand, T, C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for value in self.level_order() {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

struct HeapVisitor<'brand, T, C> {
    marker: PhantomData<fn() -> BrandedTreeHeap<'brand, T, C>>,
}

impl<'de, 'brand, T, C> Visitor<'de> for HeapVisitor<'brand, T, C>
where
    T: Deserialize<'de>,
    C: HeapOrder<T> + Default,
{
    type Value = BrandedTreeHeap<'brand, T, C>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sequence of heap elements")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let capacity = seq.size_hint().unwrap_or(0);
        let mut heap = BrandedTreeHeap::with_capacity_and_order(capacity, C::default());
        while let Some(value) = seq.next_element()? {
            heap.insert(value).map_err(de::Error::custom)?;
        }
        Ok(heap)
    }
}

impl<'de, 'brand, T, C> Deserialize<'de> for BrandedTreeHeap<'brand, T, C>
where
    T: Deserialize<'de>,
    C: HeapOrder<T> + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(HeapVisitor { marker: PhantomData })
    }
}
