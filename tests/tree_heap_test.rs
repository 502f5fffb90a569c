use std::cell::Cell;
use std::rc::Rc;
use tripod_heap::{BrandedTreeHeap, ComparisonFailed, GhostToken, HeapOrder, LessThan};

/// Natural order on `u32` that fails once a shared budget of comparisons is spent.
#[derive(Clone)]
struct Budgeted {
    remaining: Rc<Cell<Option<usize>>>,
}

impl Budgeted {
    fn unlimited() -> Self {
        Self {
            remaining: Rc::new(Cell::new(None)),
        }
    }

    fn limit(&self, n: usize) {
        self.remaining.set(Some(n));
    }

    fn lift(&self) {
        self.remaining.set(None);
    }
}

impl HeapOrder<u32> for Budgeted {
    fn try_lt(&self, a: &u32, b: &u32) -> Result<bool, ComparisonFailed> {
        match self.remaining.get() {
            Some(0) => Err(ComparisonFailed),
            Some(n) => {
                self.remaining.set(Some(n - 1));
                Ok(a < b)
            }
            None => Ok(a < b),
        }
    }
}

#[test]
fn test_scenario_one_to_fourteen() {
    GhostToken::new(|mut token| {
        let mut heap = BrandedTreeHeap::new();
        for i in 1..15 {
            heap.push(&mut token, i).unwrap();
        }
        assert_eq!(heap.pop(&mut token), Ok(Some(1)));

        let mut drained = Vec::new();
        while heap.len() > 0 {
            drained.push(*heap.peek(&token).unwrap());
            heap.pop(&mut token).unwrap();
        }
        assert_eq!(drained, (2..15).collect::<Vec<_>>());

        heap.extend_from(&mut token, drained.iter().copied()).unwrap();
        let copy = heap.clone();
        let mut assigned = BrandedTreeHeap::new();
        assigned.clone_from(&copy);

        assert_eq!(copy.into_sorted_vec(&mut token), Ok(drained.clone()));
        assert_eq!(assigned.into_sorted_vec(&mut token), Ok(drained.clone()));
        assert_eq!(heap.len(), 13);
        assert_eq!(heap.into_sorted_vec(&mut token), Ok(drained));
    });
}

#[test]
fn test_size_tracks_pushes_and_pops() {
    GhostToken::new(|mut token| {
        let mut heap = BrandedTreeHeap::with_capacity(64);
        for i in 0..64u64 {
            heap.push(&mut token, (i * 37) % 64).unwrap();
            assert_eq!(heap.len() as u64, i + 1);
        }
        let n = heap.len();
        for popped in 1..=n {
            heap.pop(&mut token).unwrap();
            assert_eq!(heap.len(), n - popped);
        }
        assert!(heap.is_empty());
        assert_eq!(heap.peek(&token), None);
    });
}

#[test]
fn test_failed_push_is_invisible() {
    GhostToken::new(|mut token| {
        let order = Budgeted::unlimited();
        let mut heap = BrandedTreeHeap::with_order(order.clone());
        let mut control = BrandedTreeHeap::with_order(Budgeted::unlimited());
        for v in [40, 10, 30, 20, 50, 60, 70] {
            heap.push(&mut token, v).unwrap();
            control.push(&mut token, v).unwrap();
        }

        order.limit(1);
        assert_eq!(heap.push(&mut token, 5), Err(ComparisonFailed));
        order.lift();

        assert!(heap.is_well_formed());
        assert_eq!(heap.len(), control.len());
        assert_eq!(
            heap.iter(&token).collect::<Vec<_>>(),
            control.iter(&token).collect::<Vec<_>>()
        );
        heap.push(&mut token, 15).unwrap();
        control.push(&mut token, 15).unwrap();
        assert_eq!(heap.into_sorted_vec(&mut token), control.into_sorted_vec(&mut token));
    });
}

#[test]
fn test_failed_pop_keeps_minimum() {
    GhostToken::new(|mut token| {
        let order = Budgeted::unlimited();
        let mut heap = BrandedTreeHeap::with_order(order.clone());
        heap.extend_from(&mut token, (1..=31).rev()).unwrap();
        let before: Vec<u32> = heap.iter(&token).copied().collect();

        order.limit(4);
        assert_eq!(heap.pop(&mut token), Err(ComparisonFailed));
        order.lift();

        assert!(heap.is_well_formed());
        assert_eq!(heap.peek(&token), Some(&1));
        assert_eq!(heap.iter(&token).copied().collect::<Vec<_>>(), before);
        assert_eq!(heap.into_sorted_vec(&mut token), Ok((1..=31).collect()));
    });
}

#[test]
fn test_extend_from_stops_at_first_failure() {
    GhostToken::new(|mut token| {
        let refuse_zero = |a: &i64, b: &i64| {
            if *a == 0 || *b == 0 {
                Err(ComparisonFailed)
            } else {
                Ok(a < b)
            }
        };
        let mut heap = BrandedTreeHeap::with_order(refuse_zero);
        assert_eq!(heap.extend_from(&mut token, [3, 1, 0, 2]), Err(ComparisonFailed));
        assert_eq!(heap.len(), 2);
        assert_eq!(heap.into_sorted_vec(&mut token), Ok(vec![1, 3]));
    });
}

#[test]
fn test_custom_order_max_heap() {
    GhostToken::new(|mut token| {
        let mut heap = BrandedTreeHeap::with_order(LessThan(|a: &String, b: &String| a > b));
        for word in ["pear", "apple", "quince", "fig"] {
            heap.push(&mut token, word.to_string()).unwrap();
        }
        assert_eq!(heap.peek(&token).map(String::as_str), Some("quince"));
        let sorted = heap.into_sorted_vec(&mut token).unwrap();
        assert_eq!(sorted, vec!["quince", "pear", "fig", "apple"]);
    });
}

#[test]
fn test_duplicates_and_copies_are_independent() {
    GhostToken::new(|mut token| {
        let mut original = BrandedTreeHeap::new();
        original.extend_from(&mut token, [2, 2, 1, 1, 3, 3]).unwrap();
        let mut copy = original.clone();
        copy.clear(&mut token);
        copy.push(&mut token, 9).unwrap();

        assert_eq!(original.len(), 6);
        assert_eq!(copy.len(), 1);
        assert_eq!(original.into_sorted_vec(&mut token), Ok(vec![1, 1, 2, 2, 3, 3]));
    });
}

#[test]
fn test_serde_round_trip_through_json() {
    GhostToken::new(|mut token| {
        let mut heap = BrandedTreeHeap::new();
        heap.extend_from(&mut token, ["delta", "alpha", "charlie", "bravo"].map(String::from))
            .unwrap();
        let json = serde_json::to_value(&heap).unwrap();
        assert_eq!(json[0], "alpha");
        assert_eq!(json.as_array().map(Vec::len), Some(4));

        let restored: BrandedTreeHeap<'_, String> = serde_json::from_value(json).unwrap();
        assert_eq!(
            restored.into_sorted_vec(&mut token).unwrap(),
            vec!["alpha", "bravo", "charlie", "delta"]
        );
    });
}
