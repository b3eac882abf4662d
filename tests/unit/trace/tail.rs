use super::*;

fn entry(x: i64) -> TailEntry {
    TailEntry {
        at: Vector::new(x, 1),
        from: None,
    }
}

#[test]
fn length_is_bounded_by_capacity() {
    let mut ring = TailRing::with_capacity(10);
    for x in 0..37 {
        ring.push(entry(x));
        assert!(ring.len() <= 10);
        assert_eq!(ring.newest(), Some(&entry(x)));
    }
    assert_eq!(ring.len(), 10);
    assert_eq!(ring.capacity(), 10);
}

#[test]
fn iteration_is_newest_first_and_evicts_oldest() {
    let mut ring = TailRing::with_capacity(3);
    for x in 1..=5 {
        ring.push(entry(x));
    }
    let xs: Vec<i64> = ring.iter_newest_first().map(|e| e.at.x).collect();
    assert_eq!(xs, vec![5, 4, 3]);
}

#[test]
fn zero_capacity_still_holds_latest() {
    let mut ring = TailRing::with_capacity(0);
    ring.push(entry(1));
    ring.push(entry(2));
    assert_eq!(ring.len(), 1);
    assert_eq!(ring.newest().map(|e| e.at.x), Some(2));
}

#[test]
fn clear_keeps_capacity() {
    let mut ring = TailRing::with_capacity(4);
    ring.push(entry(1));
    ring.clear();
    assert!(ring.is_empty());
    assert_eq!(ring.capacity(), 4);
}
