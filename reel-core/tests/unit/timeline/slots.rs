use super::*;

#[test]
fn slots_are_sequential_and_disjoint() {
    let mut cur = SlotCursor::new(12, 24, 6);
    let slots = cur.take_slots(3);
    assert_eq!(slots[0], FrameRange::with_len(12, 24));
    assert_eq!(slots[1], FrameRange::with_len(42, 24));
    assert_eq!(slots[2], FrameRange::with_len(72, 24));
    assert_eq!(cur.position(), 102);
    for w in slots.windows(2) {
        assert!(!w[0].overlaps(w[1]));
        assert!(w[0].start < w[1].start);
    }
}

#[test]
fn zero_gap_slots_touch_without_overlap() {
    let mut cur = SlotCursor::new(0, 5, 0);
    let a = cur.next_slot();
    let b = cur.next_slot();
    assert_eq!(a.end, b.start);
    assert!(!a.overlaps(b));
}

#[test]
fn taking_nothing_leaves_cursor_in_place() {
    let mut cur = SlotCursor::new(7, 5, 1);
    assert!(cur.take_slots(0).is_empty());
    assert_eq!(cur.position(), 7);
}
