use super::*;
use crate::doc::{Color, Stitch};
use crate::geom::Point;

fn doc_of_len(n: usize) -> Document {
    let mut doc = Document::new();
    for i in 0..n {
        #[allow(clippy::cast_precision_loss)]
        let x = i as f64;
        doc.push(Stitch::line(Point::new(x, 0.0), Point::new(x, 10.0), Color::WHITE, true));
    }
    doc
}

#[test]
fn new_history_is_empty() {
    let mut h = History::new();
    assert!(!h.can_undo());
    assert_eq!(h.undo_count(), 0);
    assert_eq!(h.capacity(), 50);
    assert!(h.undo().is_none());
}

#[test]
fn undo_returns_most_recent_first() {
    let mut h = History::new();
    h.save_state(&doc_of_len(1));
    h.save_state(&doc_of_len(2));
    assert_eq!(h.undo().map(|d| d.len()), Some(2));
    assert_eq!(h.undo().map(|d| d.len()), Some(1));
    assert!(h.undo().is_none());
}

#[test]
fn sixty_saves_keep_fifty_and_evict_oldest_ten() {
    let mut h = History::new();
    for n in 0..60 {
        h.save_state(&doc_of_len(n));
    }
    assert_eq!(h.undo_count(), 50);

    let mut last = None;
    while let Some(doc) = h.undo() {
        last = Some(doc.len());
    }
    // Snapshots of length 0..=9 were evicted.
    assert_eq!(last, Some(10));
}

#[test]
fn snapshot_is_independent_of_later_edits() {
    let mut h = History::new();
    let mut doc = doc_of_len(1);
    h.save_state(&doc);
    let Some(id) = doc.iter().next().map(|s| s.id) else {
        panic!("doc has one stitch");
    };
    if let Some(s) = doc.get_mut(&id) {
        s.color = Color::rgb(255, 0, 0);
    }
    let Some(restored) = h.undo() else {
        panic!("expected snapshot");
    };
    assert_eq!(restored.get(&id).map(|s| s.color), Some(Color::WHITE));
}

#[test]
fn clear_drops_everything() {
    let mut h = History::new();
    h.save_state(&doc_of_len(1));
    h.clear();
    assert!(!h.can_undo());
}

#[test]
fn zero_capacity_never_stores() {
    let mut h = History::with_capacity(0);
    h.save_state(&doc_of_len(1));
    assert!(!h.can_undo());
}
