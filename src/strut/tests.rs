//! Unit tests for the strut registry
//!
//! Covers property parsing for both formats, the edge overwrite order,
//! and the one-entry-per-client invariant.

use super::*;
use crate::display::RecordingDisplay;

const ROOT: (i32, i32) = (1024, 768);

#[test]
fn test_basic_top_strut() {
    let mut registry = StrutRegistry::new();
    let rect = registry.update_from_values(1, StrutAtom::Basic, &[0, 0, 30, 0], ROOT);

    assert_eq!(rect, Some(Rectangle::new(0, 0, 1024, 30)));
    assert_eq!(registry.get(1), Some(Rectangle::new(0, 0, 1024, 30)));
}

#[test]
fn test_basic_edges_anchor_to_root() {
    let left = StrutProperty::Basic([40, 0, 0, 0]).rectangle(ROOT);
    assert_eq!(left, Rectangle::new(0, 0, 40, 768));

    let right = StrutProperty::Basic([0, 40, 0, 0]).rectangle(ROOT);
    assert_eq!(right, Rectangle::new(984, 0, 40, 768));

    let bottom = StrutProperty::Basic([0, 0, 0, 28]).rectangle(ROOT);
    assert_eq!(bottom, Rectangle::new(0, 740, 1024, 28));
}

#[test]
fn test_later_edge_overwrites_earlier() {
    // Left and bottom both reserved: bottom comes last and wins
    let rect = StrutProperty::Basic([40, 0, 0, 28]).rectangle(ROOT);
    assert_eq!(rect, Rectangle::new(0, 740, 1024, 28));

    // Left and top: top wins
    let rect = StrutProperty::Basic([40, 0, 30, 0]).rectangle(ROOT);
    assert_eq!(rect, Rectangle::new(0, 0, 1024, 30));
}

#[test]
fn test_partial_top_strut_spans_range() {
    let values = [0, 0, 24, 0, 0, 0, 0, 0, 100, 499, 0, 0];
    let rect = StrutProperty::parse(StrutAtom::Partial, &values)
        .map(|p| p.rectangle(ROOT));
    assert_eq!(rect, Some(Rectangle::new(100, 0, 400, 24)));
}

#[test]
fn test_partial_side_struts() {
    let left = StrutProperty::Partial([32, 0, 0, 0, 50, 349, 0, 0, 0, 0, 0, 0]).rectangle(ROOT);
    assert_eq!(left, Rectangle::new(0, 50, 32, 300));

    let right = StrutProperty::Partial([0, 32, 0, 0, 0, 0, 0, 767, 0, 0, 0, 0]).rectangle(ROOT);
    assert_eq!(right, Rectangle::new(992, 0, 32, 768));

    let bottom =
        StrutProperty::Partial([0, 0, 0, 20, 0, 0, 0, 0, 0, 0, 0, 511]).rectangle(ROOT);
    assert_eq!(bottom, Rectangle::new(0, 748, 512, 20));
}

#[test]
fn test_wrong_length_is_no_reservation() {
    assert!(StrutProperty::parse(StrutAtom::Basic, &[0, 0, 30]).is_none());
    assert!(StrutProperty::parse(StrutAtom::Partial, &[0, 0, 30, 0]).is_none());

    let mut registry = StrutRegistry::new();
    assert!(registry
        .update_from_values(1, StrutAtom::Basic, &[0, 0, 30, 0, 0], ROOT)
        .is_none());
    assert!(registry.is_empty());
}

#[test]
fn test_reread_replaces_previous_entry() {
    let mut registry = StrutRegistry::new();
    registry.update_from_values(1, StrutAtom::Basic, &[0, 0, 30, 0], ROOT);
    registry.update_from_values(1, StrutAtom::Basic, &[0, 0, 0, 40], ROOT);

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get(1), Some(Rectangle::new(0, 728, 1024, 40)));
}

#[test]
fn test_reread_without_property_clears_entry() {
    let mut registry = StrutRegistry::new();
    registry.update_from_values(1, StrutAtom::Basic, &[0, 0, 30, 0], ROOT);
    assert!(registry.update(1, None, ROOT).is_none());
    assert!(registry.get(1).is_none());
    assert!(registry.is_empty());
}

#[test]
fn test_iteration_is_most_recent_first() {
    let mut registry = StrutRegistry::new();
    registry.update_from_values(1, StrutAtom::Basic, &[0, 0, 30, 0], ROOT);
    registry.update_from_values(2, StrutAtom::Basic, &[30, 0, 0, 0], ROOT);
    registry.update_from_values(3, StrutAtom::Basic, &[0, 30, 0, 0], ROOT);

    let owners: Vec<ClientId> = registry.iter().map(|(owner, _)| owner).collect();
    assert_eq!(owners, vec![3, 2, 1]);

    // Re-reading moves the client to the head
    registry.update_from_values(1, StrutAtom::Basic, &[0, 0, 20, 0], ROOT);
    let owners: Vec<ClientId> = registry.iter().map(|(owner, _)| owner).collect();
    assert_eq!(owners, vec![1, 3, 2]);
}

#[test]
fn test_remove_relinks_neighbours() {
    let mut registry = StrutRegistry::new();
    for owner in 1..=3 {
        registry.update_from_values(owner, StrutAtom::Basic, &[0, 0, 10, 0], ROOT);
    }

    assert!(registry.remove(2));
    assert!(!registry.remove(2));

    let owners: Vec<ClientId> = registry.iter().map(|(owner, _)| owner).collect();
    assert_eq!(owners, vec![3, 1]);

    registry.clear();
    assert!(registry.is_empty());
    assert_eq!(registry.iter().count(), 0);
}

#[test]
fn test_read_prefers_partial() {
    let mut display = RecordingDisplay::new();
    display.set_property(5, StrutAtom::Basic, vec![0, 0, 30, 0]);
    display.set_property(
        5,
        StrutAtom::Partial,
        vec![0, 0, 24, 0, 0, 0, 0, 0, 0, 511, 0, 0],
    );

    let mut registry = StrutRegistry::new();
    let rect = registry.read(5, &mut display, ROOT);
    assert_eq!(rect, Some(Rectangle::new(0, 0, 512, 24)));
}

#[test]
fn test_read_falls_back_to_basic() {
    let mut display = RecordingDisplay::new();
    display.set_property(5, StrutAtom::Basic, vec![0, 0, 30, 0]);
    // Malformed partial property is ignored
    display.set_property(5, StrutAtom::Partial, vec![0, 0, 24]);

    let mut registry = StrutRegistry::new();
    let rect = registry.read(5, &mut display, ROOT);
    assert_eq!(rect, Some(Rectangle::new(0, 0, 1024, 30)));
}

#[test]
fn test_read_without_properties_removes_entry() {
    let mut display = RecordingDisplay::new();
    let mut registry = StrutRegistry::new();
    registry.update_from_values(5, StrutAtom::Basic, &[0, 0, 30, 0], ROOT);

    assert!(registry.read(5, &mut display, ROOT).is_none());
    assert!(registry.is_empty());
}

#[test]
fn test_cardinal_range_values_stay_inside_root() {
    // 0xFFFFFFFF is a legal CARDINAL
    let max = i64::from(u32::MAX);

    let top = StrutProperty::Partial([0, 0, 30, 0, 0, 0, 0, 0, 100, max, 0, 0]).rectangle(ROOT);
    assert_eq!(top, Rectangle::new(100, 0, 924, 30));

    let left = StrutProperty::Partial([max, 0, 0, 0, max, max, 0, 0, 0, 0, 0, 0]).rectangle(ROOT);
    assert_eq!(left, Rectangle::new(0, 767, 1024, 1));

    let bottom = StrutProperty::Basic([0, 0, 0, max]).rectangle(ROOT);
    assert_eq!(bottom, Rectangle::new(0, 0, 1024, 768));
}
