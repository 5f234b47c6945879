#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

// =============================================================
// add / get / all
// =============================================================

#[test]
fn new_store_is_empty() {
    let store = WaypointStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert!(store.all().is_empty());
}

#[test]
fn add_then_all_returns_single_waypoint() {
    let mut store = WaypointStore::new();
    let wp = store.add(0.5, "Mid", Category::Milestone);
    assert_eq!(store.all().len(), 1);
    assert_eq!(store.all()[0].t, 0.5);
    assert_eq!(store.all()[0].label, "Mid");
    assert_eq!(store.get(&wp.id), Some(&wp));
}

#[test]
fn add_assigns_unique_ids() {
    let mut store = WaypointStore::new();
    let a = store.add(0.1, "a", Category::Checkpoint);
    let b = store.add(0.1, "b", Category::Checkpoint);
    assert_ne!(a.id, b.id);
}

#[test]
fn add_clamps_parameter() {
    let mut store = WaypointStore::new();
    assert_eq!(store.add(-0.5, "low", Category::Note).t, 0.0);
    assert_eq!(store.add(4.0, "high", Category::Note).t, 1.0);
    assert_eq!(store.add(f64::NAN, "nan", Category::Note).t, 0.0);
}

#[test]
fn all_preserves_insertion_order() {
    let mut store = WaypointStore::new();
    store.add(0.9, "late", Category::Checkpoint);
    store.add(0.1, "early", Category::Checkpoint);
    let labels: Vec<_> = store.all().iter().map(|w| w.label.as_str()).collect();
    assert_eq!(labels, vec!["late", "early"]);
}

#[test]
fn get_unknown_is_none() {
    assert!(WaypointStore::new().get(&Uuid::new_v4()).is_none());
}

// =============================================================
// move_to / remove
// =============================================================

#[test]
fn move_to_updates_only_t() {
    let mut store = WaypointStore::new();
    let wp = store.add(0.5, "Mid", Category::Reward);
    assert_eq!(store.move_to(&wp.id, 0.8), Ok(()));
    let moved = store.get(&wp.id).expect("waypoint should exist");
    assert_eq!(moved.t, 0.8);
    assert_eq!(moved.label, "Mid");
    assert_eq!(moved.category, Category::Reward);
}

#[test]
fn move_to_clamps() {
    let mut store = WaypointStore::new();
    let wp = store.add(0.5, "Mid", Category::Checkpoint);
    assert_eq!(store.move_to(&wp.id, 1.7), Ok(()));
    assert_eq!(store.get(&wp.id).map(|w| w.t), Some(1.0));
}

#[test]
fn move_to_unknown_is_not_found() {
    let mut store = WaypointStore::new();
    let id = Uuid::new_v4();
    assert_eq!(store.move_to(&id, 0.3), Err(WaypointError::NotFound(id)));
}

#[test]
fn remove_returns_waypoint_and_empties_store() {
    let mut store = WaypointStore::new();
    let wp = store.add(0.5, "Mid", Category::Checkpoint);
    assert_eq!(store.remove(&wp.id), Ok(wp));
    assert!(store.all().is_empty());
}

#[test]
fn remove_twice_is_not_found() {
    let mut store = WaypointStore::new();
    let wp = store.add(0.5, "Mid", Category::Checkpoint);
    assert!(store.remove(&wp.id).is_ok());
    assert_eq!(store.remove(&wp.id), Err(WaypointError::NotFound(wp.id)));
}

#[test]
fn not_found_error_message_names_id() {
    let id = Uuid::nil();
    assert_eq!(WaypointError::NotFound(id).to_string(), format!("waypoint not found: {id}"));
}

// =============================================================
// insert / load
// =============================================================

#[test]
fn insert_replaces_same_id_in_place() {
    let mut store = WaypointStore::new();
    let first = store.add(0.2, "first", Category::Checkpoint);
    store.add(0.4, "second", Category::Checkpoint);
    let mut edited = first.clone();
    edited.label = "renamed".into();
    store.insert(edited);
    assert_eq!(store.len(), 2);
    assert_eq!(store.all()[0].label, "renamed");
}

#[test]
fn load_replaces_contents() {
    let mut store = WaypointStore::new();
    store.add(0.2, "old", Category::Checkpoint);
    store.load(vec![Waypoint::new(0.3, "a", Category::Note), Waypoint::new(0.6, "b", Category::Note)]);
    let labels: Vec<_> = store.all().iter().map(|w| w.label.as_str()).collect();
    assert_eq!(labels, vec!["a", "b"]);
}

#[test]
fn clear_removes_everything() {
    let mut store = WaypointStore::new();
    store.add(0.2, "a", Category::Checkpoint);
    store.clear();
    assert!(store.is_empty());
}

// =============================================================
// trail order
// =============================================================

#[test]
fn by_t_sorts_along_trail() {
    let mut store = WaypointStore::new();
    store.add(0.7, "c", Category::Checkpoint);
    store.add(0.1, "a", Category::Checkpoint);
    store.add(0.4, "b", Category::Checkpoint);
    let labels: Vec<_> = store.by_t().iter().map(|w| w.label.as_str()).collect();
    assert_eq!(labels, vec!["a", "b", "c"]);
}

#[test]
fn by_t_ties_keep_insertion_order() {
    let mut store = WaypointStore::new();
    store.add(0.5, "x", Category::Checkpoint);
    store.add(0.5, "y", Category::Checkpoint);
    let labels: Vec<_> = store.by_t().iter().map(|w| w.label.as_str()).collect();
    assert_eq!(labels, vec!["x", "y"]);
}

#[test]
fn previous_of_follows_t_order() {
    let mut store = WaypointStore::new();
    let c = store.add(0.9, "c", Category::Checkpoint);
    let a = store.add(0.1, "a", Category::Checkpoint);
    let b = store.add(0.5, "b", Category::Checkpoint);
    assert_eq!(store.previous_of(&c.id).map(|w| w.id), Some(b.id));
    assert_eq!(store.previous_of(&b.id).map(|w| w.id), Some(a.id));
    assert!(store.previous_of(&a.id).is_none());
    assert!(store.previous_of(&Uuid::new_v4()).is_none());
}

// =============================================================
// serde
// =============================================================

#[test]
fn waypoint_deserializes_with_defaults() {
    let id = Uuid::new_v4();
    let wp: Waypoint =
        serde_json::from_value(json!({ "id": id, "t": 0.25, "label": "Camp" })).expect("waypoint should parse");
    assert_eq!(wp.id, id);
    assert_eq!(wp.category, Category::Checkpoint);
    assert!(wp.metadata.is_null());
}

#[test]
fn category_serializes_lowercase() {
    assert_eq!(serde_json::to_value(Category::Milestone).expect("serialize"), json!("milestone"));
}
