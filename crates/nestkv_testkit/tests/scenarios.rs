//! End-to-end scenarios against the public store API.

use nestkv_core::{CoreError, Depth, LayeredStore};
use nestkv_testkit::prelude::*;

#[test]
fn overwrite_at_root() {
    with_store(|store| {
        store.set("A", "2");
        assert_eq!(store.get("A"), Some("2"));
        store.set("A", "3");
        assert_eq!(store.get("A"), Some("3"));
    });
}

#[test]
fn delete_present_and_absent_keys() {
    let mut store = store_with(&[("A", "2")]);
    store.delete("A");
    store.delete("B");
    assert_eq!(store.get("A"), None);
    assert_eq!(store.get("B"), None);
}

#[test]
fn unrelated_keys_do_not_create_b() {
    let mut store = store_with(&[("A", "2"), ("C", "B")]);
    assert_eq!(store.get("B"), None);
    store.begin();
    store.set("D", "1");
    store.delete("E");
    assert_eq!(store.get("B"), None);
}

#[test]
fn commit_after_failed_commit() {
    let mut store = LayeredStore::new();
    assert_eq!(store.commit(), Err(CoreError::NoOpenTransaction));
    store.begin();
    store.set("A", "1");
    assert_eq!(store.get("A"), Some("1"));
    store.commit().unwrap();
    assert_eq!(store.get("A"), Some("1"));
}

#[test]
fn rollback_after_failed_rollback() {
    let mut store = LayeredStore::new();
    assert_eq!(store.rollback(), Err(CoreError::NoOpenTransaction));
    store.begin();
    store.set("A", "1");
    assert_eq!(store.get("A"), Some("1"));
    store.rollback().unwrap();
    assert_eq!(store.get("A"), None);
}

#[test]
fn three_level_delete_reaches_root_only_after_last_commit() {
    let mut store = store_at_depth(&[("k", "1")], 3);
    store.delete("k");

    store.commit().unwrap();
    assert_eq!(store.depth(), Depth::new(3));
    assert_eq!(store.get("k"), None);

    store.commit().unwrap();
    assert_eq!(store.depth(), Depth::new(2));
    assert_eq!(store.get("k"), None);
    assert_eq!(store.frames().next().unwrap().value("k"), Some("1"));

    store.commit().unwrap();
    assert_eq!(store.get("k"), None);
    assert!(store.frames().next().unwrap().is_empty());
}

#[test]
fn outer_rollback_revives_key_deleted_in_committed_inner_scope() {
    let mut store = store_at_depth(&[("k", "1")], 2);
    store.delete("k");
    store.commit().unwrap();
    assert_eq!(store.get("k"), None);

    store.rollback().unwrap();
    assert_eq!(store.get("k"), Some("1"));
}

#[test]
fn set_reports_active_scope_value() {
    let mut store = store_with(&[("k", "root")]);
    store.begin();
    assert_eq!(store.set("k", "inner"), None);
    store.begin();
    store.delete("k");
    assert_eq!(store.set("k", "deeper"), None);
    store.commit().unwrap();
    assert_eq!(store.set("k", "again"), Some("deeper".to_string()));
}

#[test]
fn script_vectors_run_on_the_store() {
    // The vectors are written in the interpreter protocol; replay the
    // subset of commands the store understands directly.
    for vector in script_vectors() {
        let mut store = LayeredStore::new();
        let mut out = String::new();
        for line in vector.script.lines() {
            let parts: Vec<&str> = line.split_whitespace().collect();
            match parts.as_slice() {
                ["SET", k, v] => {
                    store.set(*k, *v);
                }
                ["GET", k] => {
                    out.push_str(store.get(k).unwrap_or("NULL"));
                    out.push('\n');
                }
                ["DELETE", k] => store.delete(k),
                ["COUNT", v] => out.push_str(&format!("{}\n", store.count(v))),
                ["BEGIN"] => store.begin(),
                ["COMMIT"] | ["ROLLBACK"] => {
                    let status = if parts[0] == "COMMIT" {
                        store.commit()
                    } else {
                        store.rollback()
                    };
                    if status.is_err() {
                        out.push_str("NO TRANSACTION\n");
                    }
                }
                ["END"] => break,
                other => panic!("unexpected line {other:?} in {}", vector.id),
            }
        }
        assert_eq!(out, vector.expected, "vector {}", vector.id);
    }
}
