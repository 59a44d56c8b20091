//! Command-script test vectors.
//!
//! Each vector is a script in the interpreter's line protocol together
//! with the exact output it must produce. They are shared by the CLI tests
//! and can be exported as JSON for other front ends.

use serde::{Deserialize, Serialize};

/// A script and its expected output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Commands, one per line.
    pub script: String,
    /// Expected output, one reply per line.
    pub expected: String,
}

impl ScriptVector {
    fn new(id: &str, description: &str, script: &[&str], expected: &[&str]) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            script: lines(script),
            expected: lines(expected),
        }
    }
}

fn lines(lines: &[&str]) -> String {
    lines.iter().map(|l| format!("{l}\n")).collect()
}

/// Script vectors covering basic and transactional behaviour.
pub fn script_vectors() -> Vec<ScriptVector> {
    vec![
        ScriptVector::new(
            "overwrite",
            "A later set replaces the value",
            &["SET A 2", "GET A", "SET A 3", "GET A", "END"],
            &["2", "3"],
        ),
        ScriptVector::new(
            "delete_absent",
            "Deleting an absent key is not an error",
            &["SET A 2", "DELETE A", "DELETE B", "GET A", "END"],
            &["NULL"],
        ),
        ScriptVector::new(
            "missing_key",
            "A key never set is not found",
            &["SET A 2", "GET A", "GET B", "END"],
            &["2", "NULL"],
        ),
        ScriptVector::new(
            "commit_visible",
            "Committed writes stay visible at the root",
            &["COMMIT", "BEGIN", "SET A 1", "GET A", "COMMIT", "GET A", "END"],
            &["NO TRANSACTION", "1", "1"],
        ),
        ScriptVector::new(
            "rollback_isolated",
            "Rolled back writes vanish",
            &["ROLLBACK", "BEGIN", "SET A 1", "GET A", "ROLLBACK", "GET A", "END"],
            &["NO TRANSACTION", "1", "NULL"],
        ),
        ScriptVector::new(
            "nested_delete",
            "A delete committed from two levels deep reaches the root",
            &[
                "SET k 1", "BEGIN", "BEGIN", "DELETE k", "COMMIT", "GET k", "COMMIT",
                "GET k", "ROLLBACK", "COMMIT", "GET k", "END",
            ],
            &["NULL", "NULL", "NO TRANSACTION", "NO TRANSACTION", "NULL"],
        ),
        ScriptVector::new(
            "delete_then_set",
            "A set after a delete in the same scope wins",
            &["SET a 1", "BEGIN", "DELETE a", "SET a 2", "GET a", "COMMIT", "GET a", "END"],
            &["2", "2"],
        ),
        ScriptVector::new(
            "count_shadowed",
            "Counts resolve each key once through every scope",
            &[
                "SET a 10", "SET b 10", "BEGIN", "SET a 10", "COUNT 10", "SET b 20",
                "COUNT 10", "DELETE a", "COUNT 10", "ROLLBACK", "COUNT 10", "END",
            ],
            &["2", "1", "0", "2"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn vector_ids_are_unique() {
        let vectors = script_vectors();
        let ids: HashSet<_> = vectors.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids.len(), vectors.len());
    }

    #[test]
    fn vectors_export_as_json() {
        let json = serde_json::to_string(&script_vectors()).unwrap();
        let back: Vec<ScriptVector> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), script_vectors().len());
        assert!(back[0].script.ends_with("END\n"));
    }
}
