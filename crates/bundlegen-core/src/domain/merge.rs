//! Marker-based line insertion.
//!
//! [`insert_before_marker`] ensures a given line appears exactly once in a
//! text buffer, positioned immediately before the first occurrence of a
//! marker line. Lines are compared by trimmed equality; everything else is
//! copied through byte-for-byte, terminators included. Applying the same
//! insertion twice yields the same buffer as applying it once.
//!
//! The function is pure; reading and rewriting the target file is the
//! adapter's job (see `Filesystem::locked_rewrite`), so every property of
//! the merge can be tested without touching a filesystem.

/// Result of one merge pass over a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The line was inserted before the first marker occurrence.
    Inserted,
    /// A trimmed-equal copy of the line was already present; the buffer is
    /// unchanged.
    AlreadyPresent,
    /// The marker never occurred and the line was not present; the buffer is
    /// unchanged. Callers decide whether this is an error.
    MarkerNotFound,
}

/// Insert `insert_line` immediately before the first line that trims equal
/// to `marker`, unless a line trimming equal to `insert_line` is seen first.
///
/// `insert_line` must carry its own terminator, since it is spliced into the
/// output verbatim. Only the first marker occurrence is affected; the
/// relative order of all pre-existing lines is preserved.
pub fn insert_before_marker(
    content: &str,
    marker: &str,
    insert_line: &str,
) -> (String, InsertOutcome) {
    let marker = marker.trim();
    let wanted = insert_line.trim();

    let mut out = String::with_capacity(content.len() + insert_line.len());
    let mut outcome = InsertOutcome::MarkerNotFound;

    for line in content.split_inclusive('\n') {
        let settled = outcome != InsertOutcome::MarkerNotFound;
        if !settled && line.trim() == wanted {
            // An existing copy of the insert line. Stop looking for the
            // marker, but still copy this line through.
            outcome = InsertOutcome::AlreadyPresent;
            out.push_str(line);
        } else if !settled && line.trim() == marker {
            out.push_str(insert_line);
            out.push_str(line);
            outcome = InsertOutcome::Inserted;
        } else {
            out.push_str(line);
        }
    }

    (out, outcome)
}

// ── tests ─────────────────────────────────────────────────────────────────────
