//! Overwrite decision for a single planned file.

/// Decide whether `path` may be written.
///
/// A missing target is always written. An existing one is written when
/// `overwrite_allowed` is set, otherwise `ask` is consulted exactly once.
pub fn should_write(
    path: &str,
    exists: bool,
    overwrite_allowed: bool,
    ask: impl FnOnce(&str) -> bool,
) -> bool {
    if !exists || overwrite_allowed {
        return true;
    }
    ask(path)
}
