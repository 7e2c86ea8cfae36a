//! Verbosity gate for scope transitions.
//!
//! Pure functions mapping a threshold and a depth to one of three renderings. Both
//! directions use the same comparison shifted by one, so an opener and its closer always
//! pick the matching form as long as the threshold did not change in between.

/// How a scope transition is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Decorated opener/closer on its own line.
    Full,
    /// Terse `header...` opener completed inline by the closer.
    Minimal,
    /// Nothing is written.
    Silent,
}

/// Rendering for `up()` entering `new_level`.
///
/// - `verbosity >= new_level` - full
/// - `verbosity == new_level - 1` - minimal
/// - otherwise silent
pub fn on_enter(verbosity: i32, new_level: usize) -> Visibility {
    let threshold = i64::from(verbosity);
    let depth = depth(new_level);
    if threshold >= depth {
        Visibility::Full
    } else if threshold == depth - 1 {
        Visibility::Minimal
    } else {
        Visibility::Silent
    }
}

/// Rendering for `down()` returning to `new_level`.
///
/// - `verbosity > new_level` - full
/// - `verbosity == new_level` - inline completion
/// - otherwise silent
pub fn on_exit(verbosity: i32, new_level: usize) -> Visibility {
    let threshold = i64::from(verbosity);
    let depth = depth(new_level);
    if threshold > depth {
        Visibility::Full
    } else if threshold == depth {
        Visibility::Minimal
    } else {
        Visibility::Silent
    }
}

/// Whether plain output at `level` is shown.
pub fn shows_level(verbosity: i32, level: usize) -> bool {
    i64::from(verbosity) >= depth(level)
}

fn depth(level: usize) -> i64 {
    i64::try_from(level).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_table_for_threshold_one() {
        assert_eq!(on_enter(1, 1), Visibility::Full);
        assert_eq!(on_enter(1, 2), Visibility::Minimal);
        assert_eq!(on_enter(1, 3), Visibility::Silent);
    }

    #[test]
    fn exit_mirrors_enter() {
        for verbosity in -2..6 {
            for level in 1..8usize {
                assert_eq!(
                    on_enter(verbosity, level),
                    on_exit(verbosity, level - 1),
                    "verbosity {verbosity}, level {level}"
                );
            }
        }
    }

    #[test]
    fn negative_threshold_hides_root_output() {
        assert!(!shows_level(-1, 0));
        assert_eq!(on_enter(-1, 1), Visibility::Silent);
        assert!(shows_level(0, 0));
    }

    #[test]
    fn huge_levels_do_not_overflow() {
        assert_eq!(on_enter(i32::MAX, usize::MAX), Visibility::Silent);
        assert!(!shows_level(i32::MAX, usize::MAX));
    }
}
