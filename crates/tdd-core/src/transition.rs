use crate::error::{Result, TddError};
use crate::types::Phase;

/// Legal moves of the TDD cycle. Each working phase may repeat itself;
/// GREEN has to pass through REFACTOR before the next RED.
const TRANSITIONS: &[(Phase, &[Phase])] = &[
    (Phase::Planning, &[Phase::Red]),
    (Phase::Red, &[Phase::Red, Phase::Green]),
    (Phase::Green, &[Phase::Green, Phase::Refactor]),
    (Phase::Refactor, &[Phase::Refactor, Phase::Red]),
];

pub fn allowed_targets(current: Phase) -> &'static [Phase] {
    TRANSITIONS
        .iter()
        .find(|(from, _)| *from == current)
        .map(|(_, to)| *to)
        .unwrap_or(&[])
}

/// Comma-separated [`allowed_targets`], for messages.
pub fn allowed_list(current: &Phase) -> String {
    allowed_targets(*current)
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn is_allowed(current: Phase, proposed: Phase) -> bool {
    allowed_targets(current).contains(&proposed)
}

pub fn validate(current: Phase, proposed: Phase) -> Result<()> {
    if is_allowed(current, proposed) {
        Ok(())
    } else {
        Err(TddError::InvalidTransition { current, proposed })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_table_is_exact() {
        let legal = [
            (Phase::Planning, Phase::Red),
            (Phase::Red, Phase::Green),
            (Phase::Red, Phase::Red),
            (Phase::Green, Phase::Refactor),
            (Phase::Green, Phase::Green),
            (Phase::Refactor, Phase::Red),
            (Phase::Refactor, Phase::Refactor),
        ];
        for &from in Phase::all() {
            for &to in Phase::all() {
                let expected = legal.contains(&(from, to));
                assert_eq!(
                    validate(from, to).is_ok(),
                    expected,
                    "{from} -> {to} should be {}",
                    if expected { "legal" } else { "illegal" }
                );
            }
        }
    }

    #[test]
    fn violation_carries_both_phases() {
        match validate(Phase::Red, Phase::Refactor) {
            Err(TddError::InvalidTransition { current, proposed }) => {
                assert_eq!(current, Phase::Red);
                assert_eq!(proposed, Phase::Refactor);
            }
            other => panic!("expected InvalidTransition, got {other:?}"),
        }
    }

    #[test]
    fn green_cannot_jump_to_red() {
        assert!(validate(Phase::Green, Phase::Red).is_err());
    }

    #[test]
    fn nothing_returns_to_planning() {
        for &from in Phase::all() {
            assert!(!is_allowed(from, Phase::Planning));
        }
    }

    #[test]
    fn violation_message_lists_allowed_targets() {
        let err = validate(Phase::Planning, Phase::Green).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("PLANNING"));
        assert!(msg.contains("GREEN"));
        assert!(msg.contains("allowed: RED"));
    }
}
