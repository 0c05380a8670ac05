use serde::{Deserialize, Serialize};

/// Pending repaint work, ordered by how much the next paint must do.
///
/// Requests coalesce with [`InvalidationState::merge`]; the strongest request
/// wins, so any number of invalidations before a paint collapse into one
/// update-and-render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum InvalidationState {
    #[default]
    Clean,
    NeedsRedraw,
    NeedsDataAndRedraw,
}

impl InvalidationState {
    #[must_use]
    pub const fn for_request(update_data: bool) -> Self {
        if update_data {
            Self::NeedsDataAndRedraw
        } else {
            Self::NeedsRedraw
        }
    }

    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        if self as u8 >= other as u8 {
            self
        } else {
            other
        }
    }

    #[must_use]
    pub const fn is_pending(self) -> bool {
        !matches!(self, Self::Clean)
    }

    #[must_use]
    pub const fn needs_data(self) -> bool {
        matches!(self, Self::NeedsDataAndRedraw)
    }
}

#[cfg(test)]
mod tests {
    use super::InvalidationState;

    #[test]
    fn data_request_dominates_redraw_request() {
        let state = InvalidationState::Clean
            .merge(InvalidationState::for_request(false))
            .merge(InvalidationState::for_request(true))
            .merge(InvalidationState::for_request(false));
        assert_eq!(state, InvalidationState::NeedsDataAndRedraw);
        assert!(state.needs_data());
    }

    #[test]
    fn clean_is_identity_for_merge() {
        for state in [
            InvalidationState::Clean,
            InvalidationState::NeedsRedraw,
            InvalidationState::NeedsDataAndRedraw,
        ] {
            assert_eq!(InvalidationState::Clean.merge(state), state);
            assert_eq!(state.merge(InvalidationState::Clean), state);
        }
        assert!(!InvalidationState::Clean.is_pending());
    }
}
