use serde::{Deserialize, Serialize};

/// Generation counter of a game instance.
///
/// Every (re)start advances it, and every scheduled callback remembers the
/// epoch it was created under. A callback that fires after the game moved on
/// to a newer epoch is stale and must be discarded.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Epoch(u32);

impl Epoch {
    pub(crate) fn advance(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }

    pub const fn is_current(self, current: Epoch) -> bool {
        self.0 == current.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advancing_invalidates_older_epochs() {
        let mut current = Epoch::default();
        let old = current;
        assert!(old.is_current(current));

        current.advance();
        assert!(!old.is_current(current));
        assert!(current.is_current(current));
    }

    #[test]
    fn advance_wraps_instead_of_overflowing() {
        let mut epoch = Epoch(u32::MAX);
        epoch.advance();
        assert_eq!(epoch, Epoch(0));
    }
}
