/// A log of performed actions which can be walked backwards (undo) and forwards again (redo).
#[derive(Debug, Clone)]
pub struct Undo<T> {
    actions: Vec<T>,
    actions_performed: usize,
}

impl<T> Default for Undo<T> {
    fn default() -> Self {
        Self {
            actions: vec![],
            actions_performed: 0,
        }
    }
}

impl<T> Undo<T>
where
    T: PartialEq,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// When an action is performed, record the action in a log so it can later be undone. If it
    /// differs from the action that would be redone next, the redo buffer is discarded.
    pub fn record(&mut self, action: T) {
        debug_assert!(self.actions_performed <= self.actions.len());
        if self.actions.len() <= self.actions_performed {
            self.actions.push(action);
        } else {
            if self.actions[self.actions_performed] != action {
                self.actions.truncate(self.actions_performed + 1);
            }

            self.actions[self.actions_performed] = action;
        }

        self.actions_performed += 1;
    }

    /// Get the most recent action from the log.
    pub fn undo(&mut self) -> Option<&T> {
        if self.actions_performed > 0 {
            self.actions_performed -= 1;
            self.actions.get(self.actions_performed)
        } else {
            None
        }
    }

    /// Return the most recently undone action without marking it as performed. Performing it
    /// again and calling `record` moves past it.
    pub fn next_redo(&self) -> Option<&T> {
        self.actions.get(self.actions_performed)
    }

    /// The actions leading to the current state, oldest first.
    pub fn performed(&self) -> &[T] {
        &self.actions[..self.actions_performed]
    }

    pub fn len(&self) -> usize {
        self.actions_performed
    }

    pub fn is_empty(&self) -> bool {
        self.actions_performed == 0
    }

    /// Forget the redo buffer.
    pub fn discard_redo(&mut self) {
        self.actions.truncate(self.actions_performed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::{Arbitrary, Gen};
    use quickcheck_macros::quickcheck;

    impl<A: Arbitrary + Clone> Arbitrary for Undo<A> {
        fn arbitrary(g: &mut Gen) -> Self {
            let actions = Vec::arbitrary(g);
            let actions_performed = actions.len();
            Undo {
                actions,
                actions_performed,
            }
        }
    }

    #[test]
    fn empty_should_return_none() {
        let mut sut: Undo<i8> = Undo::new();

        assert_eq!(sut.undo(), None);
        assert_eq!(sut.next_redo(), None);
        assert!(sut.is_empty());
    }

    #[test]
    fn different_action_discards_redo() {
        let mut sut = Undo::new();
        sut.record(1);
        sut.record(2);
        sut.record(3);
        sut.undo();
        sut.undo();
        sut.record(5);
        assert_eq!(sut.performed(), &[1, 5]);
        assert_eq!(sut.next_redo(), None);
    }

    #[test]
    fn same_action_keeps_redo() {
        let mut sut = Undo::new();
        sut.record(1);
        sut.record(2);
        sut.undo();
        sut.undo();
        sut.record(1);
        assert_eq!(sut.next_redo(), Some(&2));
    }

    #[quickcheck]
    fn undo_should_return_most_recent_action(mut sut: Undo<u32>, x: u32) {
        let num_actions = sut.actions_performed;
        sut.record(x);

        assert_eq!(sut.actions_performed, num_actions + 1);
        assert_eq!(sut.undo(), Some(&x));
        assert_eq!(sut.actions_performed, num_actions);
    }

    #[quickcheck]
    fn redo_should_return_most_recently_undone_action(mut sut: Undo<u32>, x: u32) {
        sut.record(x);
        let num_actions = sut.actions_performed;
        sut.undo();

        assert_eq!(sut.next_redo(), Some(&x));
        sut.record(x);
        assert_eq!(sut.actions_performed, num_actions);
    }
}
