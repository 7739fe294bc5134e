use super::types::GameSnapshot;

/// Receives the engine state after every committed transition.
pub trait StateObserver {
    fn on_state_changed(&mut self, snapshot: &GameSnapshot);
}

impl<F> StateObserver for F
where
    F: FnMut(&GameSnapshot),
{
    fn on_state_changed(&mut self, snapshot: &GameSnapshot) {
        self(snapshot)
    }
}
