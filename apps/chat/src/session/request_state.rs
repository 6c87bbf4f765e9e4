/// Lifecycle of the single submission a session may have in flight.
///
/// `Done` and `Failed` describe the last submission and accept a new `Begin`,
/// so a settled session is never stuck.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    Extracting,
    Sending,
    Done,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestEvent {
    Begin,
    Extracted,
    Succeeded,
    Failed,
    Reset,
}

impl RequestState {
    pub fn is_processing(self) -> bool {
        matches!(self, RequestState::Extracting | RequestState::Sending)
    }

    /// Transition table. `None` means the event is not valid in this state.
    pub fn next(self, event: RequestEvent) -> Option<RequestState> {
        use RequestEvent as E;
        use RequestState as S;

        match (self, event) {
            (S::Idle | S::Done | S::Failed, E::Begin) => Some(S::Extracting),
            (S::Extracting, E::Extracted) => Some(S::Sending),
            (S::Sending, E::Succeeded) => Some(S::Done),
            (S::Extracting | S::Sending, E::Failed) => Some(S::Failed),
            (S::Idle | S::Done | S::Failed, E::Reset) => Some(S::Idle),
            _ => None,
        }
    }
}
