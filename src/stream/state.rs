use std::fmt;

/// Lifecycle of one subscription session.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    Connecting,
    Subscribed,
    Draining,
    Closed,
    Failed,
}

/// Inputs that move a session between states.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    Start,
    SubscribeAcked,
    EndOfInput,
    Drained,
    TransportClosed,
    ShutdownRequested,
    /// Connect failure, rejected subscription write or stream error.
    Fault,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Closed | Self::Failed)
    }

    /// Next state for `event`, or `None` when the event does not apply.
    ///
    /// Terminal states accept nothing, so whichever of end-of-input and
    /// transport close arrives second is a no-op.
    pub fn on(self, event: SessionEvent) -> Option<Self> {
        use SessionEvent as E;
        use SessionState as S;

        match (self, event) {
            (S::Closed | S::Failed, _) => None,
            (_, E::Fault) => Some(S::Failed),
            (S::Idle, E::Start) => Some(S::Connecting),
            (S::Connecting, E::SubscribeAcked) => Some(S::Subscribed),
            (S::Subscribed, E::EndOfInput | E::ShutdownRequested) => Some(S::Draining),
            (S::Subscribed, E::TransportClosed) => Some(S::Closed),
            (S::Draining, E::Drained) => Some(S::Closed),
            _ => None,
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Connecting => "connecting",
            Self::Subscribed => "subscribed",
            Self::Draining => "draining",
            Self::Closed => "closed",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}
