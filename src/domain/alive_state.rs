use std::fmt;

/// Connectivity reported to the host while an operation runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AliveState {
    #[default]
    Disconnected,
    Connecting,
    Online,
}

impl fmt::Display for AliveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AliveState::Disconnected => "DISCONNECTED",
            AliveState::Connecting => "CONNECTING",
            AliveState::Online => "ONLINE",
        };
        f.write_str(label)
    }
}
