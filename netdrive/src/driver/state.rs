//! The driver's state set and its transition table.

/// A live session's position in the driver's state machine.
///
/// See the transition table in [`is_valid_transition`] for the allowed moves
/// between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverState {
    Initializing,
    Ready,
    ExecutingCommand,
    EnteringConfig,
    ConfigMode,
    ApplyingConfig,
    Committing,
    AbortingConfig,
    RollingBack,
    Error,
    Disconnected,
}

impl DriverState {
    /// Lowercase, snake_case name used by `get_state()` and in error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            DriverState::Initializing => "initializing",
            DriverState::Ready => "ready",
            DriverState::ExecutingCommand => "executing_command",
            DriverState::EnteringConfig => "entering_config",
            DriverState::ConfigMode => "config_mode",
            DriverState::ApplyingConfig => "applying_config",
            DriverState::Committing => "committing",
            DriverState::AbortingConfig => "aborting_config",
            DriverState::RollingBack => "rolling_back",
            DriverState::Error => "error",
            DriverState::Disconnected => "disconnected",
        }
    }

    /// Whether `session_log` accumulates while the driver is in this state.
    pub fn is_multistep(self) -> bool {
        matches!(
            self,
            DriverState::EnteringConfig
                | DriverState::ConfigMode
                | DriverState::ApplyingConfig
                | DriverState::Committing
                | DriverState::AbortingConfig
                | DriverState::RollingBack
        )
    }
}

impl std::fmt::Display for DriverState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether moving from `from` to `to` is a member of the transition table.
///
/// A pair not listed here is invalid; the caller is expected to force a move
/// to [`DriverState::Error`] instead.
pub fn is_valid_transition(from: DriverState, to: DriverState) -> bool {
    use DriverState::*;
    matches!(
        (from, to),
        (Initializing, Ready) | (Initializing, Error) | (Initializing, Disconnected)
            | (Ready, ExecutingCommand)
            | (Ready, EnteringConfig)
            | (Ready, RollingBack)
            | (Ready, Error)
            | (Ready, Disconnected)
            | (ExecutingCommand, Ready)
            | (ExecutingCommand, Error)
            | (ExecutingCommand, Disconnected)
            | (EnteringConfig, ConfigMode)
            | (EnteringConfig, Error)
            | (EnteringConfig, Disconnected)
            | (ConfigMode, ApplyingConfig)
            | (ConfigMode, AbortingConfig)
            | (ConfigMode, Committing)
            | (ConfigMode, Ready)
            | (ConfigMode, Error)
            | (ConfigMode, Disconnected)
            | (ApplyingConfig, Committing)
            | (ApplyingConfig, Error)
            | (ApplyingConfig, Disconnected)
            | (Committing, Ready)
            | (Committing, AbortingConfig)
            | (Committing, Error)
            | (Committing, Disconnected)
            | (AbortingConfig, Ready)
            | (AbortingConfig, Error)
            | (AbortingConfig, Disconnected)
            | (RollingBack, Ready)
            | (RollingBack, Error)
            | (RollingBack, Disconnected)
            | (Error, Ready)
            | (Error, Disconnected)
            | (Disconnected, Initializing)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: &[DriverState] = &[
        DriverState::Initializing,
        DriverState::Ready,
        DriverState::ExecutingCommand,
        DriverState::EnteringConfig,
        DriverState::ConfigMode,
        DriverState::ApplyingConfig,
        DriverState::Committing,
        DriverState::AbortingConfig,
        DriverState::RollingBack,
        DriverState::Error,
        DriverState::Disconnected,
    ];

    #[test]
    fn transition_table_matches_spec() {
        let allowed: &[(DriverState, DriverState)] = &[
            (DriverState::Initializing, DriverState::Ready),
            (DriverState::Initializing, DriverState::Error),
            (DriverState::Initializing, DriverState::Disconnected),
            (DriverState::Ready, DriverState::ExecutingCommand),
            (DriverState::Ready, DriverState::EnteringConfig),
            (DriverState::Ready, DriverState::RollingBack),
            (DriverState::Ready, DriverState::Error),
            (DriverState::Ready, DriverState::Disconnected),
            (DriverState::ExecutingCommand, DriverState::Ready),
            (DriverState::ExecutingCommand, DriverState::Error),
            (DriverState::ExecutingCommand, DriverState::Disconnected),
            (DriverState::EnteringConfig, DriverState::ConfigMode),
            (DriverState::EnteringConfig, DriverState::Error),
            (DriverState::EnteringConfig, DriverState::Disconnected),
            (DriverState::ConfigMode, DriverState::ApplyingConfig),
            (DriverState::ConfigMode, DriverState::AbortingConfig),
            (DriverState::ConfigMode, DriverState::Committing),
            (DriverState::ConfigMode, DriverState::Ready),
            (DriverState::ConfigMode, DriverState::Error),
            (DriverState::ConfigMode, DriverState::Disconnected),
            (DriverState::ApplyingConfig, DriverState::Committing),
            (DriverState::ApplyingConfig, DriverState::Error),
            (DriverState::ApplyingConfig, DriverState::Disconnected),
            (DriverState::Committing, DriverState::Ready),
            (DriverState::Committing, DriverState::AbortingConfig),
            (DriverState::Committing, DriverState::Error),
            (DriverState::Committing, DriverState::Disconnected),
            (DriverState::AbortingConfig, DriverState::Ready),
            (DriverState::AbortingConfig, DriverState::Error),
            (DriverState::AbortingConfig, DriverState::Disconnected),
            (DriverState::RollingBack, DriverState::Ready),
            (DriverState::RollingBack, DriverState::Error),
            (DriverState::RollingBack, DriverState::Disconnected),
            (DriverState::Error, DriverState::Ready),
            (DriverState::Error, DriverState::Disconnected),
            (DriverState::Disconnected, DriverState::Initializing),
        ];

        for &from in ALL {
            for &to in ALL {
                let expected = allowed.contains(&(from, to));
                assert_eq!(
                    is_valid_transition(from, to),
                    expected,
                    "mismatch for {from:?} -> {to:?}"
                );
            }
        }
    }
}
