//! Error types for netdrive.

use std::io;
use thiserror::Error;

use crate::driver::DriverState;

/// Main error type for netdrive operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Driver-level errors (state machine, preconditions).
    #[error("driver error: {0}")]
    Driver(#[from] DriverError),

    /// SSH transport-level errors.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Configuration/builder errors.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors surfaced through the driver's callback slot.
#[derive(Error, Debug)]
pub enum DriverError {
    /// Operation requested while the driver was not in the state it requires.
    #[error("driver not ready - current state: {state}")]
    PreconditionViolation {
        state: String,
        operation: &'static str,
    },

    /// An argument to a driver operation violated a precondition (e.g. `commits_back < 1`).
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Internal logic attempted a state move absent from the transition table.
    #[error("invalid transition from {from:?} to {to:?}")]
    InvalidTransition { from: DriverState, to: DriverState },

    /// Commit output matched the vendor's commit-failure predicate; the driver
    /// automatically aborted and rolled back the uncommitted edits.
    #[error("configuration commit failed but was automatically rolled back")]
    CommitFailedRolledBack,

    /// The transport signaled a failure or exit while an operation was in flight.
    #[error("transport disconnected")]
    Disconnected,

    /// A device kind string did not map to a known vendor specialization.
    #[error("unsupported device kind: {kind}")]
    UnsupportedDeviceKind { kind: String },
}

/// Transport layer errors (SSH child-process spawn and I/O).
#[derive(Error, Debug)]
pub enum TransportError {
    /// Failed to spawn the `ssh` (or `sshpass`) child process.
    #[error("failed to spawn ssh process: {0}")]
    Spawn(#[source] io::Error),

    /// The writer task's channel to the transport was gone.
    #[error("write to transport failed, channel closed")]
    WriteFailed,

    /// The child process exited while the session was still live.
    #[error("ssh child process exited, status: {status:?}")]
    ChildExited { status: Option<i32> },

    /// I/O error reading from or writing to the child process's pipes.
    #[error("transport I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Builder validation failures for `DriverConfig` / `TransportConfig`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required field was never set on the builder.
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    /// A field was set but does not satisfy the builder's validation.
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: &'static str, message: String },
}

/// Result type alias using netdrive's `Error`.
pub type Result<T> = std::result::Result<T, Error>;
