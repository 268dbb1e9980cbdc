//! The base driver: a single-threaded, event-driven cooperative actor that
//! owns one device session.

mod buffer;
mod extract;
mod pending;
mod prompt;
mod state;

use std::collections::VecDeque;
use std::mem;

use log::{debug, error, warn};

pub use pending::{CommandCallback, ConfigCallback};
pub use state::DriverState;

use buffer::{SessionBuffer, DEFAULT_SESSION_LOG_CAP};
use pending::PendingOperation;
use state::is_valid_transition;

use crate::error::{DriverError, Error};
use crate::transport::Transport;
use crate::vendor::{DeviceInfo, DeviceKind, VendorSpec};

/// One per live session. Upholds the invariants described in the crate's
/// top-level documentation: at most one operation in flight, callbacks
/// fired exactly once, session state consistent with pending state.
pub struct Driver {
    vendor: VendorSpec,
    transport: Box<dyn Transport>,
    state: DriverState,
    input_buffer: SessionBuffer,
    session_log: SessionBuffer,
    pending: PendingOperation,
}

impl Driver {
    /// Construct a driver in the `INITIALIZING` state. Call [`Driver::initialize`]
    /// before issuing any operation.
    pub fn new(device_kind: DeviceKind, transport: Box<dyn Transport>) -> Self {
        Self {
            vendor: VendorSpec::for_kind(device_kind),
            transport,
            state: DriverState::Initializing,
            input_buffer: SessionBuffer::unbounded(),
            session_log: SessionBuffer::capped(DEFAULT_SESSION_LOG_CAP),
            pending: PendingOperation::Idle,
        }
    }

    /// Emit the vendor's session setup commands and move to `READY`. A
    /// second call from `READY` is rejected here as a precondition violation.
    pub fn initialize(&mut self) -> Result<(), Error> {
        if self.state != DriverState::Initializing {
            return Err(self.precondition_error("initialize"));
        }
        for cmd in self.vendor.init_commands {
            self.send_line(cmd);
        }
        self.transition(DriverState::Ready);
        Ok(())
    }

    /// Pre: `state == READY`.
    pub fn execute_command(&mut self, command: impl Into<String>, callback: CommandCallback) {
        let command = command.into();
        if self.state != DriverState::Ready {
            callback(Some(self.precondition_error("execute_command")), None);
            return;
        }
        self.send_line(&command);
        self.pending = PendingOperation::AwaitingCommand { command, callback };
        self.transition(DriverState::ExecutingCommand);
    }

    /// Pre: `state == READY`.
    pub fn configure_and_commit(&mut self, config_list: Vec<String>, callback: ConfigCallback) {
        if self.state != DriverState::Ready {
            callback(Some(self.precondition_error("configure_and_commit")), String::new());
            return;
        }

        self.session_log.clear();
        let mut phase_queue: VecDeque<String> = self
            .vendor
            .enter_config_commands
            .iter()
            .map(|s| s.to_string())
            .collect();
        let first = phase_queue
            .pop_front()
            .expect("every vendor has at least one enter-config command");

        self.pending = PendingOperation::AwaitingConfig {
            callback,
            user_commands: config_list.into(),
            phase_queue,
        };
        self.send_line(&first);
        self.transition(DriverState::EnteringConfig);
    }

    /// Pre: `state == READY`, `commits_back >= 1`.
    pub fn rollback_configuration(&mut self, commits_back: u32, callback: ConfigCallback) {
        if self.state != DriverState::Ready {
            callback(Some(self.precondition_error("rollback_configuration")), String::new());
            return;
        }
        if commits_back < 1 {
            let err = DriverError::InvalidArgument {
                message: "commits_back must be >= 1".to_string(),
            };
            callback(Some(err.into()), String::new());
            return;
        }

        self.session_log.clear();
        let mut phase_queue: VecDeque<String> =
            self.vendor.rollback_commands(commits_back).into();
        let first = phase_queue
            .pop_front()
            .expect("every vendor has at least one rollback command");

        self.pending = PendingOperation::AwaitingConfig {
            callback,
            user_commands: VecDeque::new(),
            phase_queue,
        };
        self.send_line(&first);
        self.transition(DriverState::RollingBack);
    }

    /// Fed by the transport for each inbound chunk. Tolerates prompts split
    /// across chunk boundaries and multiple prompts coalesced into one chunk.
    pub fn handle_data(&mut self, data: &[u8]) {
        if self.state.is_multistep() {
            self.session_log.extend(data);
        }
        self.input_buffer.extend(data);

        while let Some(boundary) =
            prompt::find_prompt_boundary(self.input_buffer.as_slice(), &self.vendor.prompt_pattern)
        {
            let consumed = self.input_buffer.split_to(boundary);
            self.on_prompt(&consumed);
        }
    }

    /// Signaled by the enclosing client when the transport reports failure
    /// or exit. Collapses any in-flight operation with a disconnection error.
    /// A no-op if already disconnected, since `Disconnected -> Disconnected`
    /// is not itself a listed transition.
    pub fn handle_transport_failure(&mut self) {
        if self.state == DriverState::Disconnected {
            return;
        }
        self.transition(DriverState::Disconnected);
        self.fail_pending(DriverError::Disconnected.into());
    }

    pub fn get_state(&self) -> &'static str {
        self.state.as_str()
    }

    /// The richer enum form of [`Driver::get_state`], for callers (the client
    /// facade) that want to match on state rather than compare strings.
    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == DriverState::Ready
    }

    pub fn get_device_info(&self) -> &DeviceInfo {
        &self.vendor.device_info
    }

    fn precondition_error(&self, operation: &'static str) -> Error {
        DriverError::PreconditionViolation {
            state: self.state.as_str().to_string(),
            operation,
        }
        .into()
    }

    fn send_line(&mut self, command: &str) {
        debug!("sending command: {command}");
        let mut line = String::with_capacity(command.len() + 1);
        line.push_str(command);
        line.push('\n');
        self.transport.send(line.as_bytes());
    }

    /// Force a state move, collapsing to `ERROR` and failing any pending
    /// callback if `to` is not in the transition table for the current state.
    fn transition(&mut self, to: DriverState) {
        let from = self.state;
        if is_valid_transition(from, to) {
            debug!("driver transition {from} -> {to}");
            self.state = to;
            return;
        }

        error!("invalid transition attempted {from} -> {to}");
        self.session_log
            .extend(format!("[invalid-transition {from} -> {to}]\n").as_bytes());
        self.state = DriverState::Error;
        self.fail_pending(DriverError::InvalidTransition { from, to }.into());
    }

    fn fail_pending(&mut self, err: Error) {
        match mem::replace(&mut self.pending, PendingOperation::Idle) {
            PendingOperation::Idle => {}
            PendingOperation::AwaitingCommand { callback, .. } => callback(Some(err), None),
            PendingOperation::AwaitingConfig { callback, .. } => {
                let log = self.session_log.as_str_lossy();
                self.session_log.clear();
                callback(Some(err), log);
            }
        }
    }

    fn fire_config_success(&mut self) {
        let pending = mem::replace(&mut self.pending, PendingOperation::Idle);
        let log = self.session_log.as_str_lossy();
        self.session_log.clear();
        self.transition(DriverState::Ready);
        if let PendingOperation::AwaitingConfig { callback, .. } = pending {
            callback(None, log);
        }
    }

    fn fire_config_rolled_back(&mut self) {
        let pending = mem::replace(&mut self.pending, PendingOperation::Idle);
        let log = self.session_log.as_str_lossy();
        self.session_log.clear();
        self.transition(DriverState::Ready);
        if let PendingOperation::AwaitingConfig { callback, .. } = pending {
            callback(Some(DriverError::CommitFailedRolledBack.into()), log);
        }
    }

    /// Dispatch the prompt-driven step function against the bytes consumed
    /// up to (and including) one detected prompt line.
    fn on_prompt(&mut self, consumed: &[u8]) {
        match self.state {
            DriverState::ExecutingCommand => {
                let pending = mem::replace(&mut self.pending, PendingOperation::Idle);
                if let PendingOperation::AwaitingCommand { command, callback } = pending {
                    let output = extract::extract_output(consumed, &command);
                    self.transition(DriverState::Ready);
                    callback(None, Some(output));
                }
            }

            DriverState::EnteringConfig => {
                if let Some(next) = self.pending.pop_phase_queue() {
                    self.send_line(&next);
                } else {
                    self.transition(DriverState::ConfigMode);
                    if let Some(first_user_command) = self.pending.pop_user_command() {
                        self.send_line(&first_user_command);
                        self.transition(DriverState::ApplyingConfig);
                    } else {
                        self.begin_commit();
                    }
                }
            }

            DriverState::ApplyingConfig => {
                if let Some(next) = self.pending.pop_user_command() {
                    self.send_line(&next);
                } else {
                    self.begin_commit();
                }
            }

            DriverState::Committing => {
                if self.vendor.detect_commit_failure(consumed) {
                    warn!("commit failure detected, running automatic abort sequence");
                    self.begin_abort();
                } else if let Some(next) = self.pending.pop_phase_queue() {
                    self.send_line(&next);
                } else {
                    self.fire_config_success();
                }
            }

            DriverState::AbortingConfig => {
                if let Some(next) = self.pending.pop_phase_queue() {
                    self.send_line(&next);
                } else {
                    self.fire_config_rolled_back();
                }
            }

            DriverState::RollingBack => {
                if let Some(next) = self.pending.pop_phase_queue() {
                    self.send_line(&next);
                } else {
                    self.fire_config_success();
                }
            }

            // All other states: a detected prompt is discarded. The buffer
            // has already been cleared by `split_to` in `handle_data`.
            _ => {}
        }
    }

    fn begin_commit(&mut self) {
        let commands: VecDeque<String> = self
            .vendor
            .commit_commands
            .iter()
            .map(|s| s.to_string())
            .collect();
        self.enter_phase(commands, DriverState::Committing);
    }

    fn begin_abort(&mut self) {
        let commands: VecDeque<String> = self
            .vendor
            .abort_commands
            .iter()
            .map(|s| s.to_string())
            .collect();
        self.enter_phase(commands, DriverState::AbortingConfig);
    }

    fn enter_phase(&mut self, mut commands: VecDeque<String>, to: DriverState) {
        if let Some(first) = commands.pop_front() {
            self.pending.set_phase_queue(commands);
            self.send_line(&first);
        }
        self.transition(to);
    }
}
