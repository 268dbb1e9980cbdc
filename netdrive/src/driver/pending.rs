//! Single-slot callback state. Modeled as an enum so that "at most one
//! operation in flight" and "command state implies config state" (invariants
//! are enforced by the type rather than by runtime null checks.

use std::collections::VecDeque;

use crate::error::Error;

/// Completion callback for `execute_command`.
pub type CommandCallback = Box<dyn FnOnce(Option<Error>, Option<String>) + Send>;

/// Completion callback for `configure_and_commit` / `rollback_configuration`.
pub type ConfigCallback = Box<dyn FnOnce(Option<Error>, String) + Send>;

pub enum PendingOperation {
    Idle,
    AwaitingCommand {
        command: String,
        callback: CommandCallback,
    },
    AwaitingConfig {
        callback: ConfigCallback,
        /// Caller-supplied config lines not yet sent (APPLYING_CONFIG only).
        user_commands: VecDeque<String>,
        /// Vendor commands remaining for whichever phase is currently active
        /// (entering config, committing, aborting, or rolling back).
        phase_queue: VecDeque<String>,
    },
}

impl PendingOperation {
    pub fn pop_phase_queue(&mut self) -> Option<String> {
        match self {
            PendingOperation::AwaitingConfig { phase_queue, .. } => phase_queue.pop_front(),
            _ => None,
        }
    }

    pub fn pop_user_command(&mut self) -> Option<String> {
        match self {
            PendingOperation::AwaitingConfig { user_commands, .. } => user_commands.pop_front(),
            _ => None,
        }
    }

    pub fn set_phase_queue(&mut self, commands: VecDeque<String>) {
        if let PendingOperation::AwaitingConfig { phase_queue, .. } = self {
            *phase_queue = commands;
        }
    }
}
