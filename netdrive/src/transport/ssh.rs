//! SSH transport implementation that spawns the system `ssh` binary as a
//! child process — no embedded SSH protocol implementation.

use std::process::Stdio;

use log::{debug, info};
use secrecy::ExposeSecret;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::config::{AuthMethod, DriverConfig};
use super::Transport;
use crate::error::{Result, TransportError};

/// Build the argv for the `ssh` invocation, without spawning anything.
/// Split out so it is testable on its own.
///
/// Returns `(program, args)`. When password authentication is configured,
/// `program` is the `sshpass` binary and `ssh` is inserted as its first
/// argument (`sshpass -e ssh ...`); the password itself never appears in
/// `args` — callers must export it into the child's environment as
/// `SSHPASS`.
pub fn build_invocation(config: &DriverConfig) -> (std::path::PathBuf, Vec<String>) {
    let mut ssh_args = vec![
        "-p".to_string(),
        config.port.to_string(),
        "-tt".to_string(),
        "-l".to_string(),
        config.username.clone(),
        "-o".to_string(),
        format!("ConnectTimeout={}", config.connect_timeout.as_secs()),
    ];

    if !config.host_key_checking {
        ssh_args.push("-o".to_string());
        ssh_args.push("StrictHostKeyChecking=no".to_string());
        ssh_args.push("-o".to_string());
        ssh_args.push("UserKnownHostsFile=/dev/null".to_string());
    }

    if let AuthMethod::PrivateKey { path, .. } = &config.auth {
        ssh_args.push("-i".to_string());
        ssh_args.push(path.to_string_lossy().into_owned());
    }

    ssh_args.push(config.host.clone());

    match &config.auth {
        AuthMethod::Password(_) => {
            let mut args = vec!["-e".to_string(), config.ssh_binary.to_string_lossy().into_owned()];
            args.extend(ssh_args);
            (config.sshpass_binary.clone(), args)
        }
        AuthMethod::PrivateKey { .. } => (config.ssh_binary.clone(), ssh_args),
    }
}

/// Synchronous half of the transport: enqueues outbound bytes onto a channel
/// drained by a background writer task, satisfying `send(bytes) -> bool`
/// without making the driver (or this type) `async`.
pub struct SshTransport {
    stdin_tx: mpsc::UnboundedSender<Vec<u8>>,
}

impl Transport for SshTransport {
    fn send(&mut self, bytes: &[u8]) -> bool {
        self.stdin_tx.send(bytes.to_vec()).is_ok()
    }
}

/// Handle to the background tasks and child process spawned by `connect`.
/// The client facade owns this, polling `data_rx` to feed
/// `Driver::handle_data`.
pub struct SshSession {
    pub transport: SshTransport,
    pub data_rx: mpsc::UnboundedReceiver<Vec<u8>>,
    child: Child,
    reader_task: JoinHandle<()>,
    writer_task: JoinHandle<()>,
}

impl SshSession {
    /// Spawn the child process and start the steady-state read/write tasks.
    pub async fn connect(config: &DriverConfig) -> Result<Self> {
        let (program, args) = build_invocation(config);
        debug!("spawning ssh transport: {} {:?}", program.display(), args);

        let mut command = Command::new(&program);
        command
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());

        if let AuthMethod::Password(secret) = &config.auth {
            command.env("SSHPASS", secret.expose_secret());
        }

        let mut child = command.spawn().map_err(TransportError::Spawn)?;

        let mut stdout = child
            .stdout
            .take()
            .expect("stdout was piped at spawn time");
        let mut stdin = child
            .stdin
            .take()
            .expect("stdin was piped at spawn time");

        let (stdin_tx, mut stdin_rx) = mpsc::unbounded_channel::<Vec<u8>>();
        let (data_tx, data_rx) = mpsc::unbounded_channel::<Vec<u8>>();

        let writer_task = tokio::spawn(async move {
            while let Some(chunk) = stdin_rx.recv().await {
                if stdin.write_all(&chunk).await.is_err() {
                    break;
                }
            }
        });

        let reader_task = tokio::spawn(async move {
            let mut buf = [0u8; 4096];
            loop {
                match stdout.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => {
                        if data_tx.send(buf[..n].to_vec()).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        info!("ssh transport connected to {}:{}", config.host, config.port);

        Ok(Self {
            transport: SshTransport { stdin_tx },
            data_rx,
            child,
            reader_task,
            writer_task,
        })
    }

    /// Tear down the child process and its background tasks.
    pub async fn close(mut self) -> Result<()> {
        self.reader_task.abort();
        self.writer_task.abort();
        let _ = self.child.start_kill();
        let status = self.child.wait().await.map_err(TransportError::Io)?;
        info!("ssh transport closed, exit status: {status:?}");
        Ok(())
    }
}
