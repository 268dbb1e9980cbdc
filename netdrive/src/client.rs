//! Async client facade: the only genuinely `async` piece of this crate. It
//! bridges the synchronous, run-to-completion [`Driver`] to an async caller
//! and owns the SSH transport's background tasks.

use std::time::Duration;

use log::info;
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;

use crate::driver::{Driver, DriverState};
use crate::error::{DriverError, Error, Result};
use crate::transport::config::DriverConfig;
use crate::transport::ssh::SshSession;
use crate::vendor::DeviceInfo;

const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Owns a connected driver and its transport's background tasks, exposing a
/// connect/run/configure/disconnect API to application code.
pub struct DeviceClient {
    driver: std::sync::Arc<Mutex<Driver>>,
    reader_task: JoinHandle<()>,
    operation_timeout: Duration,
}

impl DeviceClient {
    /// Spawn the transport, construct the vendor-appropriate driver, run
    /// `initialize()`, and start the background task that feeds
    /// `handle_data` from the transport's inbound byte stream.
    pub async fn connect(config: DriverConfig) -> Result<Self> {
        let device_kind = config.device_kind;
        let host = config.host.clone();
        let session = SshSession::connect(&config).await?;
        let SshSession {
            transport,
            mut data_rx,
            ..
        } = session;

        let mut driver = Driver::new(device_kind, Box::new(transport));
        driver.initialize()?;
        let driver = std::sync::Arc::new(Mutex::new(driver));

        let reader_driver = driver.clone();
        let reader_task = tokio::spawn(async move {
            while let Some(chunk) = data_rx.recv().await {
                reader_driver.lock().await.handle_data(&chunk);
            }
            // Channel closed: the transport's reader task exited, meaning
            // the child process went away.
            reader_driver.lock().await.handle_transport_failure();
        });

        info!("connected device client for {host}");

        Ok(Self {
            driver,
            reader_task,
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        })
    }

    /// Override the per-operation watchdog timeout (default 30s). This is a
    /// client-layer concern only; the driver itself has no timeout.
    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
        self
    }

    pub async fn run_command(&self, command: impl Into<String>) -> Result<String> {
        let (tx, rx) = oneshot::channel();
        {
            let mut driver = self.driver.lock().await;
            driver.execute_command(
                command,
                Box::new(move |err, response| {
                    let _ = tx.send((err, response));
                }),
            );
        }
        let (err, response) = self.await_result(rx).await?;
        match err {
            Some(err) => Err(err),
            None => Ok(response.unwrap_or_default()),
        }
    }

    pub async fn configure_and_commit(&self, commands: Vec<String>) -> Result<String> {
        let (tx, rx) = oneshot::channel();
        {
            let mut driver = self.driver.lock().await;
            driver.configure_and_commit(
                commands,
                Box::new(move |err, log| {
                    let _ = tx.send((err, log));
                }),
            );
        }
        let (err, log) = self.await_result(rx).await?;
        match err {
            Some(err) => Err(err),
            None => Ok(log),
        }
    }

    pub async fn rollback(&self, commits_back: u32) -> Result<String> {
        let (tx, rx) = oneshot::channel();
        {
            let mut driver = self.driver.lock().await;
            driver.rollback_configuration(
                commits_back,
                Box::new(move |err, log| {
                    let _ = tx.send((err, log));
                }),
            );
        }
        let (err, log) = self.await_result(rx).await?;
        match err {
            Some(err) => Err(err),
            None => Ok(log),
        }
    }

    /// Close the transport. The driver observes this as a transport failure
    /// and moves to `DISCONNECTED`.
    pub async fn disconnect(self) -> Result<()> {
        self.reader_task.abort();
        self.driver.lock().await.handle_transport_failure();
        info!("device client disconnected");
        Ok(())
    }

    pub async fn state(&self) -> DriverState {
        self.driver.lock().await.state()
    }

    pub async fn is_ready(&self) -> bool {
        self.driver.lock().await.is_ready()
    }

    pub async fn device_info(&self) -> DeviceInfo {
        self.driver.lock().await.get_device_info().clone()
    }

    async fn await_result<T>(&self, rx: oneshot::Receiver<(Option<Error>, T)>) -> Result<(Option<Error>, T)> {
        match tokio::time::timeout(self.operation_timeout, rx).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(_)) => Err(DriverError::Disconnected.into()),
            Err(_) => Err(DriverError::Disconnected.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::Transport;
    use crate::vendor::DeviceKind;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    struct ChannelTransport(mpsc::UnboundedSender<Vec<u8>>);

    impl Transport for ChannelTransport {
        fn send(&mut self, bytes: &[u8]) -> bool {
            self.0.send(bytes.to_vec()).is_ok()
        }
    }

    /// Build a `DeviceClient` wired to an in-process channel instead of a
    /// real `ssh` child process, so the oneshot/timeout bridging can be
    /// exercised without spawning anything.
    fn test_client() -> (DeviceClient, mpsc::UnboundedSender<Vec<u8>>) {
        let (sent_tx, mut sent_rx) = mpsc::unbounded_channel::<Vec<u8>>();
        tokio::spawn(async move { while sent_rx.recv().await.is_some() {} });

        let (inbound_tx, mut inbound_rx) = mpsc::unbounded_channel::<Vec<u8>>();
        let mut driver = Driver::new(DeviceKind::Junos, Box::new(ChannelTransport(sent_tx)));
        driver.initialize().unwrap();
        let driver = Arc::new(Mutex::new(driver));

        let reader_driver = driver.clone();
        let reader_task = tokio::spawn(async move {
            while let Some(chunk) = inbound_rx.recv().await {
                reader_driver.lock().await.handle_data(&chunk);
            }
        });

        (
            DeviceClient {
                driver,
                reader_task,
                operation_timeout: Duration::from_millis(500),
            },
            inbound_tx,
        )
    }

    #[tokio::test]
    async fn run_command_round_trips_through_the_oneshot_bridge() {
        let (client, inbound_tx) = test_client();
        assert!(client.is_ready().await);

        let (result, _) = tokio::join!(client.run_command("show version"), async {
            tokio::task::yield_now().await;
            inbound_tx
                .send(b"show version\nJuniper version info\nuser@device> ".to_vec())
                .unwrap();
        });

        assert_eq!(result.unwrap(), "Juniper version info");
        assert!(client.is_ready().await);
    }

    #[tokio::test]
    async fn run_command_times_out_when_no_prompt_ever_arrives() {
        let (client, _inbound_tx) = test_client();
        let result = client.run_command("show version").await;
        assert!(result.is_err());
    }
}
