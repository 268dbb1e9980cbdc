//! # netdrive
//!
//! A device driver for automating configuration and operational interaction
//! with network devices over SSH — Juniper JUNOS and Cisco IOS XR today.
//!
//! The core [`driver::Driver`] is a synchronous, single-threaded,
//! event-driven cooperative actor: it consumes a duplex byte stream from an
//! interactive device shell, recognizes vendor prompts, sequences multi-step
//! configuration operations, and reports completion through callbacks. The
//! async [`client::DeviceClient`] is the only piece of this crate that is
//! genuinely `async`; it owns an SSH child-process transport and bridges the
//! driver's callbacks to `.await`-able calls.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use netdrive::transport::config::DriverConfigBuilder;
//! use netdrive::vendor::DeviceKind;
//! use netdrive::client::DeviceClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), netdrive::Error> {
//!     let config = DriverConfigBuilder::new("192.168.1.1")
//!         .username("admin")
//!         .password("secret")
//!         .device_kind(DeviceKind::Junos)
//!         .build()?;
//!
//!     let client = DeviceClient::connect(config).await?;
//!     let output = client.run_command("show version").await?;
//!     println!("{output}");
//!     client.disconnect().await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod driver;
pub mod error;
pub mod transport;
pub mod vendor;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::DeviceClient;
pub use driver::{Driver, DriverState};
pub use error::Error;
pub use vendor::{DeviceInfo, DeviceKind};
