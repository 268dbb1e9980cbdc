//! Builder-constructed configuration for the driver and its SSH transport.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use crate::error::{ConfigError, DriverError, Result};
use crate::vendor::DeviceKind;

/// How the transport authenticates to the device.
pub enum AuthMethod {
    Password(SecretString),
    PrivateKey {
        path: PathBuf,
        passphrase: Option<SecretString>,
    },
}

impl std::fmt::Debug for AuthMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthMethod::Password(_) => f.write_str("AuthMethod::Password(<redacted>)"),
            AuthMethod::PrivateKey { path, .. } => f
                .debug_struct("AuthMethod::PrivateKey")
                .field("path", path)
                .field("passphrase", &"<redacted>")
                .finish(),
        }
    }
}

/// Everything needed to spawn the SSH child process and construct the
/// matching vendor [`Driver`](crate::driver::Driver).
#[derive(Debug)]
pub struct DriverConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub auth: AuthMethod,
    pub connect_timeout: Duration,
    pub host_key_checking: bool,
    pub device_kind: DeviceKind,
    pub ssh_binary: PathBuf,
    pub sshpass_binary: PathBuf,
}

/// Fluent builder for [`DriverConfig`].
pub struct DriverConfigBuilder {
    host: Option<String>,
    port: u16,
    username: Option<String>,
    auth: Option<AuthMethod>,
    connect_timeout: Duration,
    host_key_checking: bool,
    device_kind: Option<DeviceKind>,
    ssh_binary: PathBuf,
    sshpass_binary: PathBuf,
}

impl DriverConfigBuilder {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: Some(host.into()),
            port: 22,
            username: None,
            auth: None,
            connect_timeout: Duration::from_secs(10),
            host_key_checking: true,
            device_kind: None,
            ssh_binary: PathBuf::from("ssh"),
            sshpass_binary: PathBuf::from("sshpass"),
        }
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.auth = Some(AuthMethod::Password(SecretString::from(password.into())));
        self
    }

    pub fn private_key(mut self, path: impl Into<PathBuf>) -> Self {
        self.auth = Some(AuthMethod::PrivateKey {
            path: path.into(),
            passphrase: None,
        });
        self
    }

    pub fn private_key_with_passphrase(
        mut self,
        path: impl Into<PathBuf>,
        passphrase: impl Into<String>,
    ) -> Self {
        self.auth = Some(AuthMethod::PrivateKey {
            path: path.into(),
            passphrase: Some(SecretString::from(passphrase.into())),
        });
        self
    }

    pub fn device_kind(mut self, kind: DeviceKind) -> Self {
        self.device_kind = Some(kind);
        self
    }

    /// Resolve a vendor name (e.g. `"junos"`, `"ios-xr"`) into a [`DeviceKind`]
    /// and set it, for callers that only have a string (a CLI flag, a config
    /// file field). Unrecognized names fail immediately with
    /// `DriverError::UnsupportedDeviceKind` rather than deferring to `build()`.
    pub fn device_kind_str(mut self, kind: &str) -> Result<Self> {
        let resolved = DeviceKind::from_str(kind).ok_or_else(|| DriverError::UnsupportedDeviceKind {
            kind: kind.to_string(),
        })?;
        self.device_kind = Some(resolved);
        Ok(self)
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Disable host key verification entirely. Only use this for testing or
    /// lab environments.
    pub fn danger_disable_host_key_checking(mut self) -> Self {
        self.host_key_checking = false;
        self
    }

    pub fn ssh_binary(mut self, path: impl Into<PathBuf>) -> Self {
        self.ssh_binary = path.into();
        self
    }

    pub fn sshpass_binary(mut self, path: impl Into<PathBuf>) -> Self {
        self.sshpass_binary = path.into();
        self
    }

    pub fn build(self) -> Result<DriverConfig> {
        let host = self.host.ok_or(ConfigError::MissingField { field: "host" })?;
        if host.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "host",
                message: "host must not be empty".to_string(),
            }
            .into());
        }
        let username = self
            .username
            .ok_or(ConfigError::MissingField { field: "username" })?;
        let auth = self.auth.ok_or(ConfigError::MissingField { field: "auth" })?;
        let device_kind = self
            .device_kind
            .ok_or(ConfigError::MissingField { field: "device_kind" })?;

        Ok(DriverConfig {
            host,
            port: self.port,
            username,
            auth,
            connect_timeout: self.connect_timeout,
            host_key_checking: self.host_key_checking,
            device_kind,
            ssh_binary: self.ssh_binary,
            sshpass_binary: self.sshpass_binary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_fails_without_required_fields() {
        let err = DriverConfigBuilder::new("router1").build().unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Config(ConfigError::MissingField { field: "username" })
        ));
    }

    #[test]
    fn device_kind_str_resolves_known_vendor_names() {
        let config = DriverConfigBuilder::new("router1")
            .username("admin")
            .password("hunter2")
            .device_kind_str("ios-xr")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.device_kind, DeviceKind::IosXr);
    }

    #[test]
    fn device_kind_str_rejects_unknown_vendor_names() {
        let err = DriverConfigBuilder::new("router1").device_kind_str("arista").unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Driver(DriverError::UnsupportedDeviceKind { kind }) if kind == "arista"
        ));
    }

    #[test]
    fn build_succeeds_with_password_auth() {
        let config = DriverConfigBuilder::new("router1")
            .username("admin")
            .password("hunter2")
            .device_kind(DeviceKind::Junos)
            .build()
            .unwrap();
        assert_eq!(config.host, "router1");
        assert_eq!(config.port, 22);
    }

    #[test]
    fn debug_impl_never_prints_secrets() {
        let auth = AuthMethod::Password(SecretString::from("hunter2".to_string()));
        assert!(!format!("{auth:?}").contains("hunter2"));
    }
}
