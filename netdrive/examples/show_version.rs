//! Connect to a device and run `show version`.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example show_version -- --host 192.168.1.1 --user admin --password secret --vendor junos
//! ```

use std::env;

use netdrive::client::DeviceClient;
use netdrive::transport::config::DriverConfigBuilder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let host = arg_value(&args, "--host").unwrap_or_else(|| "localhost".to_string());
    let user = arg_value(&args, "--user").unwrap_or_else(|| "admin".to_string());
    let password = arg_value(&args, "--password").unwrap_or_else(|| "admin".to_string());
    let vendor = arg_value(&args, "--vendor").unwrap_or_else(|| "junos".to_string());

    let config = DriverConfigBuilder::new(host)
        .username(user)
        .password(password)
        .device_kind_str(&vendor)?
        .danger_disable_host_key_checking()
        .build()?;

    let client = DeviceClient::connect(config).await?;
    let output = client.run_command("show version").await?;
    println!("{output}");
    client.disconnect().await?;
    Ok(())
}

fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
