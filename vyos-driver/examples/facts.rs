//! VyOS getters example
//!
//! Connects to a VyOS router, prints its facts, interfaces and BGP
//! neighbors, then optionally pings a destination from the device.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example facts -- --host 192.168.1.1 --user vyos --password vyos
//! ```
//!
//! With a ping from the router:
//! ```bash
//! cargo run --example facts -- --host 192.168.1.1 --user vyos --key ~/.ssh/id_ed25519 --ping 192.0.2.1
//! ```

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use vyos_driver::model::{PingOptions, PingResult};
use vyos_driver::{DriverBuilder, HostKeyVerification, NetworkDriver};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    println!("Connecting to {}:{}...", args.host, args.port);

    let mut builder = DriverBuilder::new(&args.host)
        .port(args.port)
        .username(&args.user)
        .timeout(Duration::from_secs(args.timeout))
        .host_key_verification(HostKeyVerification::AcceptNew);

    if let Some(password) = &args.password {
        builder = builder.password(password);
    } else if let Some(key_path) = &args.key {
        builder = builder.private_key(key_path);
    } else {
        eprintln!("Error: Must provide either --password or --key");
        std::process::exit(1);
    }

    let mut driver = builder.build()?;
    driver.open().await?;
    println!("Connected!\n");

    let facts = driver.get_facts().await?;
    println!("--- facts ---");
    println!("{}", serde_json::to_string_pretty(&facts)?);

    println!("\n--- interfaces ---");
    for (name, iface) in driver.get_interfaces().await? {
        println!(
            "{:<10} up={:<5} enabled={:<5} {}",
            name,
            iface.is_up,
            iface.is_enabled,
            iface.description.unwrap_or_default()
        );
    }

    println!("\n--- bgp ---");
    match driver.get_bgp_neighbors().await {
        Ok(bgp) => {
            println!(
                "router id {} AS {}",
                bgp.global.router_id, bgp.global.local_as
            );
            for (peer, state) in &bgp.global.peers {
                println!("  {:<16} AS{:<6} up={}", peer, state.remote_as, state.is_up);
            }
        }
        Err(e) => println!("BGP not available: {}", e),
    }

    if let Some(destination) = &args.ping {
        println!("\n--- ping {} ---", destination);
        match driver.ping(&PingOptions::new(destination)).await? {
            PingResult::Success(ok) => println!(
                "{} sent, {} lost, avg {:?} ms",
                ok.probes_sent, ok.packet_loss, ok.rtt_avg
            ),
            PingResult::Error(err) => println!("error: {}", err.trim()),
        }
    }

    driver.close().await?;
    println!("\nDisconnected.");
    Ok(())
}

struct Args {
    host: String,
    port: u16,
    user: String,
    password: Option<String>,
    key: Option<PathBuf>,
    timeout: u64,
    ping: Option<String>,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut parsed = Args {
            host: "localhost".to_string(),
            port: 22,
            user: env::var("USER").unwrap_or_else(|_| "vyos".to_string()),
            password: None,
            key: None,
            timeout: 60,
            ping: None,
        };

        let mut i = 1;
        while i < args.len() {
            let value = args.get(i + 1).cloned();
            match args[i].as_str() {
                "--host" | "-h" => parsed.host = value.unwrap_or(parsed.host),
                "--port" | "-p" => parsed.port = value.and_then(|v| v.parse().ok()).unwrap_or(22),
                "--user" | "-u" => parsed.user = value.unwrap_or(parsed.user),
                "--password" | "-P" => parsed.password = value,
                "--key" | "-k" => parsed.key = value.map(PathBuf::from),
                "--timeout" | "-t" => {
                    parsed.timeout = value.and_then(|v| v.parse().ok()).unwrap_or(60)
                }
                "--ping" => parsed.ping = value,
                "--help" => {
                    println!("Usage: facts --host HOST [--port PORT] --user USER (--password PW | --key PATH) [--timeout SECS] [--ping DEST]");
                    std::process::exit(0);
                }
                other => {
                    eprintln!("Unknown argument: {}", other);
                    std::process::exit(1);
                }
            }
            i += 2;
        }

        parsed
    }
}
