//! Probe example: detect the platform of a firewall and collect inventory
//!
//! Connects, prints the detected platform and canonical prompt, then runs
//! every command in that platform's table. On a CrossBeam CPM it can also
//! hop into a VAP member and do the same there.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example probe -- --host 192.0.2.10 --user admin --password secret \
//!     --expert-password expert-secret
//! ```
//!
//! CrossBeam, entering VAP member 1 of group `fw`:
//! ```bash
//! cargo run --example probe -- --host 192.0.2.20 --user admin --password secret \
//!     --expert-password root-secret --vap fw:1
//! ```

use std::env;
use std::time::Duration;

use fwshell::{HostKeyVerification, Platform, Session, SessionBuilder};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (set RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut builder = SessionBuilder::new(&args.host)
        .port(args.port)
        .username(&args.user)
        .timeout(Duration::from_secs(args.timeout))
        .verbosity(args.verbosity)
        .host_key_verification(HostKeyVerification::Disabled);

    if let Some(password) = &args.password {
        builder = builder.password(password);
    } else {
        eprintln!("Error: --password is required");
        std::process::exit(1);
    }
    if let Some(password) = &args.expert_password {
        builder = builder.escalation_password(password);
    }

    let mut session = builder.build()?;

    println!("Connecting to {}:{}...", args.host, args.port);
    let platform = session.connect().await?;
    println!("Platform: {}", platform);
    println!("Prompt:   {:?}", session.prompt());

    collect(&mut session).await;

    if let Some((group, member)) = &args.vap {
        if platform == Platform::CrossbeamCpm {
            println!("\nEntering VAP {}_{}...", group, member);
            session.connect_vap(group, *member).await?;
            println!("Prompt:   {:?}", session.prompt());

            let result = session.run("fw ver", Duration::from_secs(20)).await?;
            println!("{}", result.output.trim_end());

            session.disconnect_vap().await?;
        } else {
            eprintln!("--vap only applies to a CrossBeam CPM");
        }
    }

    println!("\nLogging out...");
    session.logout().await?;
    println!("Done!");

    Ok(())
}

/// Run every command in the platform table, printing results as they come.
async fn collect(session: &mut Session) {
    let kinds: Vec<_> = match session.definition() {
        Some(def) => def.commands.keys().copied().collect(),
        None => return,
    };

    for kind in kinds {
        println!("\n== {} ==", kind.name());
        match session.run_platform_command(kind).await {
            Ok(result) if result.is_success() => println!("{}", result.output.trim_end()),
            Ok(result) => eprintln!("refused: {:?}", result.failure_message),
            Err(e) => {
                eprintln!("failed: {}", e);
                if e.is_timeout() && session.resync(Duration::from_secs(5)).await.is_err() {
                    return;
                }
                if e.is_transport() {
                    return;
                }
            }
        }
    }
}

/// Simple argument parser (avoiding external dependencies)
struct Args {
    host: String,
    port: u16,
    user: String,
    password: Option<String>,
    expert_password: Option<String>,
    vap: Option<(String, u32)>,
    timeout: u64,
    verbosity: u8,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut parsed = Self {
            host: "localhost".to_string(),
            port: 22,
            user: env::var("USER").unwrap_or_else(|_| "admin".to_string()),
            password: None,
            expert_password: None,
            vap: None,
            timeout: 10,
            verbosity: 0,
        };

        let mut i = 1;
        while i < args.len() {
            let value = args.get(i + 1).cloned();
            match args[i].as_str() {
                "--host" | "-h" => parsed.host = value.unwrap_or(parsed.host),
                "--port" | "-p" => {
                    parsed.port = value.and_then(|v| v.parse().ok()).unwrap_or(22)
                }
                "--user" | "-u" => parsed.user = value.unwrap_or(parsed.user),
                "--password" | "-P" => parsed.password = value,
                "--expert-password" | "-E" => parsed.expert_password = value,
                "--vap" => {
                    parsed.vap = value.and_then(|v| {
                        let (group, member) = v.rsplit_once(':')?;
                        Some((group.to_string(), member.parse().ok()?))
                    })
                }
                "--timeout" | "-t" => {
                    parsed.timeout = value.and_then(|v| v.parse().ok()).unwrap_or(10)
                }
                "-v" => {
                    parsed.verbosity += 1;
                    i += 1;
                    continue;
                }
                "--help" => {
                    Self::print_help();
                    std::process::exit(0);
                }
                other => {
                    eprintln!("Unknown argument: {}", other);
                    i += 1;
                    continue;
                }
            }
            i += 2;
        }

        parsed
    }

    fn print_help() {
        println!(
            r#"fwshell probe example

USAGE:
    cargo run --example probe -- [OPTIONS]

OPTIONS:
    -h, --host <HOST>               Target host [default: localhost]
    -p, --port <PORT>               SSH port [default: 22]
    -u, --user <USER>               Username [default: $USER]
    -P, --password <PASS>           Login password
    -E, --expert-password <PASS>    Password for expert / unix su
        --vap <GROUP:MEMBER>        CrossBeam VAP member to enter
    -t, --timeout <SECS>            Connection timeout [default: 10]
    -v                              Trace raw buffer contents
    --help                          Print this help message
"#
        );
    }
}
