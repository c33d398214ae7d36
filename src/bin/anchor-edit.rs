//! anchor-edit -- standalone MCP text-editing server over stdio.
//!
//! Usage: anchor-edit [--workspace <path>]
//!
//! Without a flag the server edits relative to the directory it was
//! started in.

use std::path::PathBuf;

use anyhow::Context;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout belongs to the protocol.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let mut workspace: Option<PathBuf> = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--workspace" | "-w" => {
                let value = args.next().context("--workspace requires a path")?;
                workspace = Some(PathBuf::from(value));
            }
            "--help" | "-h" => {
                eprintln!("usage: anchor-edit [--workspace <path>]");
                return Ok(());
            }
            other => anyhow::bail!("unrecognized argument: {other}"),
        }
    }

    let workspace = match workspace {
        Some(path) => path
            .canonicalize()
            .with_context(|| format!("workspace does not exist: {}", path.display()))?,
        None => std::env::current_dir().context("cannot determine current directory")?,
    };

    anchor_edit::run_server(anchor_edit::server::ServerConfig { workspace })
}
