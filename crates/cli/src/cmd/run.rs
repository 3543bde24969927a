//! Attach autosave to a page and replay edits against the server

use crate::config::SystemConfig;
use crate::edits::{self, Step};
use anyhow::{Context, Result};
use autosave::{
    CloseMode, FieldEvent, HttpTransport, Notifier, SyncOptions, SyncSession,
};
use liftlog_core::Page;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tracing::{info, warn};

/// Options for `liftsync run`
pub struct RunArgs {
    pub page: PathBuf,
    /// Edit script; `None` or `-` reads stdin
    pub events: Option<PathBuf>,
    pub server: Option<String>,
    pub debounce_ms: Option<u64>,
    pub discard_pending: bool,
}

/// Shows alerts on the terminal
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{} {}", "alert:".red().bold(), message);
    }
}

pub async fn run(config: &SystemConfig, args: RunArgs) -> Result<()> {
    let page = Page::load(&args.page)
        .with_context(|| format!("Failed to load page {}", args.page.display()))?;

    let base_url = args
        .server
        .as_deref()
        .unwrap_or(&config.server.base_url);
    let transport = HttpTransport::new(base_url, config.timeout())
        .context("Failed to create HTTP client")?;
    info!("Syncing to {}", transport.base_url());

    let window = args
        .debounce_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.window());

    let mut session = SyncSession::attach(
        &page,
        Arc::new(transport),
        Arc::new(TerminalNotifier),
        SyncOptions { window },
    );

    for group in session.groups() {
        let fields: Vec<_> = group.watched_fields().collect();
        println!(
            "{} {} {} {}",
            group.id().dimmed(),
            group.kind().cyan(),
            group.label(),
            format!("[{}]", fields.join(", ")).dimmed()
        );
    }

    let reader: Box<dyn AsyncRead + Unpin + Send> = match &args.events {
        Some(path) if path.as_os_str() != "-" => Box::new(
            tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open edit script {}", path.display()))?,
        ),
        _ => Box::new(tokio::io::stdin()),
    };

    replay(&session, reader).await?;

    let mode = if args.discard_pending {
        CloseMode::Discard
    } else {
        CloseMode::Flush
    };
    session.close(mode).await;

    println!("\n{}", "Final snapshots".bold());
    for group in session.groups() {
        let body = serde_json::to_string(&group.snapshot())?;
        println!("{} {} {}", group.id().dimmed(), group.kind().cyan(), body);
    }

    Ok(())
}

async fn replay(session: &SyncSession, reader: impl AsyncRead + Unpin) -> Result<()> {
    let mut lines = BufReader::new(reader).lines();
    let mut line_no = 0;

    while let Some(line) = lines.next_line().await.context("Failed to read edit script")? {
        line_no += 1;

        let step = match edits::parse_line(line_no, &line) {
            Ok(Some(step)) => step,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{} {}", "skipped:".yellow(), e);
                continue;
            }
        };

        match step {
            Step::Sleep(duration) => tokio::time::sleep(duration).await,
            Step::Edit {
                target,
                field,
                value,
                trigger,
            } => {
                let Some(group) = target.resolve(session) else {
                    eprintln!("{} line {}: no group matches {:?}", "skipped:".yellow(), line_no, target);
                    continue;
                };

                let result = match trigger {
                    None => session.edit(group, &field, &value),
                    Some(trigger) => {
                        // Explicit trigger: the value changes even if nobody listens
                        if let Some(element) = session.group(group).and_then(|g| g.field(&field)) {
                            element.set_value(&value);
                        }
                        session.dispatch(FieldEvent::new(group, &field, trigger, &value))
                    }
                };

                if let Err(e) = result {
                    warn!("line {}: {}", line_no, e);
                    eprintln!("{} line {}: {}", "skipped:".yellow(), line_no, e);
                }
            }
        }
    }

    Ok(())
}
