mod cli;

use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use rule_engine::{loader, EventClass, HookEvent, HookPayload, RuleEngine};

use crate::cli::Cli;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        // Exit 2 with a stderr diagnostic: the runtime surfaces this to the
        // agent as a blocking hook error.
        Err(err) => {
            eprintln!("tripwire: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Diagnostics go to stderr; stdout carries only the response object.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut payload: HookPayload = serde_json::from_reader(std::io::stdin().lock())
        .context("failed to parse hook input on stdin")?;
    // The invoking hook knows the event; it overrides whatever the payload
    // carried.
    payload.hook_event_name = cli.hook_event.clone();

    let event = HookEvent::parse(&cli.hook_event);
    let rules = match event_class_for(&event, &payload.tool_name) {
        Some(class) => loader::load_rules(&cli.rules, Some(class))
            .with_context(|| format!("failed to load rules from {}", cli.rules.display()))?,
        // No event class covers this invocation (e.g. a tool the rule
        // vocabulary has no class for); nothing can match.
        None => Vec::new(),
    };

    debug!(
        hook_event = %cli.hook_event,
        tool_name = %payload.tool_name,
        rule_count = rules.len(),
        "evaluating hook payload"
    );

    let mut engine = match cli.permit_file {
        Some(path) => RuleEngine::with_permit_path(path),
        None => RuleEngine::new(),
    };
    let response = engine.evaluate(&rules, &payload);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer(&mut out, &response).context("failed to write response")?;
    writeln!(out)?;

    Ok(())
}

/// Map a hook event (plus the tool name, for tool events) to the rule event
/// class that should be loaded.
fn event_class_for(event: &HookEvent, tool_name: &str) -> Option<EventClass> {
    match event {
        HookEvent::PreToolUse | HookEvent::PostToolUse => match tool_name {
            "Bash" => Some(EventClass::Bash),
            "Edit" | "Write" | "MultiEdit" => Some(EventClass::File),
            _ => None,
        },
        HookEvent::Stop => Some(EventClass::Stop),
        HookEvent::UserPromptSubmit => Some(EventClass::UserPrompt),
        HookEvent::SessionStart => Some(EventClass::SessionStart),
        HookEvent::Notification => Some(EventClass::Notification),
        HookEvent::Other(_) => None,
    }
}
