use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "tripwire",
    version,
    about = "Evaluates declarative guard rules against agent runtime hook events"
)]
pub struct Cli {
    /// Hook event being handled (PreToolUse, PostToolUse, Stop,
    /// UserPromptSubmit, SessionStart, Notification)
    pub hook_event: String,

    /// Path to the rules file
    #[arg(short, long, default_value = "tripwire-rules.yaml")]
    pub rules: PathBuf,

    /// Override the permit file location
    #[arg(long)]
    pub permit_file: Option<PathBuf>,
}
