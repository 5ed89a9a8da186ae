//! skill-activator hook binary
//!
//! # Input (via stdin)
//! One Claude Code hook payload (UserPromptSubmit, PreToolUse, SubagentStart
//! or SubagentStop) as JSON.
//!
//! # Output (via stdout)
//! A hook response: injected skill context, a `deny` decision for edits to
//! files owned by an enforced agent, or `{}`. Failures never block the host:
//! they are logged to stderr and answered with `{}`.

use clap::{Parser, Subcommand};
use colored::Colorize;
use skill_activator::engine::{
    register_subagent_start, register_subagent_stop, score_prompt_with, score_tool_use_with,
};
use skill_activator::enforce::{self, EnforceRequest};
use skill_activator::output::{format_context, HookOutput};
use skill_activator::{normalize, CliError, Event, FileRegistry, HookInput, Manifest};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Manifest file name under `.claude/`
const MANIFEST_FILE: &str = "skill-manifest.json";

/// Registry location under the project root
const REGISTRY_FILE: &str = ".claude/cache/subagent-registry.json";

const PROMPT_HEADING: &str =
    "SKILL ACTIVATION CHECK\nRelevant skills for this prompt (read each SKILL.md before starting):";

#[derive(Parser, Debug)]
#[command(name = "skill-activator", version, about = "Skill activation and file ownership hooks")]
struct Cli {
    /// Skill manifest (default: <project>/.claude/skill-manifest.json, then ~/.claude/skill-manifest.json)
    #[arg(long, global = true)]
    manifest: Option<PathBuf>,

    /// Subagent registry file (default: <project>/.claude/cache/subagent-registry.json)
    #[arg(long, global = true)]
    registry: Option<PathBuf>,

    /// Project root used to relativize file paths
    #[arg(long, global = true)]
    project_root: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Handle one hook payload read from stdin
    Hook,
    /// Score a prompt and print the ranking
    Score {
        /// Prompt text
        #[arg(required = true)]
        prompt: Vec<String>,
    },
}

// ============================================================================
// Path Resolution
// ============================================================================

struct Paths {
    project_root: String,
    manifest: PathBuf,
    registry: PathBuf,
}

impl Paths {
    fn resolve(cli: &Cli, cwd: &str) -> Self {
        let project_root = cli
            .project_root
            .clone()
            .or_else(|| std::env::var("CLAUDE_PROJECT_DIR").ok())
            .filter(|root| !root.is_empty())
            .or_else(|| (!cwd.is_empty()).then(|| cwd.to_string()))
            .or_else(|| {
                std::env::current_dir()
                    .ok()
                    .map(|dir| dir.to_string_lossy().into_owned())
            })
            .unwrap_or_default();

        let manifest = cli
            .manifest
            .clone()
            .unwrap_or_else(|| default_manifest_path(Path::new(&project_root)));
        let registry = cli
            .registry
            .clone()
            .unwrap_or_else(|| Path::new(&project_root).join(REGISTRY_FILE));

        Self {
            project_root,
            manifest,
            registry,
        }
    }
}

fn default_manifest_path(project_root: &Path) -> PathBuf {
    let project = project_root.join(".claude").join(MANIFEST_FILE);
    if project.exists() {
        return project;
    }
    match dirs::home_dir() {
        Some(home) => home.join(".claude").join(MANIFEST_FILE),
        None => project,
    }
}

fn load_manifest(paths: &Paths) -> Option<Manifest> {
    match Manifest::load(&paths.manifest) {
        Ok(manifest) => Some(manifest),
        Err(e) => {
            warn!("{}, skipping skill suggestions", e);
            None
        }
    }
}

// ============================================================================
// Hook Handling
// ============================================================================

fn handle_hook(cli: &Cli) -> Result<HookOutput, CliError> {
    let mut input_json = String::new();
    io::stdin().read_to_string(&mut input_json)?;
    debug!("Received input: {}", input_json);

    let input: HookInput = serde_json::from_str(&input_json)?;
    let Some(event) = Event::from_hook(&input) else {
        debug!("Ignoring hook event '{}'", input.hook_event_name);
        return Ok(HookOutput::empty());
    };

    let paths = Paths::resolve(cli, &input.cwd);
    debug!("Handling {} with manifest {:?}", event.name(), paths.manifest);

    match event {
        Event::Prompt { prompt } => Ok(handle_prompt(&prompt, &paths)),
        Event::ToolUse {
            tool_name,
            file_path,
        } => Ok(handle_tool_use(
            &input.session_id,
            &tool_name,
            file_path.as_deref(),
            &paths,
        )),
        Event::SubagentStart => {
            if input.session_id.is_empty() {
                warn!("SubagentStart without session id");
            } else {
                register_subagent_start(&input.session_id, &paths.registry)?;
            }
            Ok(HookOutput::empty())
        }
        Event::SubagentStop => {
            if !input.session_id.is_empty() {
                register_subagent_stop(&input.session_id, &paths.registry)?;
            }
            Ok(HookOutput::empty())
        }
    }
}

fn handle_prompt(prompt: &str, paths: &Paths) -> HookOutput {
    let normalized = normalize(prompt);
    if normalized.is_empty() {
        return HookOutput::empty();
    }
    let Some(manifest) = load_manifest(paths) else {
        return HookOutput::empty();
    };

    info!(
        "Processing prompt: {}",
        normalized.chars().take(50).collect::<String>()
    );
    let results = score_prompt_with(&normalized, &manifest);
    for result in &results {
        info!(
            "{} {} - score {:.2}, {} signals",
            "📚".green(),
            result.skill.name.bold(),
            result.score,
            result.matched_signals.len()
        );
    }

    HookOutput::context(
        "UserPromptSubmit",
        format_context(PROMPT_HEADING, &results, &manifest),
    )
}

fn handle_tool_use(
    session_id: &str,
    tool_name: &str,
    file_path: Option<&str>,
    paths: &Paths,
) -> HookOutput {
    let Some(file_path) = file_path else {
        return HookOutput::empty();
    };

    // One manifest read serves both the ownership check and suggestions
    let manifest = load_manifest(paths);
    let request = EnforceRequest {
        session_id,
        tool_name,
        file_path,
        project_root: &paths.project_root,
    };
    let decision = enforce::evaluate(&request, &FileRegistry::new(&paths.registry), || {
        manifest.as_ref()
    });
    if decision.is_blocked() {
        info!("{} {} on {}", "⛔".red(), tool_name, file_path);
        return HookOutput::from_decision(&decision);
    }

    let Some(manifest) = manifest else {
        return HookOutput::empty();
    };
    let results = score_tool_use_with(file_path, &paths.project_root, &manifest);
    let heading = format!("Skills relevant to {file_path}:");
    HookOutput::context("PreToolUse", format_context(&heading, &results, &manifest))
}

// ============================================================================
// Score Command
// ============================================================================

fn handle_score(cli: &Cli, prompt: &str) -> Result<(), CliError> {
    let paths = Paths::resolve(cli, "");
    let manifest = Manifest::load(&paths.manifest)?;
    let results = score_prompt_with(&normalize(prompt), &manifest);

    if results.is_empty() {
        println!("{}", "No skills activated".yellow());
        return Ok(());
    }

    for result in &results {
        println!(
            "{} {} {}",
            format!("{:>7.2}", result.score).green(),
            result.skill.name.bold(),
            result.skill.path.dimmed()
        );
        for signal in &result.matched_signals {
            println!("        {}", signal.label());
        }
    }
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() {
    // Logs go to stderr; stdout carries the hook response
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Command::Hook => {
            let output = handle_hook(&cli).unwrap_or_else(|e| {
                error!("Error: {}", e);
                HookOutput::empty()
            });
            println!("{}", output.to_json());
        }
        Command::Score { prompt } => {
            if let Err(e) = handle_score(&cli, &prompt.join(" ")) {
                eprintln!("{} {}", "error:".red().bold(), e);
                std::process::exit(1);
            }
        }
    }
}
