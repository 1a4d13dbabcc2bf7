use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use quiver_core::{ContextBuilder, LoadReport, QuiverConfig, SkillRegistry, SkillSelector};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "quiver",
    version,
    about = "Load a skill registry from disk and query which skills a free-text intent activates"
)]
struct Cli {
    /// Skill root directory (repeatable; overrides configured paths)
    #[arg(long = "skills-dir", global = true)]
    skills_dir: Vec<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List loaded skills and any documents skipped during load
    List,
    /// Rank the skills activated by an intent
    Select {
        intent: String,
        /// Keep only the top N matches
        #[arg(long)]
        limit: Option<usize>,
        /// Emit machine-readable output
        #[arg(long)]
        json: bool,
    },
    /// Print a skill's full body
    Show { name: String },
    /// Assemble the context block injected for an intent
    Context {
        intent: String,
        /// Cap on skill sections (defaults to max_context_skills from config)
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("QUIVER_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = QuiverConfig::load()?;
    if !cli.skills_dir.is_empty() {
        config.registry.paths = cli.skills_dir.clone();
    }

    let (registry, report) = SkillRegistry::load(&config.registry);

    match cli.command {
        Command::List => list(&registry, &report),
        Command::Select {
            intent,
            limit,
            json,
        } => select(&registry, &intent, limit, json)?,
        Command::Show { name } => show(&registry, &name).await?,
        Command::Context { intent, limit } => {
            let cap = limit.unwrap_or(config.max_context_skills);
            context(&registry, &intent, cap).await?;
        }
    }

    Ok(())
}

fn list(registry: &SkillRegistry, report: &LoadReport) {
    if registry.is_empty() {
        println!("no skills loaded");
    } else {
        println!("{} skill(s) loaded:\n", registry.len());
        for skill in registry.skills() {
            println!("{}", skill.summary());
        }
    }

    if !report.skipped.is_empty() {
        println!("\n{} document(s) skipped:", report.skipped.len());
        for skipped in &report.skipped {
            println!("- {}: {}", skipped.path.display(), skipped.reason);
        }
    }
}

fn select(registry: &SkillRegistry, intent: &str, limit: Option<usize>, json: bool) -> Result<()> {
    let selector = SkillSelector::new();
    let mut activations = selector.select(intent, registry);
    if let Some(limit) = limit {
        activations.truncate(limit);
    }

    if json {
        let items: Vec<serde_json::Value> = activations
            .iter()
            .map(|a| {
                serde_json::json!({
                    "name": a.skill.name,
                    "hits": a.hit_count(),
                    "matched": a.matched,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if activations.is_empty() {
        println!("no skills activated");
        return Ok(());
    }
    for activation in &activations {
        println!(
            "{:<40} {} hit(s): {}",
            activation.skill.name,
            activation.hit_count(),
            activation.matched.join(", ")
        );
    }
    Ok(())
}

async fn show(registry: &SkillRegistry, name: &str) -> Result<()> {
    match registry.get(name) {
        Some(skill) => {
            println!("{}", skill.body().await?);
            Ok(())
        }
        None => bail!("skill '{}' not found", name),
    }
}

async fn context(registry: &SkillRegistry, intent: &str, cap: usize) -> Result<()> {
    let selector = SkillSelector::new();
    let activations = selector.select(intent, registry);
    if activations.is_empty() {
        println!("no skills activated");
        return Ok(());
    }

    let mut builder = ContextBuilder::new("The following skill instructions apply to this task.")
        .with_limit(cap);
    for activation in &activations {
        let body = activation.skill.body().await?;
        builder = builder.with_skill(&activation.skill.name, &body);
    }
    println!("{}", builder.build());
    Ok(())
}
