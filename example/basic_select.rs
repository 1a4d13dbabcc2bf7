//! Basic selection example.
//!
//! Run with:
//!   cargo run --example basic_select
//!
//! Expects a `skills/` directory in the working directory (or set
//! QUIVER_SKILLS_PATH), with one subdirectory per skill containing a
//! SKILL.md.

use quiver_core::{ContextBuilder, QuiverConfig, SkillRegistry, SkillSelector};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = QuiverConfig::load()?;

    // --- Load the registry ---
    let (registry, report) = SkillRegistry::load(&config.registry);
    println!("{} skill(s) loaded", registry.len());
    for skipped in &report.skipped {
        println!("skipped {}: {}", skipped.path.display(), skipped.reason);
    }
    println!("\n{}\n", registry.overview());

    // --- Rank skills for a few intents ---
    let selector = SkillSelector::new();
    let intents = [
        "I need to write a test for Stripe payment integration",
        "fix my database indexes",
    ];

    for intent in intents {
        println!("Intent: {intent}");
        let activations = selector.select(intent, &registry);
        if activations.is_empty() {
            println!("  no skills activated\n");
            continue;
        }
        for activation in &activations {
            println!(
                "  {} ({} hit(s): {})",
                activation.skill.name,
                activation.hit_count(),
                activation.matched.join(", ")
            );
        }
        println!();
    }

    // --- Assemble an injection context for the top matches ---
    let activations = selector.select(intents[0], &registry);
    let mut builder = ContextBuilder::new("The following skill instructions apply to this task.")
        .with_limit(2);
    for activation in &activations {
        builder = builder.with_skill(&activation.skill.name, &activation.skill.body().await?);
    }
    println!("--- context ---\n{}", builder.build());

    Ok(())
}
