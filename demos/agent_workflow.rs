//! Agent Workflow
//!
//! Tracks a small crew of agents, each with its own lifecycle machine
//! loaded from a JSON definition.
//!
//! Key concepts:
//! - Entities carry typed attributes for reporting
//! - Each agent's machine is owned by the workflow, never global
//! - Rejected transitions leave the machine untouched
//!
//! Run with: RUST_LOG=debug cargo run --example agent_workflow

use aios_core::{Entity, MachineDefinition, StateMachine};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const LIFECYCLE: &str = r#"{
    "name": "agent",
    "states": ["planning", "executing", "monitoring", "done"],
    "transitions": [
        ["planning", "executing"],
        ["executing", "monitoring"],
        ["monitoring", "executing"],
        ["monitoring", "done"]
    ]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    println!("=== Agent Workflow Example ===\n");

    let definition = MachineDefinition::<String>::from_json(LIFECYCLE)?;
    let mut crew: Vec<(Entity, StateMachine<String>)> = Vec::new();
    for (name, role) in [("ProjectManager", "planning"), ("Developer", "coding")] {
        let mut agent = Entity::new(name);
        agent.set_attribute("role", role);
        agent.set_attribute("max_iterations", 3_i64);
        crew.push((agent, definition.clone().build()?));
    }

    for (agent, lifecycle) in &mut crew {
        for step in ["executing", "monitoring", "executing", "monitoring", "done"] {
            lifecycle.transition(step.to_string())?;
        }
        if let Err(error) = lifecycle.transition("planning".to_string()) {
            println!("{agent}: {error}");
        }
    }

    for (agent, lifecycle) in &crew {
        println!("{agent} -> {lifecycle}");
        println!("  attributes: {}", serde_json::to_string(&agent.describe().attributes)?);
        let mut counts: Vec<_> = lifecycle.transition_counts().into_iter().collect();
        counts.sort();
        for ((from, to), count) in counts {
            println!("  {from} -> {to}: {count}");
        }
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
