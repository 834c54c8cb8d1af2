use clap::Parser;
use keiro::prelude::*;
use std::fs;
use std::time::Instant;

/// A workflow graph engine CLI: validate a workflow document, then print its
/// layered execution plan and derived layout.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the workflow document JSON file
    workflow_path: String,

    /// Print the layered execution plan for valid workflows
    #[arg(short, long)]
    plan: bool,

    /// Print auto-layout canvas coordinates for valid workflows
    #[arg(short, long)]
    layout: bool,

    /// Emit the validation report as JSON instead of human-readable lines
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();
    let total_start = Instant::now();

    let workflow_json = fs::read_to_string(&cli.workflow_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read workflow file '{}': {}",
            &cli.workflow_path, e
        ))
    });

    let document = WorkflowDocument::from_json(&workflow_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse workflow JSON: {}", e)));
    let name = document.name.clone();

    let graph = document
        .into_workflow()
        .unwrap_or_else(|e| exit_with_error(&format!("Workflow document is malformed: {}", e)));

    println!(
        "Validating workflow '{}' ({} nodes, {} edges)...",
        name,
        graph.node_count(),
        graph.edge_count()
    );
    let validate_start = Instant::now();
    let report = validate(&graph);
    let validate_duration = validate_start.elapsed();

    if cli.json {
        let rendered = serde_json::to_string_pretty(&report)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to render report: {}", e)));
        println!("{}", rendered);
    } else if report.issues.is_empty() {
        println!("No issues found.");
    } else {
        for issue in &report.issues {
            println!("  {}", issue);
        }
    }

    if !report.is_valid() {
        eprintln!(
            "\nWorkflow is invalid: {} error(s), {} warning(s).",
            report.error_count(),
            report.warnings().count()
        );
        std::process::exit(1);
    }
    println!(
        "\nWorkflow is valid ({} warning(s)) in {:?}.",
        report.warnings().count(),
        validate_duration
    );

    if cli.plan || cli.layout {
        let plan_start = Instant::now();
        let plan = plan(&graph, &report)
            .unwrap_or_else(|e| exit_with_error(&format!("Planning failed: {}", e)));
        let plan_duration = plan_start.elapsed();

        if cli.plan {
            println!(
                "\nExecution plan ({} layers, computed in {:?}):",
                plan.layer_count(),
                plan_duration
            );
            for (index, layer) in plan.layers().iter().enumerate() {
                println!("  Layer {}: {}", index, layer.join(", "));
            }
        }

        if cli.layout {
            println!("\nAuto-layout positions:");
            for position in auto_layout(&plan) {
                println!(
                    "  {:<20} x={:<8} y={}",
                    position.node_id, position.x, position.y
                );
            }
        }
    }

    println!("\nTotal: {:?}", total_start.elapsed());
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
