//! Plain-text rendering for the terminal commands.

use solution_explorer::solutions::{Solution, SolutionOutput};
use std::fmt::Write;

pub fn render_catalog(solutions: &[&Solution]) -> String {
    if solutions.is_empty() {
        return "No solutions match.".to_string();
    }
    let mut out = String::new();
    for solution in solutions {
        let _ = writeln!(
            out,
            "{:>3}  {:<28} [{}]",
            solution.id,
            solution.name,
            solution.tags.join(", ")
        );
    }
    out.trim_end().to_string()
}

pub fn render_solution(solution: &Solution) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (#{})", solution.name, solution.id);
    let _ = writeln!(out, "{}", solution.description);
    let _ = writeln!(out, "Tags: {}", solution.tags.join(", "));
    let _ = writeln!(out, "Kind: {}", solution.kind);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", solution.kind.input_label());
    let _ = write!(out, "  {}", solution.kind.sample_input().replace('\n', "\n  "));
    out
}

/// Section headings mirror the web result panel.
pub fn render_output(output: &SolutionOutput) -> String {
    let mut out = String::new();
    match output {
        SolutionOutput::Chat { model, text } => {
            let _ = writeln!(out, "Chat Answer ({model}):");
            let _ = write!(out, "{text}");
        }
        SolutionOutput::Image { url } => {
            let _ = write!(out, "Generated Image:\n{url}");
        }
        SolutionOutput::Description { text } => {
            let _ = write!(out, "Image Description:\n{text}");
        }
        SolutionOutput::Variation { prompt, url } => {
            let _ = writeln!(out, "Image Description:\n{prompt}\n");
            let _ = write!(out, "Generated Variation:\n{url}");
        }
        SolutionOutput::Chain(result) => {
            for step in &result.steps {
                let _ = writeln!(out, "Step {}:\n{}\n", step.step, step.response);
            }
        }
        SolutionOutput::Routes(routed) => {
            for item in routed {
                let _ = writeln!(out, "Prompt: {}", item.prompt);
                let _ = writeln!(out, "Route: {}", item.output.selection.route);
                let _ = writeln!(out, "Reason: {}", item.output.selection.reason);
                let _ = writeln!(out, "Response:\n{}\n", item.output.response);
            }
        }
        SolutionOutput::Parallel(result) => {
            for proposal in &result.proposals {
                let _ = writeln!(out, "{}:\n{}\n", proposal.model, proposal.response);
            }
            let _ = write!(out, "Final Answer:\n{}", result.aggregated);
        }
        SolutionOutput::Orchestrator(result) => {
            let _ = writeln!(out, "Orchestrator Analysis:\n{}\n", result.analysis);
            for worker in &result.outputs {
                let _ = writeln!(
                    out,
                    "Worker ({}): {}\n{}\n",
                    worker.task.style, worker.task.description, worker.response
                );
            }
        }
    }
    out.trim_end().to_string()
}
