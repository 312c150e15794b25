use nonzero_core::{suggestion, Suggestion, TaskProvider};

use crate::context::Context;

pub fn run(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = ctx.load_snapshot()?;
    let today = ctx.today();

    let suggestions: Vec<Suggestion> = snapshot
        .tasks(false)
        .into_iter()
        .filter_map(|task| suggestion(task, today))
        .collect();

    ctx.emit(&suggestions, || {
        if suggestions.is_empty() {
            "Nothing to pick back up today.".to_string()
        } else {
            suggestions
                .iter()
                .map(|s| format!("{}: {}", s.task, s.message))
                .collect::<Vec<_>>()
                .join("\n")
        }
    })
}
