use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use cq_core::{DialogueScript, Library, Placement};

pub fn run(file: &Path, only: Option<&str>) -> Result<(), String> {
    let library = super::load_library(file)?;

    let selected: Vec<(&str, &DialogueScript)> = match only {
        Some(input) => {
            let name = super::resolve_name(library.scripts.keys().map(String::as_str), input)
                .ok_or_else(|| format!("no script named '{input}'"))?;
            let script = library.require_script(name).map_err(|e| e.to_string())?;
            vec![(name, script)]
        }
        None => library
            .scripts
            .iter()
            .map(|(name, script)| (name.as_str(), script))
            .collect(),
    };

    if selected.is_empty() {
        println!("  No scripts found.");
    }

    for (name, script) in selected {
        print_script(name, script);
    }

    if only.is_none() {
        print_placements(&library);
    }

    Ok(())
}

fn print_script(name: &str, script: &DialogueScript) {
    println!(
        "  {} {}",
        "Script".bold(),
        format!("'{name}' ({} lines)", script.line_count()).dimmed()
    );

    let mut lines = Table::new();
    lines.set_content_arrangement(ContentArrangement::Dynamic);
    lines.set_header(vec!["Position", "Speaker", "Text", "Duration", "Asks"]);
    for (position, dialogue, subtitle) in script.lines() {
        let text = if subtitle.text.chars().count() > 60 {
            let cut: String = subtitle.text.chars().take(57).collect();
            format!("{cut}...")
        } else {
            subtitle.text.clone()
        };
        lines.add_row(vec![
            position.to_string(),
            dialogue.speaker.clone(),
            text,
            format!("{:.2}s", subtitle.duration),
            if subtitle.has_question { "yes" } else { "" }.to_string(),
        ]);
    }
    println!("{lines}");

    if !script.questions.is_empty() {
        let mut questions = Table::new();
        questions.set_content_arrangement(ContentArrangement::Dynamic);
        questions.set_header(vec!["Label", "Option", "At", "Target"]);
        for question in &script.questions {
            questions.add_row(vec![
                question.label.clone(),
                question.option.to_string(),
                question.reference().to_string(),
                format!("conversation {}", question.target),
            ]);
        }
        println!("{questions}");
    }
    println!();
}

fn print_placements(library: &Library) {
    if library.placements.is_empty() {
        return;
    }
    println!("  {}", "Placements".bold());

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Kind", "Details", "Repeats"]);
    for placement in &library.placements {
        let row = match placement {
            Placement::Conversation {
                name,
                script,
                allow_repeat,
            } => vec![
                name.clone(),
                "conversation".to_string(),
                format!("script '{script}'"),
                allow_repeat.to_string(),
            ],
            Placement::Item { info } => vec![
                info.name.clone(),
                format!("{} item", info.item_type),
                if info.has_question {
                    format!("{} (asks)", info.description)
                } else {
                    info.description.clone()
                },
                (!info.has_question).to_string(),
            ],
        };
        table.add_row(row);
    }
    println!("{table}");
}
