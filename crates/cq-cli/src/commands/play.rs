use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use cq_dialogue::{DialogueConfig, SkipAudio, Transcript, TranscriptEntry};
use cq_stage::{FocusPolicy, InstanceId, Stage, StageConfig, StageEventKind};

use super::input::{ScriptLine, Step, parse_script};

/// Settings for one replay.
pub struct PlayOptions {
    pub focus: FocusPolicy,
    pub skip_audio: SkipAudio,
    pub auto_continue: bool,
    pub tick: f64,
    pub verbose: bool,
}

type PlayStage = Stage<Transcript, Transcript>;

/// Most ticks a single `wait` may run.
const MAX_WAIT_TICKS: u64 = 1_000_000;

pub fn run(file: &Path, input: &Path, options: &PlayOptions) -> Result<(), String> {
    let library = super::load_library(file)?;
    let text = std::fs::read_to_string(input)
        .map_err(|e| format!("cannot read '{}': {e}", input.display()))?;
    let steps = parse_script(&text)?;

    if !options.tick.is_finite() || options.tick <= 0.0 {
        return Err(format!("tick must be positive, got {}", options.tick));
    }

    let config = StageConfig::default()
        .with_focus(options.focus)
        .with_max_events(1000)
        .with_dialogue(
            DialogueConfig::default()
                .with_auto_continue(options.auto_continue)
                .with_skip_audio(options.skip_audio),
        );
    let mut stage = Stage::new(&library, config, Transcript::new(), Transcript::new())
        .map_err(|e| e.to_string())?;

    let mut renderer = Renderer::default();
    let mut cues = 0;
    for script_line in &steps {
        apply(&mut stage, script_line, options.tick)?;
        cues += stage.audio_mut().drain().len();
        for entry in stage.text_mut().drain() {
            renderer.push(&entry);
        }
    }
    print!("{}", renderer.finish());

    println!();
    println!(
        "  {} steps, {} ticks, {:.2}s elapsed, {} voice cue{}",
        steps.len(),
        stage.clock().tick(),
        stage.clock().elapsed_seconds(),
        cues,
        if cues == 1 { "" } else { "s" }
    );
    print_state(&stage);

    if options.verbose {
        print_events(&stage);
    }

    Ok(())
}

fn apply(stage: &mut PlayStage, script_line: &ScriptLine, tick: f64) -> Result<(), String> {
    match &script_line.step {
        Step::Enter { name, distance } => {
            let id = find(stage, name, script_line.line)?;
            stage.overlap_begin(id);
            if let Some(d) = distance {
                stage.report_distance(id, *d);
            }
        }
        Step::Leave { name } => {
            let id = find(stage, name, script_line.line)?;
            stage.overlap_end(id);
        }
        Step::Interact => stage.interact_pressed(),
        Step::Release => stage.interact_released(),
        Step::Press => {
            stage.interact_pressed();
            stage.interact_released();
        }
        Step::Option(n) => stage.option_chosen(*n),
        Step::Wait(seconds) => {
            let ticks = wait_ticks(*seconds, tick)
                .map_err(|e| format!("line {}: {e}", script_line.line))?;
            let mut remaining = *seconds;
            for _ in 0..ticks {
                if remaining <= 1e-9 {
                    break;
                }
                let dt = remaining.min(tick);
                stage.tick(dt);
                remaining -= dt;
            }
        }
    }
    Ok(())
}

/// Number of `tick`-sized steps needed to cover `seconds`.
fn wait_ticks(seconds: f64, tick: f64) -> Result<u64, String> {
    let ticks = (seconds / tick).ceil();
    if !ticks.is_finite() || ticks > MAX_WAIT_TICKS as f64 {
        return Err(format!(
            "wait {seconds} needs more than {MAX_WAIT_TICKS} ticks of {tick}s"
        ));
    }
    Ok(ticks.max(0.0) as u64)
}

fn find(stage: &PlayStage, name: &str, line: usize) -> Result<InstanceId, String> {
    let resolved = super::resolve_name(stage.instances().map(|(_, i)| i.name()), name)
        .ok_or_else(|| format!("line {line}: no instance named '{name}'"))?;
    stage
        .find(resolved)
        .ok_or_else(|| format!("line {line}: no instance named '{name}'"))
}

/// Turns transcript entries into readable text, keeping the current line
/// open while letters keep arriving.
#[derive(Default)]
struct Renderer {
    out: String,
    open: bool,
}

impl Renderer {
    fn push(&mut self, entry: &TranscriptEntry) {
        match entry {
            TranscriptEntry::Line(speaker) => {
                self.close();
                self.out.push_str(&format!("{}: ", speaker.bold()));
                self.open = true;
            }
            TranscriptEntry::Letter(c) => {
                self.open = true;
                self.out.push(*c);
            }
            TranscriptEntry::Options(labels) => {
                self.close();
                for label in labels {
                    self.out.push_str(&format!("  - {label}\n"));
                }
            }
            TranscriptEntry::ItemName(name) => {
                self.close();
                self.out.push_str(&format!("[{}]\n", name.cyan()));
            }
            TranscriptEntry::ItemDescription(description) => {
                self.close();
                self.out.push_str(&format!("{description}\n"));
            }
            TranscriptEntry::Answer(accepted) => {
                self.close();
                let answer = if *accepted { "yes" } else { "no" };
                self.out.push_str(&format!("  > {}\n", answer.dimmed()));
            }
            TranscriptEntry::Audio(_) => {}
        }
    }

    fn close(&mut self) {
        if self.open {
            self.out.push('\n');
            self.open = false;
        }
    }

    fn finish(mut self) -> String {
        self.close();
        self.out
    }
}

fn print_state(stage: &PlayStage) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Instance", "Phase", "Position", "Finished"]);
    for (id, instance) in stage.instances() {
        table.add_row(vec![
            format!("{} {id}", instance.name()),
            instance.phase().to_string(),
            instance
                .position()
                .map_or_else(|| "-".to_string(), |p| p.to_string()),
            instance.finished().to_string(),
        ]);
    }
    println!("{table}");
}

fn print_events(stage: &PlayStage) {
    println!();
    println!("  {}", "Event Log".bold().underline());
    println!();
    let dropped = stage.events().dropped();
    if dropped > 0 {
        println!("  {}", format!("({dropped} earlier events dropped)").dimmed());
    }
    for event in stage.events().iter() {
        let tick_label = format!("[tick {:>3}]", event.tick).dimmed();
        let desc = match event.kind {
            StageEventKind::Branched { .. } => event.description.cyan().to_string(),
            StageEventKind::SaveRequested => event.description.green().bold().to_string(),
            StageEventKind::Finished | StageEventKind::Reset => {
                event.description.yellow().to_string()
            }
            _ => event.description.clone(),
        };
        println!("  {tick_label} {desc}");
    }
    if stage.events().is_empty() {
        println!("  {}", "(no events)".dimmed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_ticks_cover_the_duration() {
        assert_eq!(wait_ticks(1.0, 0.1), Ok(10));
        assert_eq!(wait_ticks(0.25, 0.1), Ok(3));
        assert_eq!(wait_ticks(0.0, 0.1), Ok(0));
    }

    #[test]
    fn wait_ticks_refuse_tiny_steps() {
        let err = wait_ticks(3600.0, 1e-9).unwrap_err();
        assert!(err.contains("more than 1000000 ticks"));
    }

    #[test]
    fn renderer_keeps_line_open_across_batches() {
        colored::control::set_override(false);
        let mut r = Renderer::default();
        r.push(&TranscriptEntry::Line("Guide".into()));
        r.push(&TranscriptEntry::Letter('H'));
        r.push(&TranscriptEntry::Letter('i'));
        r.push(&TranscriptEntry::Options(vec!["Again".into()]));
        r.push(&TranscriptEntry::Answer(true));

        assert_eq!(r.finish(), "Guide: Hi\n  - Again\n  > yes\n");
    }
}
