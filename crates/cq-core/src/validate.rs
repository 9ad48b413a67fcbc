//! Authoring checks for dialogue libraries.
//!
//! The runtime never validates question references or tree shape; it
//! silently ignores anything it cannot follow. These checks surface those
//! mistakes at authoring time instead.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::library::{Library, Placement};
use crate::node::Position;
use crate::script::DialogueScript;

/// How serious a validation issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// The data cannot behave as authored.
    Error,
    /// The data works but is probably not what was intended.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// A problem found while checking a library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Where the issue was found, e.g. `script 'guide'`.
    pub subject: String,
    /// A human-readable description of the issue.
    pub message: String,
    /// Error or warning.
    pub severity: Severity,
}

impl ValidationIssue {
    fn error(subject: &str, message: impl Into<String>) -> Self {
        Self {
            subject: subject.to_string(),
            message: message.into(),
            severity: Severity::Error,
        }
    }

    fn warning(subject: &str, message: impl Into<String>) -> Self {
        Self {
            subject: subject.to_string(),
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    /// Whether this issue is an error.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.subject, self.message)
    }
}

/// Check every script and placement in a library.
pub fn validate_library(library: &Library) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for (name, script) in &library.scripts {
        issues.extend(validate_script(name, script));
    }

    let mut seen_names = HashSet::new();
    for placement in &library.placements {
        let subject = format!("placement '{}'", placement.name());
        if !seen_names.insert(placement.name()) {
            issues.push(ValidationIssue::warning(
                &subject,
                "another placement has the same name",
            ));
        }
        if let Placement::Conversation { script, .. } = placement {
            if library.script(script).is_none() {
                issues.push(ValidationIssue::error(
                    &subject,
                    format!("unknown script '{script}'"),
                ));
            }
        }
    }

    issues
}

/// Check a single script's tree shape and question references.
pub fn validate_script(name: &str, script: &DialogueScript) -> Vec<ValidationIssue> {
    let subject = format!("script '{name}'");
    let mut issues = Vec::new();

    if script.conversations.is_empty() {
        issues.push(ValidationIssue::warning(&subject, "no conversations"));
    }

    check_tree(&subject, script, &mut issues);
    check_questions(&subject, script, &mut issues);

    issues
}

fn check_tree(subject: &str, script: &DialogueScript, issues: &mut Vec<ValidationIssue>) {
    report_duplicate_ids(
        subject,
        "conversation",
        script.conversations.iter().map(|c| c.id),
        issues,
    );

    for (ci, conversation) in script.conversations.iter().enumerate() {
        if conversation.dialogues.is_empty() {
            issues.push(ValidationIssue::warning(
                subject,
                format!("conversation {ci} has no dialogues"),
            ));
        }
        report_duplicate_ids(
            subject,
            &format!("dialogue in conversation {ci}"),
            conversation.dialogues.iter().map(|d| d.id),
            issues,
        );

        for (di, dialogue) in conversation.dialogues.iter().enumerate() {
            if dialogue.subtitles.is_empty() {
                issues.push(ValidationIssue::warning(
                    subject,
                    format!("dialogue ({ci}, {di}) has no subtitles"),
                ));
            }
            report_duplicate_ids(
                subject,
                &format!("subtitle in dialogue ({ci}, {di})"),
                dialogue.subtitles.iter().map(|s| s.id),
                issues,
            );
        }
    }

    for (position, _, subtitle) in script.lines() {
        if !subtitle.duration.is_finite() || subtitle.duration < 0.0 {
            issues.push(ValidationIssue::error(
                subject,
                format!(
                    "subtitle {position} has invalid duration {}",
                    subtitle.duration
                ),
            ));
        }
        if subtitle.has_question && script.questions_at(position).next().is_none() {
            issues.push(ValidationIssue::warning(
                subject,
                format!("subtitle {position} asks a question but has no options"),
            ));
        }
    }
}

fn check_questions(subject: &str, script: &DialogueScript, issues: &mut Vec<ValidationIssue>) {
    let mut seen: HashMap<(Position, u8), usize> = HashMap::new();

    for (qi, question) in script.questions.iter().enumerate() {
        let reference = question.reference();
        let label = &question.label;

        match script.subtitle(reference) {
            None => issues.push(ValidationIssue::error(
                subject,
                format!("question {qi} ('{label}') references missing subtitle {reference}"),
            )),
            Some(sub) if !sub.has_question => issues.push(ValidationIssue::error(
                subject,
                format!(
                    "question {qi} ('{label}') references subtitle {reference}, which asks no question"
                ),
            )),
            Some(_) => {}
        }

        if script.conversation(question.target).is_none() {
            issues.push(ValidationIssue::error(
                subject,
                format!(
                    "question {qi} ('{label}') targets missing conversation {}",
                    question.target
                ),
            ));
        }

        if question.option == 0 {
            issues.push(ValidationIssue::warning(
                subject,
                format!("question {qi} ('{label}') uses option 0, which can never be chosen"),
            ));
        }

        if let Some(first) = seen.insert((reference, question.option), qi) {
            // Keep the earliest index so later duplicates all point at the winner.
            seen.insert((reference, question.option), first);
            issues.push(ValidationIssue::warning(
                subject,
                format!(
                    "question {qi} ('{label}') duplicates option {} of question {first} at {reference}; question {first} wins",
                    question.option
                ),
            ));
        }
    }
}

fn report_duplicate_ids(
    subject: &str,
    what: &str,
    ids: impl Iterator<Item = u32>,
    issues: &mut Vec<ValidationIssue>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            issues.push(ValidationIssue::warning(
                subject,
                format!("duplicate {what} id {id}"),
            ));
        }
    }
}
