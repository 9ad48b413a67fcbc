//! Line-based input scripts for `colloquy play`.
//!
//! One command per line; blank lines and `#` comments are skipped.
//!
//! ```text
//! enter guide 1.5   # overlap begins, optional distance
//! press             # interact pressed then released
//! wait 1.0
//! option 1
//! leave guide
//! ```

use std::fmt;

/// Longest single `wait`, in seconds.
pub const MAX_WAIT_SECONDS: f64 = 3600.0;

/// One input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Enter { name: String, distance: Option<f64> },
    Leave { name: String },
    Interact,
    Release,
    Press,
    Option(u8),
    Wait(f64),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enter {
                name,
                distance: Some(d),
            } => write!(f, "enter {name} {d}"),
            Self::Enter { name, .. } => write!(f, "enter {name}"),
            Self::Leave { name } => write!(f, "leave {name}"),
            Self::Interact => write!(f, "interact"),
            Self::Release => write!(f, "release"),
            Self::Press => write!(f, "press"),
            Self::Option(n) => write!(f, "option {n}"),
            Self::Wait(s) => write!(f, "wait {s}"),
        }
    }
}

/// A step with the 1-based line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    pub line: usize,
    pub step: Step,
}

/// Parse a whole input script, reporting the first bad line.
pub fn parse_script(text: &str) -> Result<Vec<ScriptLine>, String> {
    let mut steps = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let content = raw.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }
        let step = parse_step(content).map_err(|e| format!("line {line}: {e}"))?;
        steps.push(ScriptLine { line, step });
    }
    Ok(steps)
}

fn parse_step(content: &str) -> Result<Step, String> {
    let mut words = content.split_whitespace();
    let command = words.next().unwrap_or("").to_lowercase();
    let args: Vec<&str> = words.collect();

    match command.as_str() {
        "enter" => {
            let (name, distance) = match args.as_slice() {
                [] => return Err("enter needs an instance name".into()),
                [rest @ .., last] if !rest.is_empty() && last.parse::<f64>().is_ok() => {
                    (rest.join(" "), last.parse::<f64>().ok())
                }
                all => (all.join(" "), None),
            };
            Ok(Step::Enter { name, distance })
        }
        "leave" => {
            if args.is_empty() {
                return Err("leave needs an instance name".into());
            }
            Ok(Step::Leave {
                name: args.join(" "),
            })
        }
        "interact" => no_args(&args, Step::Interact),
        "release" => no_args(&args, Step::Release),
        "press" => no_args(&args, Step::Press),
        "option" => match args.as_slice() {
            [n] => n
                .parse::<u8>()
                .map(Step::Option)
                .map_err(|_| format!("'{n}' is not an option number (0-255)")),
            _ => Err("option needs exactly one number".into()),
        },
        "wait" => match args.as_slice() {
            [s] => match s.parse::<f64>() {
                Ok(secs) if secs > MAX_WAIT_SECONDS => Err(format!(
                    "wait {s} is longer than {MAX_WAIT_SECONDS} seconds"
                )),
                Ok(secs) if secs.is_finite() && secs >= 0.0 => Ok(Step::Wait(secs)),
                _ => Err(format!("'{s}' is not a duration in seconds")),
            },
            _ => Err("wait needs exactly one duration".into()),
        },
        other => Err(format!("unknown command '{other}'")),
    }
}

fn no_args(args: &[&str], step: Step) -> Result<Step, String> {
    if args.is_empty() {
        Ok(step)
    } else {
        Err(format!("'{step}' takes no arguments"))
    }
}
