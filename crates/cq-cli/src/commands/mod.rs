pub mod check;
pub mod input;
pub mod outline;
pub mod play;

use std::path::Path;

use cq_core::Library;
use strsim::jaro_winkler;

/// Minimum similarity score for fuzzy name matching (0.0-1.0).
const FUZZY_THRESHOLD: f64 = 0.8;

/// Load a library file, mapping failures to a printable message.
fn load_library(path: &Path) -> Result<Library, String> {
    Library::from_path(path).map_err(|e| format!("cannot load '{}': {e}", path.display()))
}

/// Pick a name from `candidates`: exact match first (case-insensitive),
/// then the best fuzzy match above the threshold.
fn resolve_name<'a>(candidates: impl IntoIterator<Item = &'a str>, input: &str) -> Option<&'a str> {
    let input_lower = input.to_lowercase();
    let mut best: Option<(&str, f64)> = None;

    for name in candidates {
        let name_lower = name.to_lowercase();
        if name_lower == input_lower {
            return Some(name);
        }
        let score = jaro_winkler(&input_lower, &name_lower);
        if score >= FUZZY_THRESHOLD && best.is_none_or(|(_, s)| score > s) {
            best = Some((name, score));
        }
    }

    if let Some((name, score)) = best {
        log::debug!("resolved '{input}' to '{name}' (score {score:.2})");
    }
    best.map(|(name, _)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_wins_over_fuzzy() {
        let names = ["Guide", "guid", "Crystal"];
        assert_eq!(resolve_name(names, "guid"), Some("guid"));
        assert_eq!(resolve_name(names, "GUIDE"), Some("Guide"));
    }

    #[test]
    fn fuzzy_match_tolerates_typos() {
        let names = ["Guide", "Crystal"];
        assert_eq!(resolve_name(names, "Crystl"), Some("Crystal"));
        assert_eq!(resolve_name(names, "zzz"), None);
    }
}
