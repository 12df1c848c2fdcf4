//! Local high score table persisted as `{"scores": [{"name", "score"}, ...]}`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

pub const PLACEHOLDER_NAME: &str = "PLAYER";
pub const NAME_MAX_LEN: usize = 16;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u64,
}

#[derive(Serialize)]
struct ScoreFile<'a> {
    scores: &'a [HighScoreEntry],
}

#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("failed to access leaderboard {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("leaderboard {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode leaderboard: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// False for characters that render as nothing or reorder text: controls,
/// format characters (zero-width, bidi overrides, BOM) and the line and
/// paragraph separators.
pub fn is_printable(ch: char) -> bool {
    if ch.is_control() {
        return false;
    }
    !matches!(
        ch,
        '\u{00AD}'
            | '\u{0600}'..='\u{0605}'
            | '\u{061C}'
            | '\u{06DD}'
            | '\u{070F}'
            | '\u{08E2}'
            | '\u{180E}'
            | '\u{200B}'..='\u{200F}'
            | '\u{2028}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206F}'
            | '\u{FEFF}'
            | '\u{FFF9}'..='\u{FFFB}'
            | '\u{110BD}'
            | '\u{110CD}'
            | '\u{13430}'..='\u{1343F}'
            | '\u{1BCA0}'..='\u{1BCA3}'
            | '\u{1D173}'..='\u{1D17A}'
            | '\u{E0001}'
            | '\u{E0020}'..='\u{E007F}'
    )
}

/// Makes any string a displayable name: line breaks and tabs become spaces,
/// other non-printable characters are dropped, whitespace runs collapse, and the
/// result is trimmed and capped at [`NAME_MAX_LEN`] characters.
pub fn sanitize_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len().min(NAME_MAX_LEN * 4));
    for ch in raw.chars() {
        let ch = if ch.is_whitespace() { ' ' } else { ch };
        if !is_printable(ch) {
            continue;
        }
        if ch == ' ' && (out.is_empty() || out.ends_with(' ')) {
            continue;
        }
        out.push(ch);
    }
    let capped: String = out.chars().take(NAME_MAX_LEN).collect();
    let trimmed = capped.trim();
    if trimmed.is_empty() { PLACEHOLDER_NAME.to_string() } else { trimmed.to_string() }
}

/// Stable descending sort; equal scores keep their insertion order.
fn rank(entries: &mut [HighScoreEntry]) {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
}

/// Where finished rounds are recorded. Neither call fails: faults degrade to
/// an empty table on load and to the in-memory ranking on save.
pub trait ScoreStore {
    fn load(&self) -> Vec<HighScoreEntry>;

    /// Records a result and returns the ranked, truncated table.
    fn save(&mut self, name: &str, score: i64, keep_max: usize) -> Vec<HighScoreEntry>;
}

fn insert_ranked(
    mut entries: Vec<HighScoreEntry>,
    name: &str,
    score: i64,
    keep_max: usize,
) -> Vec<HighScoreEntry> {
    entries.push(HighScoreEntry { name: sanitize_name(name), score: score.max(0) as u64 });
    rank(&mut entries);
    entries.truncate(keep_max.max(1));
    entries
}

#[derive(Clone, Debug)]
pub struct JsonLeaderboard {
    path: PathBuf,
}

impl JsonLeaderboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when there is no file yet.
    pub fn read(&self) -> Result<Option<Vec<HighScoreEntry>>, LeaderboardError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(LeaderboardError::Io { path: self.path.clone(), source }),
        };
        let payload: Value = serde_json::from_str(&text)
            .map_err(|source| LeaderboardError::Parse { path: self.path.clone(), source })?;
        let mut entries = entries_from_value(&payload);
        rank(&mut entries);
        Ok(Some(entries))
    }

    pub fn write(&self, entries: &[HighScoreEntry]) -> Result<(), LeaderboardError> {
        let text = serde_json::to_string_pretty(&ScoreFile { scores: entries })?;
        fs::write(&self.path, text)
            .map_err(|source| LeaderboardError::Io { path: self.path.clone(), source })
    }
}

impl ScoreStore for JsonLeaderboard {
    fn load(&self) -> Vec<HighScoreEntry> {
        match self.read() {
            Ok(entries) => entries.unwrap_or_default(),
            Err(err) => {
                warn!(error = %err, "ignoring unreadable leaderboard");
                Vec::new()
            }
        }
    }

    fn save(&mut self, name: &str, score: i64, keep_max: usize) -> Vec<HighScoreEntry> {
        let entries = insert_ranked(self.load(), name, score, keep_max);
        match self.write(&entries) {
            Ok(()) => info!(path = %self.path.display(), entries = entries.len(), "leaderboard saved"),
            Err(err) => warn!(error = %err, "leaderboard not persisted"),
        }
        entries
    }
}

/// Keeps the table in process memory only.
#[derive(Clone, Debug, Default)]
pub struct MemoryLeaderboard {
    entries: Vec<HighScoreEntry>,
}

impl MemoryLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryLeaderboard {
    fn load(&self) -> Vec<HighScoreEntry> {
        self.entries.clone()
    }

    fn save(&mut self, name: &str, score: i64, keep_max: usize) -> Vec<HighScoreEntry> {
        self.entries = insert_ranked(std::mem::take(&mut self.entries), name, score, keep_max);
        self.entries.clone()
    }
}

// Anything that is not the expected shape is skipped or defaulted.
fn entries_from_value(payload: &Value) -> Vec<HighScoreEntry> {
    let Some(items) = payload.get("scores").and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(Value::as_object)
        .map(|item| HighScoreEntry {
            name: item.get("name").and_then(Value::as_str).map_or_else(|| PLACEHOLDER_NAME.to_string(), sanitize_name),
            score: item.get("score").map_or(0, score_from_value),
        })
        .collect()
}

fn score_from_value(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_i64().map(|v| v.max(0) as u64))
            .or_else(|| n.as_f64().map(|v| v.trunc().max(0.0) as u64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse::<i64>().map_or(0, |v| v.max(0) as u64),
        Value::Bool(b) => u64::from(*b),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> JsonLeaderboard {
        let path = std::env::temp_dir().join(format!("snake-vibes-scores-{}-{name}.json", std::process::id()));
        let _ = fs::remove_file(&path);
        JsonLeaderboard::new(path)
    }

    fn entry(name: &str, score: u64) -> HighScoreEntry {
        HighScoreEntry { name: name.to_string(), score }
    }

    #[test]
    fn sanitize_trims_and_strips_tabs() {
        assert_eq!(sanitize_name("  Ann\t"), "Ann");
    }

    #[test]
    fn sanitize_empty_is_placeholder() {
        assert_eq!(sanitize_name(""), PLACEHOLDER_NAME);
        assert_eq!(sanitize_name(" \t\r\n "), PLACEHOLDER_NAME);
        assert_eq!(sanitize_name("\u{7}\u{1b}"), PLACEHOLDER_NAME);
    }

    #[test]
    fn sanitize_caps_length() {
        let name = sanitize_name(&"A".repeat(30));
        assert_eq!(name.chars().count(), 16);
    }

    #[test]
    fn sanitize_never_embeds_control_characters() {
        let name = sanitize_name("Bo\nb\u{0}by\r\n  Tables");
        assert_eq!(name, "Bo bby Tables");
        assert!(!name.chars().any(char::is_control));
    }

    #[test]
    fn sanitize_drops_invisible_format_characters() {
        assert_eq!(sanitize_name("A\u{200B}n\u{202E}n\u{FEFF}"), "Ann");
        assert_eq!(sanitize_name("\u{2066}\u{00AD}"), PLACEHOLDER_NAME);
        let name = sanitize_name("Le\u{2028}Roy");
        assert_eq!(name, "Le Roy");
        assert!(name.chars().all(is_printable));
    }

    #[test]
    fn printable_accepts_ordinary_text() {
        for ch in ['a', 'Z', ' ', '7', 'ë', '蛇', '!'] {
            assert!(is_printable(ch), "{ch:?}");
        }
        for ch in ['\n', '\u{0}', '\u{200D}', '\u{202E}', '\u{2029}', '\u{FEFF}', '\u{E0041}'] {
            assert!(!is_printable(ch), "{ch:?}");
        }
    }

    #[test]
    fn sanitize_keeps_unicode_letters() {
        assert_eq!(sanitize_name("Zoë 蛇"), "Zoë 蛇");
    }

    #[test]
    fn missing_file_loads_empty() {
        let board = scratch("missing");
        assert!(matches!(board.read(), Ok(None)));
        assert!(board.load().is_empty());
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let board = scratch("corrupt");
        fs::write(board.path(), "{ nope").unwrap();
        assert!(matches!(board.read(), Err(LeaderboardError::Parse { .. })));
        assert!(board.load().is_empty());
        let _ = fs::remove_file(board.path());
    }

    #[test]
    fn wrong_shapes_load_empty() {
        let board = scratch("shapes");
        for text in ["[1, 2, 3]", r#"{"scores": 5}"#, r#"{"other": []}"#, "null"] {
            fs::write(board.path(), text).unwrap();
            assert!(board.load().is_empty(), "{text}");
        }
        let _ = fs::remove_file(board.path());
    }

    #[test]
    fn lenient_entries_are_defaulted_and_ranked() {
        let board = scratch("lenient");
        let text = r#"{"scores": [
            {"name": "low", "score": 3},
            "garbage",
            {"score": "40"},
            {"name": "neg", "score": -9},
            {"name": "bad", "score": "lots"},
            {"name": "float", "score": 12.9},
            {"name": "  spaced\tout  "}
        ]}"#;
        fs::write(board.path(), text).unwrap();
        let loaded = board.load();
        assert_eq!(
            loaded,
            vec![
                entry(PLACEHOLDER_NAME, 40),
                entry("float", 12),
                entry("low", 3),
                entry("neg", 0),
                entry("bad", 0),
                entry("spaced out", 0),
            ]
        );
        let _ = fs::remove_file(board.path());
    }

    #[test]
    fn save_then_load_round_trip() {
        let mut board = scratch("round-trip");
        let saved = board.save("  Ann\t", -5, 50);
        assert_eq!(saved, vec![entry("Ann", 0)]);
        assert_eq!(board.load(), saved);

        let raw: Value = serde_json::from_str(&fs::read_to_string(board.path()).unwrap()).unwrap();
        assert_eq!(raw["scores"][0]["name"], "Ann");
        assert_eq!(raw["scores"][0]["score"], 0);
        let _ = fs::remove_file(board.path());
    }

    #[test]
    fn save_ranks_and_truncates() {
        let mut board = scratch("truncate");
        board.save("a", 10, 3);
        board.save("b", 30, 3);
        board.save("c", 20, 3);
        let saved = board.save("d", 5, 3);
        assert_eq!(saved, vec![entry("b", 30), entry("c", 20), entry("a", 10)]);
        assert_eq!(board.load(), saved);
        let _ = fs::remove_file(board.path());
    }

    #[test]
    fn duplicates_are_kept() {
        let mut board = MemoryLeaderboard::new();
        board.save("Ann", 10, 50);
        let saved = board.save("Ann", 10, 50);
        assert_eq!(saved, vec![entry("Ann", 10), entry("Ann", 10)]);
    }

    #[test]
    fn ties_keep_earlier_entry_first() {
        let mut board = MemoryLeaderboard::new();
        board.save("first", 10, 50);
        let saved = board.save("second", 10, 50);
        assert_eq!(saved[0].name, "first");
    }

    #[test]
    fn keep_max_is_at_least_one() {
        let mut board = MemoryLeaderboard::new();
        assert_eq!(board.save("solo", 1, 0).len(), 1);
    }

    #[test]
    fn failed_write_still_returns_ranking() {
        // A directory cannot be written as a file.
        let mut board = JsonLeaderboard::new(std::env::temp_dir());
        let saved = board.save("Ann", 25, 50);
        assert_eq!(saved, vec![entry("Ann", 25)]);
    }
}
