use std::fs;

/// Read the stored high score: a single decimal integer in a text file.
/// A missing or unparseable file reads as 0.
pub fn load_high_score(path: &str) -> u32 {
    fs::read_to_string(path)
        .ok()
        .and_then(|contents| contents.trim().parse().ok())
        .unwrap_or(0)
}

/// Persist a new high score. Best effort: a write failure is reported and
/// the game keeps running with the in-memory value.
pub fn save_high_score(path: &str, score: u32) {
    if let Err(e) = fs::write(path, score.to_string()) {
        eprintln!("Warning: failed to save high score to {}: {}", path, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_zero() {
        assert_eq!(load_high_score("does_not_exist_high_score.txt"), 0);
    }

    #[test]
    fn test_round_trip() {
        let path = std::env::temp_dir().join("gridpilot_high_score_test.txt");
        let path = path.to_str().unwrap();

        save_high_score(path, 42);
        assert_eq!(load_high_score(path), 42);

        fs::write(path, "not a number").unwrap();
        assert_eq!(load_high_score(path), 0);

        let _ = fs::remove_file(path);
    }
}
