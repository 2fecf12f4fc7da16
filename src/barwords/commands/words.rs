use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::info;

/// Turns raw text into a word list: one trimmed word per line, at least
/// `min_length` characters, first occurrence kept, at most `max_words`.
pub fn build_list(text: &str, min_length: usize, max_words: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    text.lines()
        .map(str::trim)
        .filter(|w| !w.is_empty() && w.chars().count() >= min_length)
        .filter(|w| seen.insert(*w))
        .take(max_words)
        .map(str::to_string)
        .collect()
}

pub fn run(input: &Path, output: &Path, min_length: usize, max_words: usize) -> Result<CmdResult> {
    let text = fs::read_to_string(input)?;
    let words = build_list(&text, min_length, max_words);

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut content = words.join("\n");
    content.push('\n');
    fs::write(output, content)?;
    info!(count = words.len(), path = %output.display(), "word list written");

    let mut result = CmdResult::default();
    if words.is_empty() {
        result.add_message(CmdMessage::warning(format!(
            "No words of {} or more characters in {}",
            min_length,
            input.display()
        )));
    }
    result.add_message(CmdMessage::success(format!(
        "Wrote {} words to {}",
        words.len(),
        output.display()
    )));
    result.written_paths.push(output.to_path_buf());
    Ok(result.with_words(words))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::WordDictionary;

    #[test]
    fn filters_short_blank_and_repeated() {
        let text = "  able\n\nox\nacid\nable\nAged \n";
        assert_eq!(build_list(text, 4, 10), vec!["able", "acid", "Aged"]);
    }

    #[test]
    fn min_length_counts_characters() {
        assert_eq!(build_list("café\ncafe\nçà", 4, 10), vec!["café", "cafe"]);
    }

    #[test]
    fn truncates_to_max_words() {
        let text = (0..20).map(|i| format!("word{:02}", i)).collect::<Vec<_>>().join("\n");
        let words = build_list(&text, 4, 5);
        assert_eq!(words.len(), 5);
        assert_eq!(words[4], "word04");
    }

    #[test]
    fn run_writes_loadable_dictionary() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("raw.txt");
        let output = dir.path().join("lists").join("words.txt");
        fs::write(&input, "able\nacid\nacid\nto\n").unwrap();

        let result = run(&input, &output, 4, 9999).unwrap();
        assert_eq!(result.written_paths, vec![output.clone()]);

        let dict = WordDictionary::load(&output).unwrap();
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.index_of("acid"), Some(1));
    }
}
