//! Built-in word-list dictionary.
//!
//! Ranking: exact word, then prefix completions by descending frequency,
//! then single-edit corrections by descending frequency. Corrections are
//! found with a symmetric-delete index so lookup cost does not grow with the
//! list size.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::info;

use super::SpellDictionary;
use crate::error::{Result, SignscribeError};

#[derive(Debug, Clone, Default)]
pub struct WordListDictionary {
    /// Lowercase words sorted ascending, for prefix range scans.
    words: Vec<String>,
    frequency: HashMap<String, u64>,
    /// Every word with one character removed → indices into `words`.
    deletes: HashMap<String, Vec<usize>>,
}

impl WordListDictionary {
    /// Build from `(word, frequency)` pairs. Later duplicates keep the
    /// higher frequency.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let mut frequency: HashMap<String, u64> = HashMap::new();
        for (word, freq) in entries {
            let word = word.as_ref().trim().to_lowercase();
            if word.is_empty() || !word.chars().all(char::is_alphabetic) {
                continue;
            }
            let slot = frequency.entry(word).or_insert(0);
            *slot = (*slot).max(freq);
        }

        let mut words: Vec<String> = frequency.keys().cloned().collect();
        words.sort();

        let mut deletes: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, word) in words.iter().enumerate() {
            for variant in single_deletes(word) {
                deletes.entry(variant).or_default().push(i);
            }
        }

        Self {
            words,
            frequency,
            deletes,
        }
    }

    /// Words with frequency 1.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_entries(words.into_iter().map(|w| (w, 1)))
    }

    /// Load `word` or `word<TAB>frequency` lines. Blank lines and lines
    /// starting with `#` are skipped.
    ///
    /// # Errors
    /// `Io` if the file cannot be read, `Dictionary` on a bad frequency.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let mut entries = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (word, freq) = match line.split_once('\t') {
                Some((word, freq)) => {
                    let freq = freq.trim().parse::<u64>().map_err(|e| {
                        SignscribeError::Dictionary(format!(
                            "{}:{}: bad frequency {freq:?}: {e}",
                            path.display(),
                            line_no + 1
                        ))
                    })?;
                    (word, freq)
                }
                None => (line, 1),
            };
            entries.push((word.to_owned(), freq));
        }
        let dict = Self::from_entries(entries);
        info!(path = %path.display(), words = dict.len(), "word list loaded");
        Ok(dict)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.frequency.contains_key(&word.to_lowercase())
    }

    fn freq(&self, word: &str) -> u64 {
        self.frequency.get(word).copied().unwrap_or(0)
    }

    fn completions(&self, prefix: &str) -> Vec<&str> {
        let start = self.words.partition_point(|w| w.as_str() < prefix);
        let mut found: Vec<&str> = self.words[start..]
            .iter()
            .take_while(|w| w.starts_with(prefix))
            .map(String::as_str)
            .filter(|w| *w != prefix)
            .collect();
        found.sort_by_key(|w| std::cmp::Reverse(self.freq(w)));
        found
    }

    /// Words within one insert, delete or substitution of `word`.
    fn corrections(&self, word: &str) -> Vec<&str> {
        let mut hits: HashSet<usize> = HashSet::new();
        // word is a delete of a dictionary word (one insertion away)
        if let Some(ids) = self.deletes.get(word) {
            hits.extend(ids);
        }
        for variant in single_deletes(word) {
            // dictionary word is a delete of word (one deletion away)
            if let Ok(i) = self.words.binary_search(&variant) {
                hits.insert(i);
            }
            // shared delete: substitution, or a transposition of neighbours
            if let Some(ids) = self.deletes.get(&variant) {
                hits.extend(ids);
            }
        }
        let mut found: Vec<&str> = hits
            .into_iter()
            .map(|i| self.words[i].as_str())
            .filter(|w| *w != word && within_one_edit(word, w))
            .collect();
        found.sort_by(|a, b| self.freq(b).cmp(&self.freq(a)).then_with(|| a.cmp(b)));
        found
    }
}

impl SpellDictionary for WordListDictionary {
    fn suggest(&mut self, word: &str, limit: usize) -> Result<Vec<String>> {
        let word = word.trim().to_lowercase();
        if word.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let mut ranked: Vec<&str> = Vec::with_capacity(limit);
        if self.frequency.contains_key(&word) {
            ranked.push(&word);
        }
        for candidate in self.completions(&word).into_iter().chain(self.corrections(&word)) {
            if ranked.len() >= limit {
                break;
            }
            if !ranked.contains(&candidate) {
                ranked.push(candidate);
            }
        }
        ranked.truncate(limit);
        Ok(ranked.into_iter().map(str::to_owned).collect())
    }
}

fn single_deletes(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    (0..chars.len())
        .map(|skip| {
            chars
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != skip)
                .map(|(_, c)| *c)
                .collect()
        })
        .collect()
}

/// Levenshtein distance ≤ 1.
fn within_one_edit(a: &str, b: &str) -> bool {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (short, long) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    match long.len() - short.len() {
        0 => short.iter().zip(long.iter()).filter(|(x, y)| x != y).count() <= 1,
        1 => {
            let split = short
                .iter()
                .zip(long.iter())
                .position(|(x, y)| x != y)
                .unwrap_or(short.len());
            short[split..] == long[split + 1..]
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict() -> WordListDictionary {
        WordListDictionary::from_entries([
            ("world", 50),
            ("word", 80),
            ("work", 30),
            ("worry", 5),
            ("hello", 90),
            ("help", 40),
        ])
    }

    #[test]
    fn completions_rank_by_frequency() {
        let mut d = dict();
        assert_eq!(
            d.suggest("WOR", 4).expect("lookup"),
            vec!["word", "world", "work", "worry"]
        );
    }

    #[test]
    fn exact_word_comes_first() {
        let mut d = dict();
        let hits = d.suggest("word", 4).expect("lookup");
        assert_eq!(hits[0], "word");
        assert!(hits.contains(&"world".to_owned()));
    }

    #[test]
    fn single_edit_corrections_follow_completions() {
        let mut d = dict();
        // no completions for "helo"; "hello" is one insertion, "help" one substitution
        assert_eq!(d.suggest("helo", 4).expect("lookup"), vec!["hello", "help"]);
        // "wrld" is one deletion from "world"
        assert_eq!(d.suggest("wrld", 4).expect("lookup"), vec!["world"]);
    }

    #[test]
    fn limit_and_empty_word() {
        let mut d = dict();
        assert_eq!(d.suggest("wor", 2).expect("lookup").len(), 2);
        assert!(d.suggest("", 4).expect("lookup").is_empty());
        assert!(d.suggest("zzzzzz", 4).expect("lookup").is_empty());
    }

    #[test]
    fn edit_distance_check() {
        assert!(within_one_edit("cat", "cut"));
        assert!(within_one_edit("cat", "cart"));
        assert!(within_one_edit("cart", "cat"));
        assert!(!within_one_edit("cat", "dog"));
        assert!(!within_one_edit("cat", "carts"));
    }

    #[test]
    fn non_alphabetic_entries_are_skipped() {
        let d = WordListDictionary::from_words(["ok", "it's", "x1", ""]);
        assert_eq!(d.len(), 1);
        assert!(d.contains("OK"));
    }

    #[test]
    fn load_reads_tab_separated_frequencies() {
        let path = std::env::temp_dir().join(format!(
            "signscribe-wordlist-{}.txt",
            std::process::id()
        ));
        std::fs::write(&path, "# words\nalpha\t3\nalpine\t9\n\nalps\n").expect("write list");
        let mut d = WordListDictionary::load(&path).expect("load list");
        let _ = std::fs::remove_file(&path);
        assert_eq!(d.len(), 3);
        assert_eq!(
            d.suggest("alp", 4).expect("lookup"),
            vec!["alpine", "alpha", "alps"]
        );
    }

    #[test]
    fn load_rejects_bad_frequency() {
        let path = std::env::temp_dir().join(format!(
            "signscribe-badlist-{}.txt",
            std::process::id()
        ));
        std::fs::write(&path, "alpha\tlots\n").expect("write list");
        let err = WordListDictionary::load(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);
        assert!(matches!(err, SignscribeError::Dictionary(_)));
    }
}
