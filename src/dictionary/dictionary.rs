use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

/// Wildcard in dictionary queries, standing for a joker-placed letter.
pub const WILDCARD: char = '?';

/// Word-validity oracle backed by a one-word-per-line file, indexed by
/// length so wildcard queries only scan candidates of the right size.
#[derive(Debug, Default)]
pub struct Dictionary {
    by_length: HashMap<usize, Vec<String>>,
    ready: bool,
}

impl Dictionary {
    /// A missing or unreadable file leaves the dictionary empty: every
    /// lookup then answers false, and the engine keeps running.
    pub fn new(file_path: &str) -> Self {
        match Self::load_from_file(file_path) {
            Ok(dictionary) => {
                let count: usize = dictionary.by_length.values().map(Vec::len).sum();
                println!("Loaded {} words from {}", count, file_path);
                dictionary
            }
            Err(e) => {
                eprintln!("Failed to load dictionary at {}: {}", file_path, e);
                Dictionary::default()
            }
        }
    }

    pub fn from_words<'a, I>(words: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut dictionary = Dictionary {
            by_length: HashMap::new(),
            ready: true,
        };
        for word in words {
            dictionary.insert(word);
        }
        dictionary
    }

    fn load_from_file(file_path: &str) -> io::Result<Self> {
        let file = File::open(Path::new(file_path))?;
        let reader = io::BufReader::new(file);
        let mut dictionary = Dictionary {
            by_length: HashMap::new(),
            ready: true,
        };
        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if !word.is_empty() {
                dictionary.insert(word);
            }
        }
        Ok(dictionary)
    }

    fn insert(&mut self, word: &str) {
        let word = word.to_uppercase();
        self.by_length
            .entry(word.chars().count())
            .or_default()
            .push(word);
    }

    /// The oracle contract: upper-cased word, wildcards for jokers, plain
    /// yes/no. Unknown lengths and unloaded dictionaries answer false.
    pub fn is_word_valid(&self, word: &str) -> bool {
        if !self.ready || word.is_empty() {
            return false;
        }
        let query = word.to_uppercase();
        let length = query.chars().count();
        let Some(pool) = self.by_length.get(&length) else {
            return false;
        };
        if !query.contains(WILDCARD) {
            return pool.iter().any(|candidate| candidate == &query);
        }
        pool.iter()
            .any(|candidate| matches_pattern(candidate, &query))
    }
}

fn matches_pattern(candidate: &str, pattern: &str) -> bool {
    candidate
        .chars()
        .zip(pattern.chars())
        .all(|(c, p)| p == WILDCARD || c == p)
}
