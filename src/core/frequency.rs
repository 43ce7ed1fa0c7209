use std::collections::HashMap;

pub const DEFAULT_TOP_WORDS: usize = 10;
pub const DEFAULT_TOP_COMMUNITIES: usize = 5;
pub const DEFAULT_COMMUNITY_PREFIX: &str = "r/";

/// Occurrence counter that remembers first-insertion order.
///
/// `most_common` ranks by count descending and falls back to insertion
/// order for equal counts.
#[derive(Debug, Clone, Default)]
pub struct Counter {
    index: HashMap<String, usize>,
    entries: Vec<(String, usize)>,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), 1));
            }
        }
    }

    pub fn count(&self, key: &str) -> usize {
        self.index.get(key).map(|&pos| self.entries[pos].1).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    pub fn most_common(&self, k: usize) -> Vec<(String, usize)> {
        let mut ranked = self.entries.clone();
        // stable sort keeps insertion order among ties
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(k);
        ranked
    }
}

/// Word and community counters for a single run.
#[derive(Debug, Clone)]
pub struct FrequencyAggregator {
    words: Counter,
    communities: Counter,
    community_prefix: String,
}

impl Default for FrequencyAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_COMMUNITY_PREFIX)
    }
}

impl FrequencyAggregator {
    pub fn new(community_prefix: &str) -> Self {
        Self {
            words: Counter::new(),
            communities: Counter::new(),
            community_prefix: community_prefix.to_string(),
        }
    }

    pub fn add_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.words.add(word.as_ref());
        }
    }

    pub fn add_community(&mut self, name: &str) {
        self.communities.add(name);
    }

    pub fn words(&self) -> &Counter {
        &self.words
    }

    pub fn communities(&self) -> &Counter {
        &self.communities
    }

    pub fn top_words(&self, k: usize) -> Vec<String> {
        self.words
            .most_common(k)
            .into_iter()
            .map(|(word, _)| word)
            .collect()
    }

    pub fn top_communities(&self, k: usize) -> Vec<String> {
        self.communities
            .most_common(k)
            .into_iter()
            .map(|(name, _)| format!("{}{}", self.community_prefix, name))
            .collect()
    }
}
