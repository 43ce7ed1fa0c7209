use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::attribution::{TraitState, TraitValue};
use super::frequency::{
    FrequencyAggregator, DEFAULT_COMMUNITY_PREFIX, DEFAULT_TOP_COMMUNITIES, DEFAULT_TOP_WORDS,
};
use super::item::ContentItem;
use super::normalize::normalize;

/// Final persona summary for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaRecord {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<TraitValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<TraitValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupation: Option<TraitValue>,
    /// Most frequent words, highest count first
    pub interests: Vec<String>,
    /// Most frequent communities with the community prefix applied
    pub communities: Vec<String>,
}

/// Ranking knobs for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub top_words: usize,
    pub top_communities: usize,
    pub community_prefix: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            top_words: DEFAULT_TOP_WORDS,
            top_communities: DEFAULT_TOP_COMMUNITIES,
            community_prefix: DEFAULT_COMMUNITY_PREFIX.to_string(),
        }
    }
}

/// Accumulates trait and frequency state over one user's items.
///
/// A builder is consumed by `finish`, so one builder is one run.
pub struct PersonaBuilder {
    username: String,
    options: BuildOptions,
    traits: TraitState,
    frequencies: FrequencyAggregator,
    processed: usize,
}

impl PersonaBuilder {
    pub fn new(username: &str) -> Self {
        Self::with_options(username, BuildOptions::default())
    }

    pub fn with_options(username: &str, options: BuildOptions) -> Self {
        let frequencies = FrequencyAggregator::new(&options.community_prefix);
        Self {
            username: username.to_string(),
            options,
            traits: TraitState::new(),
            frequencies,
            processed: 0,
        }
    }

    /// Feed one item. Items must arrive in processing order.
    pub fn process(&mut self, item: &ContentItem) {
        self.frequencies.add_community(&item.community);

        for kind in self.traits.consider(&item.text, &item.reference) {
            debug!(trait_kind = %kind, source = %item.reference, "trait resolved");
        }

        self.frequencies.add_words(normalize(&item.text));
        self.processed += 1;
    }

    pub fn process_all<'a, I>(&mut self, items: I)
    where
        I: IntoIterator<Item = &'a ContentItem>,
    {
        for item in items {
            self.process(item);
        }
    }

    pub fn traits(&self) -> &TraitState {
        &self.traits
    }

    pub fn frequencies(&self) -> &FrequencyAggregator {
        &self.frequencies
    }

    pub fn finish(self) -> PersonaRecord {
        let interests = self.frequencies.top_words(self.options.top_words);
        let communities = self.frequencies.top_communities(self.options.top_communities);

        info!(
            username = %self.username,
            items = self.processed,
            distinct_words = self.frequencies.words().len(),
            distinct_communities = self.frequencies.communities().len(),
            "persona built"
        );

        let TraitState {
            age,
            location,
            occupation,
        } = self.traits;

        PersonaRecord {
            username: self.username,
            age,
            location,
            occupation,
            interests,
            communities,
        }
    }
}

/// Build a persona from posts then comments, each in the order given.
pub fn build(username: &str, posts: &[ContentItem], comments: &[ContentItem]) -> PersonaRecord {
    build_with_options(username, posts, comments, BuildOptions::default())
}

pub fn build_with_options(
    username: &str,
    posts: &[ContentItem],
    comments: &[ContentItem],
    options: BuildOptions,
) -> PersonaRecord {
    build_from_items(username, posts.iter().chain(comments.iter()), options)
}

/// Build a persona from a single already-ordered sequence.
pub fn build_from_items<'a, I>(username: &str, items: I, options: BuildOptions) -> PersonaRecord
where
    I: IntoIterator<Item = &'a ContentItem>,
{
    let mut builder = PersonaBuilder::with_options(username, options);
    builder.process_all(items);
    builder.finish()
}
