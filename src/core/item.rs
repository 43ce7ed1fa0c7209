use serde::{Deserialize, Serialize};

/// One unit of user-generated content, post or comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Combined text scanned for traits (title + body, or body alone)
    pub text: String,

    /// Sub-forum the item was posted in
    pub community: String,

    /// Stable locator used when attributing a trait
    pub reference: String,
}

impl ContentItem {
    pub fn new(
        text: impl Into<String>,
        community: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            community: community.into(),
            reference: reference.into(),
        }
    }
}
