/// Lowercase and split on whitespace.
fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(|w| w.to_lowercase()).collect()
}

/// A parsed free-text query. Every term must appear as a substring of some
/// word of the title, ignoring case. An empty query matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    terms: Vec<String>,
}

impl Query {
    pub fn parse(query: &str) -> Self {
        Query {
            terms: tokenize(query),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn matches(&self, title: &str) -> bool {
        let words = tokenize(title);
        self.terms
            .iter()
            .all(|term| words.iter().any(|word| word.contains(term.as_str())))
    }
}
