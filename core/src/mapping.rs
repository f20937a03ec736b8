use std::collections::BTreeSet;
use std::collections::HashMap;

use tracing::debug;
use tracing::trace;

/// Mapping from a trimmed commit message to the tags that pointed at the
/// commit carrying that message.
///
/// Built once from the mapping file and read-only afterwards. Multiple tags
/// may share one message; if the same message key recurs on a later line, the
/// later line wins for lookups, but every tag token ever seen stays in
/// [`TagMapping::all_tags`] so it is reported as unresolved rather than
/// silently dropped.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TagMapping {
    message_to_tags: HashMap<String, BTreeSet<String>>,
    all_tags: BTreeSet<String>,
}

impl TagMapping {
    /// Parses mapping text, one candidate record per line, of the shape
    /// `(tag: T1, tag: T2, ...) original commit message`.
    ///
    /// Lines that do not match this shape are discarded, not an error. Zero
    /// matching lines yields an empty mapping, which resolves trivially.
    pub fn parse(text: &str) -> Self {
        let mut mapping = Self::default();
        for line in text.lines() {
            let Some((decoration, message)) = split_decoration(line) else {
                debug!("discarding mapping line: {line}");
                continue;
            };
            let tags = parse_tag_list(decoration);
            if tags.is_empty() {
                debug!("discarding mapping line with empty tag list: {line}");
                continue;
            }
            trace!("mapping entry: {message:?} -> {tags:?}");
            mapping.all_tags.extend(tags.iter().cloned());
            mapping.message_to_tags.insert(message.to_string(), tags);
        }
        mapping
    }

    /// Tags recorded for the given (trimmed) commit message, if any.
    pub fn tags_for(&self, message: &str) -> Option<&BTreeSet<String>> {
        self.message_to_tags.get(message)
    }

    /// Every tag token that appeared in any decoration, deduplicated.
    pub fn all_tags(&self) -> &BTreeSet<String> {
        &self.all_tags
    }

    /// Number of distinct message keys.
    pub fn len(&self) -> usize {
        self.message_to_tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.message_to_tags.is_empty()
    }
}

/// Splits `(decoration) message` into its two halves.
///
/// The decoration is the span between a leading `(` and the first `)`;
/// a space must follow the close paren. Scanning for the first close paren
/// keeps messages containing literal parentheses deterministic: they always
/// belong to the message half.
fn split_decoration(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix('(')?;
    let close = rest.find(')')?;
    let tail = rest[close + 1..].strip_prefix(' ')?;
    Some((&rest[..close], tail.trim()))
}

/// Splits a decoration body on commas, dropping the optional `tag:` prefix
/// and surrounding whitespace from each element. Empty elements are skipped.
fn parse_tag_list(decoration: &str) -> BTreeSet<String> {
    decoration
        .split(',')
        .map(|raw| {
            let trimmed = raw.trim();
            trimmed.strip_prefix("tag:").unwrap_or(trimmed).trim()
        })
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
