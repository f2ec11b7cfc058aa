use std::collections::HashMap;

use lexicard_core::language::{TaggedToken, Token};

/// Closed-class words with a fixed Penn Treebank tag
const CLOSED_CLASS: &[(&str, &str)] = &[
    ("the", "DT"),
    ("a", "DT"),
    ("an", "DT"),
    ("this", "DT"),
    ("that", "DT"),
    ("these", "DT"),
    ("those", "DT"),
    ("every", "DT"),
    ("each", "DT"),
    ("some", "DT"),
    ("any", "DT"),
    ("no", "DT"),
    ("i", "PRP"),
    ("you", "PRP"),
    ("he", "PRP"),
    ("she", "PRP"),
    ("it", "PRP"),
    ("we", "PRP"),
    ("they", "PRP"),
    ("me", "PRP"),
    ("him", "PRP"),
    ("us", "PRP"),
    ("them", "PRP"),
    ("my", "PRP$"),
    ("your", "PRP$"),
    ("his", "PRP$"),
    ("her", "PRP$"),
    ("its", "PRP$"),
    ("our", "PRP$"),
    ("their", "PRP$"),
    ("in", "IN"),
    ("on", "IN"),
    ("at", "IN"),
    ("of", "IN"),
    ("for", "IN"),
    ("with", "IN"),
    ("from", "IN"),
    ("by", "IN"),
    ("about", "IN"),
    ("into", "IN"),
    ("over", "IN"),
    ("under", "IN"),
    ("after", "IN"),
    ("before", "IN"),
    ("between", "IN"),
    ("through", "IN"),
    ("during", "IN"),
    ("without", "IN"),
    ("against", "IN"),
    ("among", "IN"),
    ("than", "IN"),
    ("because", "IN"),
    ("if", "IN"),
    ("while", "IN"),
    ("although", "IN"),
    ("since", "IN"),
    ("until", "IN"),
    ("as", "IN"),
    ("and", "CC"),
    ("or", "CC"),
    ("but", "CC"),
    ("nor", "CC"),
    ("yet", "CC"),
    ("so", "CC"),
    ("to", "TO"),
    ("can", "MD"),
    ("could", "MD"),
    ("will", "MD"),
    ("would", "MD"),
    ("shall", "MD"),
    ("should", "MD"),
    ("may", "MD"),
    ("might", "MD"),
    ("must", "MD"),
    ("'ll", "MD"),
    ("'d", "MD"),
    ("is", "VBZ"),
    ("'s", "VBZ"),
    ("has", "VBZ"),
    ("does", "VBZ"),
    ("are", "VBP"),
    ("am", "VBP"),
    ("'re", "VBP"),
    ("'m", "VBP"),
    ("'ve", "VBP"),
    ("have", "VBP"),
    ("do", "VBP"),
    ("was", "VBD"),
    ("were", "VBD"),
    ("had", "VBD"),
    ("did", "VBD"),
    ("be", "VB"),
    ("been", "VBN"),
    ("being", "VBG"),
    ("not", "RB"),
    ("n't", "RB"),
    ("very", "RB"),
    ("too", "RB"),
    ("also", "RB"),
    ("just", "RB"),
    ("never", "RB"),
    ("always", "RB"),
    ("often", "RB"),
    ("here", "RB"),
    ("there", "RB"),
    ("now", "RB"),
    ("then", "RB"),
    ("only", "RB"),
    ("again", "RB"),
    ("still", "RB"),
    ("already", "RB"),
    ("who", "WP"),
    ("what", "WP"),
    ("which", "WDT"),
    ("when", "WRB"),
    ("where", "WRB"),
    ("why", "WRB"),
    ("how", "WRB"),
];

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "al", "ic", "less"];

/// Tags after which an -s word reads as a third person verb
const SUBJECT_TAGS: &[&str] = &["PRP", "NN", "NNP", "WP", "WDT"];

/// Lookup table plus suffix and context rules producing Penn Treebank tags.
///
/// Only the leading letter of a tag matters downstream, so the rules aim
/// at telling nouns, verbs, adjectives and adverbs apart.
pub struct HeuristicTagger {
    closed_class: HashMap<&'static str, &'static str>,
}

impl HeuristicTagger {
    pub fn new() -> Self {
        Self {
            closed_class: CLOSED_CLASS.iter().copied().collect(),
        }
    }

    pub fn tag(&self, tokens: &[Token]) -> Vec<TaggedToken> {
        let mut tagged: Vec<TaggedToken> = Vec::with_capacity(tokens.len());

        for (i, token) in tokens.iter().enumerate() {
            let prev = tagged.last().map(|t| t.tag.as_str());
            let tag = self.tag_one(token, i, prev);
            tagged.push(TaggedToken {
                token: token.clone(),
                tag: tag.to_string(),
            });
        }

        tagged
    }

    fn tag_one(&self, token: &Token, index: usize, prev: Option<&str>) -> &'static str {
        let word = token.normalized.replace('’', "'");

        if let Some(tag) = punctuation_tag(&token.surface) {
            return tag;
        }
        if word.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
            return "CD";
        }
        if let Some(&tag) = self.closed_class.get(word.as_str()) {
            return tag;
        }

        let sentence_start = index == 0 || matches!(prev, Some(".") | Some(":") | Some("``"));
        if !sentence_start && token.surface.chars().next().is_some_and(char::is_uppercase) {
            return "NNP";
        }
        if matches!(prev, Some("MD") | Some("TO")) {
            return "VB";
        }

        let len = word.chars().count();
        if len > 4 && word.ends_with("ing") {
            return "VBG";
        }
        if len > 3 && word.ends_with("ed") {
            return match prev {
                Some(tag) if tag.starts_with("VB") => "VBN",
                _ => "VBD",
            };
        }
        if len > 3 && word.ends_with("ly") {
            return "RB";
        }
        if len > 4 && word.ends_with("ier") {
            return "JJR";
        }
        if len > 4
            && word.ends_with("er")
            && matches!(prev, Some(tag) if tag.starts_with("VB") || tag == "RB")
        {
            return "JJR";
        }
        if len > 4 && word.ends_with("est") {
            return "JJS";
        }
        if len > 4 && ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s)) {
            return "JJ";
        }
        if len > 3 && word.ends_with('s') && !word.ends_with("ss") {
            return match prev {
                Some(tag) if SUBJECT_TAGS.contains(&tag) => "VBZ",
                _ => "NNS",
            };
        }

        match prev {
            Some("PRP") => "VBP",
            _ => "NN",
        }
    }
}

impl Default for HeuristicTagger {
    fn default() -> Self {
        Self::new()
    }
}

fn punctuation_tag(surface: &str) -> Option<&'static str> {
    let first = surface.chars().next()?;
    if first.is_alphanumeric() || first == '\'' || first == '’' {
        return None;
    }

    let tag = match first {
        '.' | '!' | '?' => ".",
        ',' => ",",
        ':' | ';' | '-' | '–' | '—' => ":",
        '(' | '[' | '{' => "(",
        ')' | ']' | '}' => ")",
        '"' | '“' | '‘' => "``",
        '”' => "''",
        '$' | '£' | '€' => "$",
        _ => "SYM",
    };
    Some(tag)
}
