use lexicard_core::language::Token;

/// Clitics split off the end of a word: "don't" -> "do" + "n't"
const CONTRACTIONS: &[&str] = &[
    "n't", "n’t", "'s", "’s", "'re", "’re", "'ve", "’ve", "'ll", "’ll", "'d", "’d", "'m", "’m",
];

/// Treebank-style word tokenizer.
///
/// Every token is a slice of the input, so its surface text can always be
/// found verbatim in the sentence. Leading and trailing punctuation become
/// separate tokens (runs of the same mark stay together, e.g. "..."),
/// inner hyphens and apostrophes stay inside the word.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();

    for (start, chunk) in whitespace_chunks(text) {
        split_chunk(chunk, start, &mut tokens);
    }

    tokens
}

fn whitespace_chunks(text: &str) -> Vec<(usize, &str)> {
    let mut chunks = Vec::new();
    let mut start = None;

    for (i, c) in text.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                chunks.push((s, &text[s..i]));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        chunks.push((s, &text[s..]));
    }

    chunks
}

fn split_chunk(chunk: &str, offset: usize, tokens: &mut Vec<Token>) {
    // Leading punctuation
    let mut begin = 0;
    while let Some(c) = chunk[begin..].chars().next() {
        if c.is_alphanumeric() {
            break;
        }
        let len = run_length(&chunk[begin..], c);
        tokens.push(Token::new(&chunk[begin..begin + len], offset + begin));
        begin += len;
    }
    if begin == chunk.len() {
        return;
    }

    // Trailing punctuation, collected back to front
    let mut end = chunk.len();
    let mut trailing = Vec::new();
    while let Some(c) = chunk[begin..end].chars().next_back() {
        if c.is_alphanumeric() {
            break;
        }
        let mut start = end - c.len_utf8();
        while let Some(prev) = chunk[begin..start].chars().next_back() {
            if prev != c {
                break;
            }
            start -= prev.len_utf8();
        }
        trailing.push((start, end));
        end = start;
    }

    let core = &chunk[begin..end];
    match split_contraction(core) {
        Some(split) => {
            tokens.push(Token::new(&core[..split], offset + begin));
            tokens.push(Token::new(&core[split..], offset + begin + split));
        }
        None => tokens.push(Token::new(core, offset + begin)),
    }

    for (start, stop) in trailing.into_iter().rev() {
        tokens.push(Token::new(&chunk[start..stop], offset + start));
    }
}

fn run_length(text: &str, c: char) -> usize {
    text.chars().take_while(|&next| next == c).map(char::len_utf8).sum()
}

/// Byte index where a trailing clitic starts, if the word has one
fn split_contraction(word: &str) -> Option<usize> {
    CONTRACTIONS.iter().find_map(|suffix| {
        let split = word.len().checked_sub(suffix.len())?;
        if split == 0 || !word.is_char_boundary(split) {
            return None;
        }
        word[split..].eq_ignore_ascii_case(suffix).then_some(split)
    })
}
