use std::collections::HashMap;

use lexicard_core::language::{LemmaCandidate, Lemmatizer, PartOfSpeech};

use crate::lexicon::Lexicon;

/// Suffix substitutions per part of speech, tried in order
const NOUN_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

const VERB_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ies", "y"),
    ("ied", "y"),
    ("es", "e"),
    ("es", ""),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
];

const ADJECTIVE_RULES: &[(&str, &str)] = &[
    ("er", ""),
    ("est", ""),
    ("er", "e"),
    ("est", "e"),
    ("ier", "y"),
    ("iest", "y"),
];

const NOUN_EXCEPTIONS: &[(&str, &str)] = &[
    ("children", "child"),
    ("mice", "mouse"),
    ("lice", "louse"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("geese", "goose"),
    ("people", "person"),
    ("oxen", "ox"),
    ("knives", "knife"),
    ("wives", "wife"),
    ("lives", "life"),
    ("data", "datum"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("analyses", "analysis"),
    ("crises", "crisis"),
    ("theses", "thesis"),
    ("cacti", "cactus"),
    ("fungi", "fungus"),
    ("indices", "index"),
];

const VERB_EXCEPTIONS: &[(&str, &str)] = &[
    ("am", "be"),
    ("are", "be"),
    ("is", "be"),
    ("was", "be"),
    ("were", "be"),
    ("been", "be"),
    ("has", "have"),
    ("had", "have"),
    ("does", "do"),
    ("did", "do"),
    ("done", "do"),
    ("went", "go"),
    ("gone", "go"),
    ("ran", "run"),
    ("ate", "eat"),
    ("eaten", "eat"),
    ("saw", "see"),
    ("seen", "see"),
    ("took", "take"),
    ("taken", "take"),
    ("made", "make"),
    ("said", "say"),
    ("came", "come"),
    ("got", "get"),
    ("gotten", "get"),
    ("gave", "give"),
    ("given", "give"),
    ("knew", "know"),
    ("known", "know"),
    ("thought", "think"),
    ("told", "tell"),
    ("found", "find"),
    ("felt", "feel"),
    ("left", "leave"),
    ("brought", "bring"),
    ("began", "begin"),
    ("begun", "begin"),
    ("kept", "keep"),
    ("held", "hold"),
    ("wrote", "write"),
    ("written", "write"),
    ("stood", "stand"),
    ("heard", "hear"),
    ("meant", "mean"),
    ("met", "meet"),
    ("paid", "pay"),
    ("sat", "sit"),
    ("spoke", "speak"),
    ("spoken", "speak"),
    ("led", "lead"),
    ("grew", "grow"),
    ("grown", "grow"),
    ("lost", "lose"),
    ("fell", "fall"),
    ("fallen", "fall"),
    ("sent", "send"),
    ("built", "build"),
    ("understood", "understand"),
    ("drew", "draw"),
    ("drawn", "draw"),
    ("broke", "break"),
    ("broken", "break"),
    ("spent", "spend"),
    ("rose", "rise"),
    ("risen", "rise"),
    ("drove", "drive"),
    ("driven", "drive"),
    ("bought", "buy"),
    ("wore", "wear"),
    ("worn", "wear"),
    ("chose", "choose"),
    ("chosen", "choose"),
    ("sought", "seek"),
    ("threw", "throw"),
    ("thrown", "throw"),
    ("caught", "catch"),
    ("dealt", "deal"),
    ("won", "win"),
    ("forgot", "forget"),
    ("forgotten", "forget"),
    ("slept", "sleep"),
    ("taught", "teach"),
    ("fought", "fight"),
    ("flew", "fly"),
    ("flown", "fly"),
    ("swam", "swim"),
    ("swum", "swim"),
    ("sang", "sing"),
    ("sung", "sing"),
    ("drank", "drink"),
    ("drunk", "drink"),
    ("hid", "hide"),
    ("hidden", "hide"),
    ("rode", "ride"),
    ("ridden", "ride"),
    ("shook", "shake"),
    ("shaken", "shake"),
    ("stole", "steal"),
    ("stolen", "steal"),
    ("woke", "wake"),
    ("woken", "wake"),
    ("sold", "sell"),
    ("fed", "feed"),
    ("bit", "bite"),
    ("bitten", "bite"),
    ("lay", "lie"),
    ("lain", "lie"),
    ("lying", "lie"),
    ("dying", "die"),
    ("tying", "tie"),
];

const ADJECTIVE_EXCEPTIONS: &[(&str, &str)] = &[
    ("better", "good"),
    ("best", "good"),
    ("worse", "bad"),
    ("worst", "bad"),
    ("further", "far"),
    ("farther", "far"),
    ("furthest", "far"),
    ("farthest", "far"),
    ("elder", "old"),
    ("eldest", "old"),
    ("less", "little"),
    ("least", "little"),
    ("more", "much"),
    ("most", "much"),
];

const ADVERB_EXCEPTIONS: &[(&str, &str)] = &[
    ("better", "well"),
    ("best", "well"),
    ("further", "far"),
    ("farther", "far"),
    ("harder", "hard"),
    ("hardest", "hard"),
];

/// Suffixes whose stem may end in a doubled consonant, e.g. "running"
const DOUBLING_SUFFIXES: &[&str] = &["ing", "ed", "er", "est"];

const DOUBLED: &str = "doubled consonant";

type ExceptionTable = HashMap<String, Vec<String>>;

/// Rule-based lemmatizer validated against a [`Lexicon`].
///
/// Irregular forms listed in the exception tables bypass the suffix rules
/// and resolve to their base forms; the form itself only competes when the
/// lexicon lists it under the same part of speech. Among the candidates
/// found in the lexicon the shortest wins; with no known candidate the word
/// comes back unchanged.
pub struct EnglishLemmatizer {
    lexicon: Lexicon,
    exceptions: HashMap<PartOfSpeech, ExceptionTable>,
}

impl EnglishLemmatizer {
    pub fn new(lexicon: Lexicon) -> Self {
        let mut lemmatizer = Self {
            lexicon,
            exceptions: HashMap::new(),
        };

        let tables = [
            (PartOfSpeech::Noun, NOUN_EXCEPTIONS),
            (PartOfSpeech::Verb, VERB_EXCEPTIONS),
            (PartOfSpeech::Adjective, ADJECTIVE_EXCEPTIONS),
            (PartOfSpeech::Adverb, ADVERB_EXCEPTIONS),
        ];
        for (pos, pairs) in tables {
            for &(form, base) in pairs {
                lemmatizer.add_exception(pos, form, base);
            }
        }

        lemmatizer
    }

    /// Register an irregular form; its base becomes a known word under `pos`
    pub fn add_exception(&mut self, pos: PartOfSpeech, form: &str, base: &str) -> bool {
        let form = form.trim().to_lowercase();
        let base = base.trim().to_lowercase();
        if form.is_empty() || base.is_empty() {
            return false;
        }

        self.lexicon.insert_as(&base, pos);
        let bases = self
            .exceptions
            .entry(pos)
            .or_default()
            .entry(form)
            .or_default();
        if bases.contains(&base) {
            return false;
        }
        bases.push(base);
        true
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn lexicon_mut(&mut self) -> &mut Lexicon {
        &mut self.lexicon
    }

    fn irregular(&self, word: &str, pos: PartOfSpeech) -> Option<&[String]> {
        self.exceptions
            .get(&pos)
            .and_then(|table| table.get(word))
            .map(Vec::as_slice)
    }

    fn rules(pos: PartOfSpeech) -> &'static [(&'static str, &'static str)] {
        match pos {
            PartOfSpeech::Noun => NOUN_RULES,
            PartOfSpeech::Verb => VERB_RULES,
            PartOfSpeech::Adjective => ADJECTIVE_RULES,
            PartOfSpeech::Adverb => &[],
        }
    }

    /// A de-doubled stem only counts when the full stem is not a word itself,
    /// so "adding" stays "add" rather than "ad"
    fn keeps_candidate(&self, candidate: &LemmaCandidate, pos: PartOfSpeech) -> bool {
        if !self.lexicon.contains_as(&candidate.base_form, pos) {
            return false;
        }
        if !candidate.rule.ends_with(DOUBLED) {
            return true;
        }
        let Some(last) = candidate.base_form.chars().last() else {
            return false;
        };
        !self
            .lexicon
            .contains_as(&format!("{}{last}", candidate.base_form), pos)
    }
}

fn doubled_consonant(stem: &str) -> bool {
    let mut chars = stem.chars().rev();
    match (chars.next(), chars.next()) {
        (Some(a), Some(b)) => a == b && a.is_ascii_alphabetic() && !"aeiou".contains(a),
        _ => false,
    }
}

impl Lemmatizer for EnglishLemmatizer {
    fn candidates(&self, word: &str, pos: PartOfSpeech) -> Vec<LemmaCandidate> {
        let mut candidates = vec![LemmaCandidate {
            base_form: word.to_string(),
            rule: "as written".to_string(),
        }];

        if let Some(bases) = self.irregular(word, pos) {
            candidates.extend(bases.iter().map(|base| LemmaCandidate {
                base_form: base.clone(),
                rule: format!("{}: irregular", pos.as_str()),
            }));
            return candidates;
        }

        for (suffix, replacement) in Self::rules(pos) {
            let Some(stem) = word.strip_suffix(suffix) else {
                continue;
            };
            if stem.is_empty() {
                continue;
            }
            candidates.push(LemmaCandidate {
                base_form: format!("{stem}{replacement}"),
                rule: format!("{}: -{suffix}", pos.as_str()),
            });

            if replacement.is_empty()
                && DOUBLING_SUFFIXES.contains(suffix)
                && stem.chars().count() > 2
                && doubled_consonant(stem)
            {
                let mut base = stem.to_string();
                base.pop();
                candidates.push(LemmaCandidate {
                    base_form: base,
                    rule: format!("{}: -{suffix}, {DOUBLED}", pos.as_str()),
                });
            }
        }

        candidates
    }

    fn lemmatize(&self, word: &str, pos: PartOfSpeech) -> String {
        if let Some(bases) = self.irregular(word, pos) {
            let as_written = self.lexicon.is_tagged(word, pos).then_some(word);
            return as_written
                .into_iter()
                .chain(bases.iter().map(String::as_str))
                .min_by_key(|base| base.chars().count())
                .unwrap_or(word)
                .to_string();
        }

        self.candidates(word, pos)
            .into_iter()
            .filter(|c| self.keeps_candidate(c, pos))
            .min_by_key(|c| c.base_form.chars().count())
            .map(|c| c.base_form)
            .unwrap_or_else(|| word.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lemmatizer(words: &str) -> EnglishLemmatizer {
        EnglishLemmatizer::new(Lexicon::from_lines(words))
    }

    #[test]
    fn test_regular_suffixes() {
        let lem = lemmatizer("run\nbox\nwolf\nchurch\nwoman\ncity\nlive\nwalk\nstudy");

        assert_eq!(lem.lemmatize("runs", PartOfSpeech::Verb), "run");
        assert_eq!(lem.lemmatize("boxes", PartOfSpeech::Noun), "box");
        assert_eq!(lem.lemmatize("wolves", PartOfSpeech::Noun), "wolf");
        assert_eq!(lem.lemmatize("churches", PartOfSpeech::Noun), "church");
        assert_eq!(lem.lemmatize("women", PartOfSpeech::Noun), "woman");
        assert_eq!(lem.lemmatize("cities", PartOfSpeech::Noun), "city");
        assert_eq!(lem.lemmatize("living", PartOfSpeech::Verb), "live");
        assert_eq!(lem.lemmatize("walked", PartOfSpeech::Verb), "walk");
        assert_eq!(lem.lemmatize("studied", PartOfSpeech::Verb), "study");
        assert_eq!(lem.lemmatize("studies", PartOfSpeech::Verb), "study");
    }

    #[test]
    fn test_irregular_forms() {
        let lem = lemmatizer("");

        assert_eq!(lem.lemmatize("ran", PartOfSpeech::Verb), "run");
        assert_eq!(lem.lemmatize("went", PartOfSpeech::Verb), "go");
        assert_eq!(lem.lemmatize("were", PartOfSpeech::Verb), "be");
        assert_eq!(lem.lemmatize("mice", PartOfSpeech::Noun), "mouse");
        assert_eq!(lem.lemmatize("children", PartOfSpeech::Noun), "child");
        assert_eq!(lem.lemmatize("better", PartOfSpeech::Adjective), "good");
        assert_eq!(lem.lemmatize("better", PartOfSpeech::Adverb), "well");
    }

    #[test]
    fn test_irregular_form_skips_suffix_rules() {
        // "lying" would otherwise yield "ly" and "lye"
        let lem = lemmatizer("ly\nlye");

        assert_eq!(lem.lemmatize("lying", PartOfSpeech::Verb), "lie");
    }

    #[test]
    fn test_pos_selects_rule_table() {
        let lem = lemmatizer("run");

        assert_eq!(lem.lemmatize("running", PartOfSpeech::Noun), "running");
        assert_eq!(lem.lemmatize("running", PartOfSpeech::Verb), "run");
        assert_eq!(lem.lemmatize("runs", PartOfSpeech::Adverb), "runs");
    }

    #[test]
    fn test_doubled_consonant_stems() {
        let lem = lemmatizer("get\nstop\nbig\nhot\nadd\nad\ndress");

        assert_eq!(lem.lemmatize("getting", PartOfSpeech::Verb), "get");
        assert_eq!(lem.lemmatize("stopped", PartOfSpeech::Verb), "stop");
        assert_eq!(lem.lemmatize("bigger", PartOfSpeech::Adjective), "big");
        assert_eq!(lem.lemmatize("hottest", PartOfSpeech::Adjective), "hot");
        // full stem is a word: no de-doubling
        assert_eq!(lem.lemmatize("adding", PartOfSpeech::Verb), "add");
        assert_eq!(lem.lemmatize("dressed", PartOfSpeech::Verb), "dress");
    }

    #[test]
    fn test_doubled_stem_beats_known_inflected_form() {
        let lem = lemmatizer("run\nrunning");

        assert_eq!(lem.lemmatize("running", PartOfSpeech::Verb), "run");
    }

    #[test]
    fn test_plain_word_does_not_shadow_irregular_base() {
        // dataset words arrive untagged
        let lem = lemmatizer("left\nrose\nleave\nrise");

        assert_eq!(lem.lemmatize("left", PartOfSpeech::Verb), "leave");
        assert_eq!(lem.lemmatize("rose", PartOfSpeech::Verb), "rise");
        assert_eq!(lem.lemmatize("rose", PartOfSpeech::Noun), "rose");
    }

    #[test]
    fn test_form_tagged_under_same_pos_competes() {
        let mut lem = lemmatizer("");
        lem.lexicon_mut().insert_as("saw", PartOfSpeech::Verb);

        assert_eq!(lem.lemmatize("saw", PartOfSpeech::Verb), "saw");
    }

    #[test]
    fn test_added_exception() {
        let mut lem = lemmatizer("");

        assert!(lem.add_exception(PartOfSpeech::Verb, "Strove", "strive"));
        assert!(!lem.add_exception(PartOfSpeech::Verb, "strove", "strive"));
        assert_eq!(lem.lemmatize("strove", PartOfSpeech::Verb), "strive");
        assert!(lem.lexicon().is_tagged("strive", PartOfSpeech::Verb));
    }

    #[test]
    fn test_shortest_known_candidate_wins() {
        let lem = lemmatizer("hope\nhoping");

        assert_eq!(lem.lemmatize("hoping", PartOfSpeech::Verb), "hope");
    }

    #[test]
    fn test_adjective_comparatives() {
        let lem = lemmatizer("fast\nlarge\nhappy");

        assert_eq!(lem.lemmatize("faster", PartOfSpeech::Adjective), "fast");
        assert_eq!(lem.lemmatize("largest", PartOfSpeech::Adjective), "large");
        assert_eq!(lem.lemmatize("happier", PartOfSpeech::Adjective), "happy");
    }

    #[test]
    fn test_candidates_report_rules() {
        let lem = lemmatizer("");
        let candidates = lem.candidates("boxes", PartOfSpeech::Verb);

        assert_eq!(candidates[0].base_form, "boxes");
        assert!(
            candidates
                .iter()
                .any(|c| c.base_form == "box" && c.rule == "verb: -es")
        );
    }

    #[test]
    fn test_unknown_word_is_returned_unchanged() {
        let lem = lemmatizer("");

        assert_eq!(lem.lemmatize("glorbs", PartOfSpeech::Noun), "glorbs");
    }
}
