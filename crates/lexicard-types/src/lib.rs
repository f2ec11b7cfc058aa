mod record;

pub use record::{
    Analysis, CambridgeEntry, CambridgeMeaning, MeaningEntry, PhraseEntry, QuizEntry,
    WordFamilyEntry, WordRecord,
};
