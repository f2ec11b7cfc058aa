pub mod analyzer;
pub mod cambridge;
pub mod corpus;
pub mod lemmatizer;
pub mod lexicon;
pub mod loader;
pub mod processor;
pub mod tagger;
pub mod tokenizer;
pub mod wordnet;

pub use analyzer::EnglishAnalyzer;
pub use cambridge::CambridgeDictionary;
pub use corpus::CorpusAnalyzer;
pub use lemmatizer::EnglishLemmatizer;
pub use lexicon::Lexicon;
pub use loader::LexiconLoader;
pub use processor::EnglishProcessor;
pub use tagger::HeuristicTagger;
pub use wordnet::{WordNet, WordNetError};
