pub mod coverage;
pub mod dataset;
pub mod error;
pub mod language;
pub mod locator;
pub mod merger;
pub mod preprocess;

pub use coverage::CoverageReport;
pub use dataset::{Dataset, FlushPolicy};
pub use error::DatasetError;
pub use language::{LanguageProcessor, Lemmatizer, PartOfSpeech, TaggedToken, Token};
pub use locator::{LocatedWord, Locator, MatchRule};
pub use merger::{EnrichReport, QuizOutcome, Source, SourceUpdate};
