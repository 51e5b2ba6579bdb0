//! The classifier: a loaded model together with the state of the current
//! classification session.

use crate::error::Error;
use crate::extractor::FeatureExtractor;
use crate::label::Label;
use crate::loader;
use crate::scorer::Scorer;
use crate::Config;

use std::io::BufRead;
use std::path::Path;

/// A language identification model.
///
/// The label names and the feature table never change after loading. The
/// session state (accumulators and scanning cursor) lives in the model too,
/// so a model runs one session at a time. Use one model per thread, or
/// guard the whole `init`, `feed`, `finish` sequence with a lock.
///
/// The usual flow is:
///   1. Call `init()` to start a new session.
///   2. Call `feed()` one or more times with contiguous pieces of the text.
///      The pieces need not start or end on UTF-8 boundaries.
///   3. Call `finish()` to get the best label.
#[derive(Debug, Clone)]
pub struct Model {
    scorer: Scorer,
    extractor: FeatureExtractor,
}

impl Model {
    /// Creates a model from its parts. The model is ready for a session.
    pub(crate) fn new(
        labels: Vec<Label>,
        table: Vec<f64>,
        config: Config,
    ) -> Self {
        let mut model = Self {
            scorer: Scorer::new(labels, table, config),
            extractor: FeatureExtractor::new(),
        };
        model.init();
        model
    }

    /// Load the model file at 'path'.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        loader::load(path, Config::default())
    }

    /// Load the model file at 'path' with the configuration 'config'.
    pub fn load_with_config<P: AsRef<Path>>(
        path: P,
        config: Config,
    ) -> Result<Self, Error> {
        loader::load(path, config)
    }

    /// Parse a model from 'reader'.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        loader::parse(reader, Config::default())
    }

    /// Returns the labels in the order of the model file.
    pub fn labels(&self) -> &[Label] {
        self.scorer.labels()
    }

    pub fn num_labels(&self) -> usize {
        self.scorer.labels().len()
    }

    pub fn num_features(&self) -> usize {
        self.scorer.table_len()
    }

    pub fn config(&self) -> Config {
        self.scorer.config()
    }

    pub fn set_config(&mut self, config: Config) {
        self.scorer.set_config(config);
    }

    /// Returns the accumulated score of each label in the current session.
    pub fn scores(&self) -> &[f64] {
        self.scorer.scores()
    }

    /// Start a new session.
    pub fn init(&mut self) {
        self.scorer.clear();
        self.extractor.init();
    }

    /// Add the text chunk 'chunk' to the current session.
    pub fn feed(&mut self, chunk: &[u8]) {
        self.extractor.feed(chunk, &mut self.scorer);
    }

    /// Complete the session and return the best label. This always returns
    /// a label, whether or not the text is written in one of the languages
    /// of the model.
    pub fn finish(&mut self) -> &Label {
        self.extractor.finish(&mut self.scorer);
        self.scorer.best()
    }

    /// Classify the text 'text' in a single session.
    pub fn detect(&mut self, text: &[u8]) -> &Label {
        self.init();
        self.feed(text);
        self.finish()
    }
}
