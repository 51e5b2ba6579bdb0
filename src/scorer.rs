//! Accumulates the evidence for each label and picks the winner.

use crate::extractor::QuadgramSink;
use crate::label::Label;
use crate::window::{hash_label, Window};
use crate::Config;

/// Holds the model parameters and the per-label accumulators of the current
/// session.
#[derive(Debug, Clone)]
pub struct Scorer {
    labels: Vec<Label>,
    /// Log-weighted feature scores. The length is a power of two.
    table: Vec<f64>,
    /// The table length minus one.
    mask: u32,
    accumulators: Vec<f64>,
    config: Config,
}

impl Scorer {
    /// Creates a new scorer. The length of 'table' must be a power of two
    /// that fits in 32 bits, and 'labels' must not be empty.
    pub fn new(labels: Vec<Label>, table: Vec<f64>, config: Config) -> Self {
        debug_assert!(!labels.is_empty());
        debug_assert!(table.len().is_power_of_two());
        debug_assert!(table.len() <= u32::MAX as usize);
        let mask = (table.len() - 1) as u32;
        let accumulators = vec![0.; labels.len()];
        Self {
            labels,
            table,
            mask,
            accumulators,
            config,
        }
    }

    pub fn clear(&mut self) {
        self.accumulators.iter_mut().for_each(|x| *x = 0.);
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn scores(&self) -> &[f64] {
        &self.accumulators
    }

    pub fn table_len(&self) -> usize {
        self.table.len()
    }

    pub fn config(&self) -> Config {
        self.config
    }

    pub fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    /// Return the label with the highest accumulated score.
    pub fn best(&self) -> &Label {
        &self.labels[decide(&self.accumulators)]
    }

    fn report(&self, window: &Window, label: usize, hash: u32, score: f64) {
        log::debug!(
            "{}",
            report_line(&window.ordered(), &self.labels[label], hash, score)
        );
    }
}

/// Format one diagnostic line: the quadgram in hex, the label, the label
/// hash and the score that was added.
pub fn report_line(
    gram: &[u8; 4],
    label: &Label,
    hash: u32,
    score: f64,
) -> String {
    format!(
        "{:02x}{:02x}{:02x}{:02x} {} {} {}",
        gram[0], gram[1], gram[2], gram[3], label, hash, score
    )
}

impl QuadgramSink for Scorer {
    fn update(&mut self, hash: u32, window: &Window) {
        for i in 0..self.accumulators.len() {
            let h2 = hash_label(hash, i);
            let score = self.table[(h2 & self.mask) as usize];
            self.accumulators[i] += score;
            if self.config.verbose() {
                self.report(window, i, h2, score);
            }
        }
    }
}

/// Return the index of the highest score. Ties go to the lowest index, and
/// an empty list selects index zero.
pub fn decide(scores: &[f64]) -> usize {
    let mut best = 0;
    for (i, score) in scores.iter().enumerate() {
        if *score > scores[best] {
            best = i;
        }
    }
    best
}

#[test]
fn test_decide() {
    assert_eq!(decide(&[]), 0);
    assert_eq!(decide(&[0., 0., 0.]), 0);
    assert_eq!(decide(&[1., 3., 2.]), 1);
    assert_eq!(decide(&[0.5, 2., 2., 1.]), 1);
    assert_eq!(decide(&[0.5, 1., 2., 2.]), 2);
    // NaN never wins.
    assert_eq!(decide(&[1., f64::NAN, 0.]), 0);
}

#[test]
fn test_update_uses_label_index() {
    let labels = vec![Label::from("a"), Label::from("b")];
    let table: Vec<f64> = (0..8).map(|i| i as f64).collect();
    let mut scorer = Scorer::new(labels, table, Config::default());
    let window = Window::new();

    let hash = 0x1234_5678;
    scorer.update(hash, &window);
    scorer.update(hash, &window);
    for i in 0..2 {
        let slot = hash_label(hash, i) & 7;
        assert_eq!(scorer.scores()[i], 2. * slot as f64);
    }

    scorer.clear();
    assert_eq!(scorer.scores(), &[0., 0.]);
    assert_eq!(scorer.best(), "a");
}

#[test]
fn test_report_line() {
    let label = Label::from("en");
    let gram = [0xff, b'a', b'b', b'c'];
    assert_eq!(report_line(&gram, &label, 42, 1.5), "ff616263 en 42 1.5");
    let gram = [0x00, 0xc3, 0xa9, 0xff];
    let line = report_line(&gram, &label, u32::MAX, 0.);
    assert_eq!(line, "00c3a9ff en 4294967295 0");
}

#[test]
fn test_verbose_does_not_change_scores() {
    let labels = vec![Label::from("a"), Label::from("b")];
    let table: Vec<f64> = (0..8).map(|i| i as f64).collect();
    let mut quiet =
        Scorer::new(labels.clone(), table.clone(), Config::default());
    let mut loud = Scorer::new(labels, table, Config::new(true));
    let window = Window::new();
    for hash in [1, 0xdead_beef, 0x1234_5678] {
        quiet.update(hash, &window);
        loud.update(hash, &window);
    }
    assert_eq!(quiet.scores(), loud.scores());
    assert_eq!(quiet.best(), loud.best());
}
