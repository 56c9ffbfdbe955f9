//! Typewriter Reveal
//!
//! Progressive word-by-word reveal of analysis sections. The revealer is a
//! pure timer-driven state machine: [`Revealer::update`] accumulates frame
//! deltas and reveals one word per elapsed interval, section by section in
//! order. Section headings are visible from the start; only content words
//! trickle in.

use std::time::Duration;

use library_core::AnalysisSection;

/// One word appears per interval
const WORD_INTERVAL: Duration = Duration::from_millis(50);

/// Word-by-word reveal state over a fixed set of sections
#[derive(Debug)]
pub struct Revealer {
    /// Section titles, fixed at construction
    titles: Vec<String>,
    /// Remaining words per section, in reveal order
    words: Vec<Vec<String>>,
    /// Revealed content per section
    visible: Vec<String>,
    /// Section currently revealing
    section: usize,
    /// Next word index within the current section
    word: usize,
    /// Unspent time carried between frames
    carry: Duration,
}

impl Revealer {
    /// Create a revealer over parsed sections; nothing is revealed yet
    pub fn new(sections: &[AnalysisSection]) -> Self {
        let titles = sections.iter().map(|s| s.title.clone()).collect();
        let words: Vec<Vec<String>> = sections
            .iter()
            .map(|s| s.content.split_whitespace().map(str::to_string).collect())
            .collect();
        let visible = vec![String::new(); words.len()];
        Self {
            titles,
            words,
            visible,
            section: 0,
            word: 0,
            carry: Duration::ZERO,
        }
    }

    /// Advance timers, revealing words for each elapsed interval
    pub fn update(&mut self, delta: Duration) {
        self.carry += delta;
        while self.carry >= WORD_INTERVAL && !self.is_done() {
            self.carry -= WORD_INTERVAL;
            self.tick();
        }
        if self.is_done() {
            self.carry = Duration::ZERO;
        }
    }

    /// Reveal the next word, moving to the next section when one runs out
    fn tick(&mut self) {
        while self.section < self.words.len() && self.word >= self.words[self.section].len() {
            self.section += 1;
            self.word = 0;
        }
        if self.section >= self.words.len() {
            return;
        }

        let next = &self.words[self.section][self.word];
        let target = &mut self.visible[self.section];
        if !target.is_empty() {
            target.push(' ');
        }
        target.push_str(next);
        self.word += 1;
    }

    /// Reveal everything at once
    pub fn reveal_all(&mut self) {
        for (i, words) in self.words.iter().enumerate() {
            self.visible[i] = words.join(" ");
        }
        self.section = self.words.len();
        self.word = 0;
        self.carry = Duration::ZERO;
    }

    /// Whether every word of every section is visible
    pub fn is_done(&self) -> bool {
        self.words[self.section..]
            .iter()
            .enumerate()
            .all(|(i, words)| {
                let consumed = if i == 0 { self.word } else { 0 };
                consumed >= words.len()
            })
    }

    /// The sections as currently visible (titles fixed, content partial)
    pub fn visible_sections(&self) -> Vec<AnalysisSection> {
        self.titles
            .iter()
            .zip(&self.visible)
            .map(|(title, content)| AnalysisSection {
                title: title.clone(),
                content: content.clone(),
            })
            .collect()
    }
}
