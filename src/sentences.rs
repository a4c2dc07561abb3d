use rand::Rng;

use crate::session::strip_newlines;

/// Local sentence catalog. Never empty.
pub const SENTENCES: [&str; 10] = [
    "The quick brown fox jumps over the lazy dog.",
    "Life is what happens when you are busy making other plans.",
    "Do not go where the path may lead, go instead where there is no path.",
    "Simplicity is the ultimate sophistication.",
    "A smooth sea never made a skilled sailor.",
    "Strive not to be a success, but rather to be of value.",
    "In the middle of difficulty lies opportunity.",
    "Action is the foundational key to all success.",
    "The only way to do great work is to love what you do.",
    "Small deeds done are better than great deeds planned.",
];

/// Pick a catalog sentence uniformly at random
pub fn pick() -> &'static str {
    pick_with(&mut rand::thread_rng())
}

pub fn pick_with<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    SENTENCES[rng.gen_range(0..SENTENCES.len())]
}

/// Where new session targets come from
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SentenceProvider {
    #[default]
    Catalog,
    /// Every load uses the same user supplied prompt
    Fixed(String),
}

impl SentenceProvider {
    /// Line breaks are dropped from a custom prompt since typed input never contains them
    pub fn from_prompt(prompt: Option<String>) -> Self {
        match prompt {
            Some(p) => SentenceProvider::Fixed(strip_newlines(&p)),
            None => SentenceProvider::Catalog,
        }
    }

    pub fn next_sentence(&self) -> String {
        match self {
            SentenceProvider::Catalog => pick().to_string(),
            SentenceProvider::Fixed(p) => p.clone(),
        }
    }
}
