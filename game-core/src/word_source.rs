use anyhow::{Context, Result, anyhow};
use game_types::{GameError, Word};
use std::path::Path;
use tracing::info;

use crate::GameRng;

/// Supplies the next `(word, definition)` pair to play.
pub trait WordSource {
    fn next_word(&mut self) -> Result<Word, GameError>;
}

/// Small built-in catalog used when no word file is configured
const DEFAULT_WORDS: &str = "\
# word<TAB>definition
abderian\tGiven to incessant or foolish laughter
borborygmus\tA rumbling or gurgling noise in the intestines
cacoethes\tAn urge to do something inadvisable
defenestration\tThe act of throwing someone out of a window
erinaceous\tOf, pertaining to, or resembling a hedgehog
flews\tThe pendulous lateral parts of a dog's upper lip
gongoozler\tA person who enjoys watching activity on canals
hemidemisemiquaver\tA sixty-fourth note in music
impignorate\tTo pledge or pawn
jentacular\tRelating to breakfast
kakorrhaphiophobia\tFear of failure or defeat
lethologica\tThe inability to remember the right word
mumpsimus\tA stubborn person who insists on an error after being shown it is wrong
nudiustertian\tRelating to the day before yesterday
oxter\tThe armpit
pauciloquent\tUttering few words
quomodocunquize\tTo make money in any possible way
ratoon\tA new shoot springing from the root of a plant after cropping
snollygoster\tA shrewd, unprincipled person
tittynope\tA small quantity of something left over
ultracrepidarian\tA person who gives opinions beyond their knowledge
vomitory\tAn entrance passage in a stadium or theatre
widdershins\tIn a direction contrary to the sun's course
xertz\tTo gulp something down quickly and greedily
yonderly\tMentally or emotionally distant
zarf\tA holder for a handleless coffee cup
";

/// Word list picked uniformly at random
#[derive(Debug)]
pub struct WordCatalog {
    words: Vec<Word>,
    rng: GameRng,
}

impl WordCatalog {
    /// Parse a catalog with one `word<TAB>definition` (or `word|definition`)
    /// entry per line. Blank lines and `#` comments are skipped.
    pub fn from_word_list(word_list: &str) -> Result<Self, GameError> {
        Self::from_word_list_with_rng(word_list, GameRng::from_entropy())
    }

    pub fn from_word_list_with_rng(word_list: &str, rng: GameRng) -> Result<Self, GameError> {
        let words = parse_word_list(word_list);
        Self::from_words(words, rng)
    }

    pub fn from_words(words: Vec<Word>, rng: GameRng) -> Result<Self, GameError> {
        if words.is_empty() {
            return Err(GameError::EmptyWordCatalog);
        }
        Ok(Self { words, rng })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read word file {}", path.display()))?;

        let catalog = Self::from_word_list(&contents)
            .map_err(|e| anyhow!("{} in {}", e, path.display()))?;

        info!("Loaded {} words from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn with_default_words() -> Self {
        Self {
            words: parse_word_list(DEFAULT_WORDS),
            rng: GameRng::from_entropy(),
        }
    }

    /// Same words, drawn with a separate random stream
    pub fn fork(&self, rng: GameRng) -> Self {
        Self {
            words: self.words.clone(),
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words
            .iter()
            .any(|entry| entry.word.eq_ignore_ascii_case(word.trim()))
    }
}

impl WordSource for WordCatalog {
    fn next_word(&mut self) -> Result<Word, GameError> {
        if self.words.is_empty() {
            return Err(GameError::EmptyWordCatalog);
        }
        let index = self.rng.index_inclusive(self.words.len() - 1);
        Ok(self.words[index].clone())
    }
}

fn parse_word_list(word_list: &str) -> Vec<Word> {
    word_list
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let (word, definition) = line.split_once('\t').or_else(|| line.split_once('|'))?;
            let (word, definition) = (word.trim(), definition.trim());
            if word.is_empty() || definition.is_empty() {
                return None;
            }
            Some(Word::new(word, definition))
        })
        .collect()
}
