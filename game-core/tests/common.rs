#![allow(dead_code)]

use game_core::{Game, GameEvent, GameEventBus, GameEventHandler, GameRng, WordSource};
use game_types::{GameError, RoundState, Team, Word};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Word source that hands out a fixed sequence, then repeats the last word
pub struct ScriptedWords {
    words: VecDeque<Word>,
    last: Option<Word>,
}

impl ScriptedWords {
    pub fn new(words: &[(&str, &str)]) -> Self {
        Self {
            words: words.iter().map(|(w, d)| Word::new(*w, *d)).collect(),
            last: None,
        }
    }
}

impl WordSource for ScriptedWords {
    fn next_word(&mut self) -> Result<Word, GameError> {
        if let Some(word) = self.words.pop_front() {
            self.last = Some(word.clone());
            return Ok(word);
        }
        self.last.clone().ok_or(GameError::EmptyWordCatalog)
    }
}

/// Event collector for testing event emissions
#[derive(Clone)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_events(&self) -> Vec<GameEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn event_names(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(GameEvent::name).collect()
    }

    pub fn has_event_type(&self, check_fn: impl Fn(&GameEvent) -> bool) -> bool {
        self.events.lock().unwrap().iter().any(check_fn)
    }
}

impl GameEventHandler for EventCollector {
    fn handle_event(&mut self, event: GameEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub fn standard_words() -> ScriptedWords {
    ScriptedWords::new(&[
        ("Zyx", "definition D"),
        ("Qat", "A shrub whose leaves are chewed"),
        ("Oxter", "The armpit"),
    ])
}

/// Creates a game with the given teams, a scripted word list and a seeded shuffle
pub fn create_game_with_teams(names: &[&str], seed: u64) -> (Game<ScriptedWords>, EventCollector) {
    let collector = EventCollector::new();
    let mut bus = GameEventBus::new();
    bus.add_handler(Box::new(collector.clone()));

    let game = Game::create(names, 16, standard_words(), GameRng::new(seed), bus).unwrap();
    (game, collector)
}

/// Creates the standard two-team game ("Alpha", "Beta") on the word "Zyx"
pub fn create_standard_game(seed: u64) -> (Game<ScriptedWords>, EventCollector) {
    create_game_with_teams(&["Alpha", "Beta"], seed)
}

pub fn team_by_name<'a>(state: &'a RoundState, name: &str) -> &'a Team {
    state
        .teams
        .iter()
        .find(|team| team.name == name)
        .unwrap_or_else(|| panic!("no team named {}", name))
}

/// Index of the shuffled answer with the given text
pub fn answer_index(state: &RoundState, text: &str) -> usize {
    state
        .answers
        .iter()
        .position(|answer| answer.answer == text)
        .unwrap_or_else(|| panic!("no answer {:?}", text))
}

/// Every team writes `"fake-<name>"` in turn order
pub fn write_all_answers(game: &mut Game<ScriptedWords>) {
    let names: Vec<String> = game.state.teams.iter().map(|t| t.name.clone()).collect();
    for name in names {
        game.submit_current_answer(&format!("fake-{}", name)).unwrap();
    }
}
