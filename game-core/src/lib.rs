pub mod answers;
pub mod game_events;
pub mod game_state;
pub mod rng;
pub mod round;
pub mod scoring;
pub mod turn;
pub mod voting;
pub mod word_source;

// Re-export main components
pub use answers::*;
pub use game_events::*;
pub use game_state::*;
pub use rng::*;
pub use round::*;
pub use scoring::*;
pub use turn::*;
pub use voting::*;
pub use word_source::*;
