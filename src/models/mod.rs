pub mod card;
pub mod card_store;
pub mod phase;
pub mod review_session;
pub mod score;
pub mod view;

pub use card::{Answer, Card, CardRecord, NewCard};
pub use card_store::CardStore;
pub use phase::{Phase, PhaseReport, classify};
pub use review_session::{Outcome, ReviewSession, SessionState};
pub use score::{Score, aggregate};
pub use view::{CardView, Controls, DeckView, project};
