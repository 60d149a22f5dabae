//! `fc-dialogue` — what the cats (and their keeper) say.
//!
//! The *content* of the lines is presentation detail and fully replaceable at
//! table-build time; what belongs to the core is the selection policy: a
//! lookup over `(agent, outcome)` returning a bag of lines, a uniform random
//! pick from that bag, and the keeper's 20 % chance of grumbling instead of
//! acknowledging a request.

pub mod table;


pub use table::{AgentVoice, DialogueTable, LineBag, Outcome};
