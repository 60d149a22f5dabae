//! `fc-agents` — who can ask for things, and what can be carried to them.
//!
//! Two stores live here, both plain indexed `Vec`s addressed by typed IDs:
//!
//! - [`AgentRoster`]: the cats.  Each agent holds at most one pending
//!   [`Need`]; the roster is the single owner of need state.  The scheduler
//!   sets needs, the resolver and the deadline sweep clear them — nobody
//!   else touches the field.
//! - [`ItemRack`]: the food bowl and water bowl.  Items are reusable props
//!   with a rest position; any drop, delivered or not, snaps them back.
//!
//! The roster also owns agent positions (cats wander to a new spot when they
//! ask for something) so presentation only ever reads them.

pub mod items;
pub mod roster;


pub use items::{Item, ItemRack, ItemSpec};
pub use roster::{Agent, AgentRoster, AgentSpec, Need};
