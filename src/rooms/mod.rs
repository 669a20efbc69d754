mod rooms;

pub use rooms::{spawn_turn_clock, sweep_expired_turns, Rooms};
