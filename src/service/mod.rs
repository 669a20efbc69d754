mod service;

pub use service::{GameService, MoveOutcome};
