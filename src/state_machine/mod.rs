mod graph;
mod record;
mod state;

pub use graph::{GraphBuilder, TransitionGraph};
pub use record::StateRecord;
pub use state::{LogEntry, StateMachine};
