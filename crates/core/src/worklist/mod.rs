pub mod derive;
pub mod priority;
pub mod schedule;

pub use derive::TaskDerivationEngine;
pub use priority::{PriorityClassifier, PriorityConfig};
pub use schedule::{CommunicationScheduler, NewCommunication};
