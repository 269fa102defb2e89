pub mod messages;

pub use messages::{ButtonLabels, Messages};
