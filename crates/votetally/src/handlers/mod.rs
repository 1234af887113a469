mod tally;

pub use tally::{function_handler, handle};
