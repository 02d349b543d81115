mod agent;
mod errors;
mod transcript;

pub use agent::*;
pub use errors::*;
pub use transcript::*;
