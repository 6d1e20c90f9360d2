pub mod outcome;
pub mod prediction;
pub mod recommendation;
pub mod schedule;
pub mod usage;
pub mod weather;
pub mod zone;

pub use outcome::*;
pub use prediction::*;
pub use recommendation::*;
pub use schedule::*;
pub use usage::*;
pub use weather::*;
pub use zone::*;
