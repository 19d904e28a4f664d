pub mod ownership;

pub use ownership::{ensure_owner, EntityKind};
