pub mod habit;
pub mod identity;
pub mod log;
pub mod user;

pub use habit::{Habit, HabitPatch, NewHabit};
pub use identity::{Identity, IdentityPatch, NewIdentity};
pub use log::{Log, LogPatch, LogWithHabits, NewLog};
pub use user::User;
