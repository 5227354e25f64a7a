mod error;
mod migration;
mod reminder;
mod shared;

pub use error::ReminderError;
pub use migration::*;
pub use reminder::*;
pub use shared::usecase::{execute, Subscriber, UseCase};
