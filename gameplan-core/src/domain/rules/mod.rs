// gameplan-core/src/domain/rules/mod.rs

pub mod age;
pub mod demographics;
pub mod media;
pub mod row;
pub mod validator;

pub use age::{AgeValue, parse_age};
pub use demographics::ParityFlag;
pub use media::{MediaChannels, is_broadcast_subtype};
pub use row::{Demographic, Field, GamePlanRow};
pub use validator::RowValidator;
