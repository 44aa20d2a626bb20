//! `SeaORM` Entity.

pub use super::club::Entity as Club;
pub use super::competition_window::Entity as CompetitionWindow;
pub use super::gymnasium::Entity as Gymnasium;
pub use super::match_record::Entity as MatchRecord;
pub use super::team::Entity as Team;
pub use super::time_slot::Entity as TimeSlot;
