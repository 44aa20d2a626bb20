//! `SeaORM` entities for the scheduler's own persisted state: the
//! reference tables C1 projects from, and the `match_record` table that is
//! C5's sole write surface (§3, §6).

pub mod club;
pub mod competition_window;
pub mod gymnasium;
pub mod match_record;
pub mod prelude;
pub mod team;
pub mod time_slot;
