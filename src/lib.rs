#![forbid(unsafe_code)]
//! Roulement — génération locale de plannings mensuels d'équipe (sans BD).
//!
//! - Deux passes : assignation initiale puis équilibrage par quota.
//! - Bornes d'effectif par type de jour, limite de jours consécutifs.
//! - Jours de repos injectés (week-ends seuls ou calendrier de fériés
//!   avec cache et jeu de secours).
//! - Échanges JSON/CSV ; tout en fichiers locaux.

pub mod calendar;
pub mod holidays;
pub mod io;
pub mod model;
pub mod scheduler;
pub mod storage;

pub use calendar::{
    CachedHolidays, DayClassifier, FileHolidaySource, HolidaySet, HolidaySource, RestDayCalendar,
    WeekendClassifier,
};
pub use model::{days_in_month, DayType, Employee, EmployeeId, Schedule};
pub use scheduler::{Diagnostic, Generated, Planner, PolicyBounds, SchedError, StaffingPolicy};
pub use storage::{JsonStorage, Storage};
