use crate::model::DayType;
use anyhow::Context;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Jour de la semaine (0 = dimanche, 6 = samedi). `None` si la date est invalide.
pub fn day_of_week(year: i32, month: u32, day: u32) -> Option<u32> {
    NaiveDate::from_ymd_opt(year, month, day).map(|d| d.weekday().num_days_from_sunday())
}

pub fn is_weekend(year: i32, month: u32, day: u32) -> bool {
    matches!(day_of_week(year, month, day), Some(0) | Some(6))
}

/// Classifie chaque jour du mois en jour ouvré ou jour de repos.
///
/// Injecté dans la génération ; jamais possédé par elle.
pub trait DayClassifier {
    fn is_rest_day(&self, year: i32, month: u32, day: u32) -> bool;

    fn day_type(&self, year: i32, month: u32, day: u32) -> DayType {
        if self.is_rest_day(year, month, day) {
            DayType::Rest
        } else {
            DayType::Work
        }
    }
}

/// Repos = week-end uniquement (aucun férié).
#[derive(Debug, Default, Clone, Copy)]
pub struct WeekendClassifier;

impl DayClassifier for WeekendClassifier {
    fn is_rest_day(&self, year: i32, month: u32, day: u32) -> bool {
        is_weekend(year, month, day)
    }
}

/// Jeu de jours fériés : (année, mois, jour) → nom.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidaySet {
    by_date: BTreeMap<(i32, u32, u32), String>,
}

impl HolidaySet {
    pub fn insert<N: Into<String>>(&mut self, year: i32, month: u32, day: u32, name: N) {
        self.by_date.insert((year, month, day), name.into());
    }

    pub fn contains(&self, year: i32, month: u32, day: u32) -> bool {
        self.by_date.contains_key(&(year, month, day))
    }

    pub fn name_of(&self, year: i32, month: u32, day: u32) -> Option<&str> {
        self.by_date.get(&(year, month, day)).map(String::as_str)
    }

    /// Fériés d'une année, triés par date.
    pub fn year_holidays(&self, year: i32) -> Vec<(u32, u32, &str)> {
        self.by_date
            .range((year, 0, 0)..(year + 1, 0, 0))
            .map(|(&(_, m, d), name)| (m, d, name.as_str()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}

/// Repos = week-end ou férié.
#[derive(Debug, Clone, Default)]
pub struct RestDayCalendar {
    holidays: HolidaySet,
}

impl RestDayCalendar {
    pub fn new(holidays: HolidaySet) -> Self {
        Self { holidays }
    }

    /// Calendrier basé sur le jeu de fériés embarqué.
    pub fn builtin() -> Self {
        Self::new(crate::holidays::builtin_holidays())
    }

    pub fn holiday_name(&self, year: i32, month: u32, day: u32) -> Option<&str> {
        self.holidays.name_of(year, month, day)
    }

    pub fn holidays(&self) -> &HolidaySet {
        &self.holidays
    }
}

impl DayClassifier for RestDayCalendar {
    fn is_rest_day(&self, year: i32, month: u32, day: u32) -> bool {
        is_weekend(year, month, day) || self.holidays.contains(year, month, day)
    }
}

/// Source externe de jours fériés.
pub trait HolidaySource {
    fn fetch(&self) -> anyhow::Result<HolidaySet>;
}

/// Fichier JSON au format holidays-jp : `{"YYYY-MM-DD": "nom", ...}`.
#[derive(Debug, Clone)]
pub struct FileHolidaySource {
    path: PathBuf,
}

impl FileHolidaySource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl HolidaySource for FileHolidaySource {
    fn fetch(&self) -> anyhow::Result<HolidaySet> {
        let data = fs::read(&self.path)
            .with_context(|| format!("reading holidays {}", self.path.display()))?;
        let raw: BTreeMap<String, String> =
            serde_json::from_slice(&data).with_context(|| "parsing holidays payload")?;
        let mut set = HolidaySet::default();
        for (date_str, name) in raw {
            let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                .with_context(|| format!("invalid holiday date: {date_str}"))?;
            set.insert(date.year(), date.month(), date.day(), name);
        }
        Ok(set)
    }
}

/// Cache de fériés avec validité bornée et jeu de secours explicite.
///
/// Un échec de la source sert le jeu de secours et ne bloque jamais la
/// génération.
#[derive(Debug)]
pub struct CachedHolidays<S> {
    source: S,
    fallback: HolidaySet,
    ttl: Duration,
    cached: Option<HolidaySet>,
    fetched_at: Option<DateTime<Utc>>,
    using_fallback: bool,
}

impl<S: HolidaySource> CachedHolidays<S> {
    pub fn new(source: S, fallback: HolidaySet, ttl: Duration) -> Self {
        Self {
            source,
            fallback,
            ttl,
            cached: None,
            fetched_at: None,
            using_fallback: false,
        }
    }

    /// Cache d'une heure sur le jeu embarqué, comme l'application d'origine.
    pub fn with_builtin_fallback(source: S) -> Self {
        Self::new(source, crate::holidays::builtin_holidays(), Duration::hours(1))
    }

    /// Renvoie le jeu courant, en rafraîchissant si la validité est dépassée.
    pub fn get(&mut self, now: DateTime<Utc>) -> &HolidaySet {
        let fresh = match (self.cached.as_ref(), self.fetched_at) {
            (Some(_), Some(at)) => now - at < self.ttl,
            _ => false,
        };
        if !fresh {
            match self.source.fetch() {
                Ok(set) => {
                    self.cached = Some(set);
                    self.fetched_at = Some(now);
                    self.using_fallback = false;
                }
                Err(_) => {
                    self.cached = None;
                    self.fetched_at = None;
                    self.using_fallback = true;
                }
            }
        }
        self.cached.as_ref().unwrap_or(&self.fallback)
    }

    pub fn is_using_fallback(&self) -> bool {
        self.using_fallback
    }

    pub fn last_fetched(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }
}
