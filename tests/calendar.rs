#![forbid(unsafe_code)]
use chrono::{Duration, TimeZone, Utc};
use roulement::{
    calendar::{day_of_week, is_weekend, FileHolidaySource},
    days_in_month, CachedHolidays, DayClassifier, HolidaySet, HolidaySource, RestDayCalendar,
    WeekendClassifier,
};
use std::cell::Cell;
use std::rc::Rc;

#[test]
fn days_in_month_boundaries() {
    assert_eq!(days_in_month(2025, 12), Some(31)); // bascule décembre → janvier
    assert_eq!(days_in_month(2026, 1), Some(31));
    assert_eq!(days_in_month(2024, 2), Some(29)); // bissextile
    assert_eq!(days_in_month(2025, 2), Some(28));
    assert_eq!(days_in_month(2025, 4), Some(30));
    assert_eq!(days_in_month(2025, 0), None);
    assert_eq!(days_in_month(2025, 13), None);
}

#[test]
fn weekday_convention_is_sunday_zero() {
    // août 2025 : le 1er est un vendredi
    assert_eq!(day_of_week(2025, 8, 1), Some(5));
    assert_eq!(day_of_week(2025, 8, 2), Some(6));
    assert_eq!(day_of_week(2025, 8, 3), Some(0));
    assert!(is_weekend(2025, 8, 2));
    assert!(is_weekend(2025, 8, 3));
    assert!(!is_weekend(2025, 8, 4));
    assert_eq!(day_of_week(2025, 2, 30), None);
}

#[test]
fn builtin_calendar_knows_japanese_holidays() {
    let calendar = RestDayCalendar::builtin();
    // 11 août 2025 : 山の日, un lundi
    assert!(calendar.is_rest_day(2025, 8, 11));
    assert_eq!(calendar.holiday_name(2025, 8, 11), Some("山の日"));
    assert!(!calendar.is_rest_day(2025, 8, 12));
    assert!(calendar.is_rest_day(2025, 8, 9)); // samedi ordinaire

    // le classifieur week-end seul ignore le férié
    assert!(!WeekendClassifier.is_rest_day(2025, 8, 11));
}

#[test]
fn year_holidays_are_sorted_and_scoped() {
    let calendar = RestDayCalendar::builtin();
    let hol_2026 = calendar.holidays().year_holidays(2026);
    assert_eq!(hol_2026.first(), Some(&(1, 1, "元日")));
    assert_eq!(hol_2026.last(), Some(&(11, 23, "勤労感謝の日")));
    assert!(calendar.holidays().year_holidays(2030).is_empty());
}

#[test]
fn file_source_parses_holidays_jp_payload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("holidays.json");
    std::fs::write(
        &path,
        r#"{"2027-01-01": "元日", "2027-05-03": "憲法記念日"}"#,
    )
    .unwrap();

    let set = FileHolidaySource::new(&path).fetch().unwrap();
    assert_eq!(set.len(), 2);
    assert!(set.contains(2027, 1, 1));
    assert_eq!(set.name_of(2027, 5, 3), Some("憲法記念日"));

    std::fs::write(&path, r#"{"pas-une-date": "x"}"#).unwrap();
    assert!(FileHolidaySource::new(&path).fetch().is_err());
}

struct FailingSource;

impl HolidaySource for FailingSource {
    fn fetch(&self) -> anyhow::Result<HolidaySet> {
        anyhow::bail!("source unavailable")
    }
}

struct CountingSource {
    calls: Rc<Cell<u32>>,
}

impl HolidaySource for CountingSource {
    fn fetch(&self) -> anyhow::Result<HolidaySet> {
        self.calls.set(self.calls.get() + 1);
        let mut set = HolidaySet::default();
        set.insert(2025, 8, 11, "山の日");
        Ok(set)
    }
}

#[test]
fn cache_serves_fallback_when_source_fails() {
    let mut cache = CachedHolidays::with_builtin_fallback(FailingSource);
    let set = cache.get(Utc::now());
    assert!(set.contains(2025, 8, 11));
    assert!(cache.is_using_fallback());
    assert_eq!(cache.last_fetched(), None);
}

#[test]
fn cache_refreshes_only_after_ttl() {
    let calls = Rc::new(Cell::new(0));
    let source = CountingSource {
        calls: Rc::clone(&calls),
    };
    let mut cache = CachedHolidays::new(source, HolidaySet::default(), Duration::hours(1));

    let t0 = Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap();
    assert!(cache.get(t0).contains(2025, 8, 11));
    assert!(cache.get(t0 + Duration::minutes(30)).contains(2025, 8, 11));
    assert_eq!(calls.get(), 1);
    assert!(!cache.is_using_fallback());

    cache.get(t0 + Duration::hours(2));
    assert_eq!(calls.get(), 2);
}
