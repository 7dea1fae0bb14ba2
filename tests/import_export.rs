#![forbid(unsafe_code)]
use roulement::{
    io::{self, EmployeeRecord, RosterFile},
    Employee, JsonStorage, Planner, Storage, WeekendClassifier,
};
use std::fs;

#[test]
fn import_reads_web_app_payload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.json");
    fs::write(
        &path,
        r#"{
            "year": 2025,
            "month": 7,
            "employees": [
                { "name": "test1", "requiredDays": 19, "unavailableDays": [] },
                { "name": "テスト1", "requiredDays": 22, "unavailableDays": [1, 3, 5, 11, 17] }
            ]
        }"#,
    )
    .unwrap();

    let imported = io::import_employees_json(&path).unwrap();
    assert_eq!(imported.year, Some(2025));
    // mois 0-based sur le fil → 1-based en interne
    assert_eq!(imported.month, Some(8));
    assert_eq!(imported.employees.len(), 2);
    assert_eq!(imported.employees[0].name, "test1");
    assert_eq!(imported.employees[1].required_days, 22);
    assert!(imported.employees[1].is_unavailable(17));
    assert!(!imported.employees[1].is_unavailable(2));
    // ids frais et distincts
    assert_ne!(imported.employees[0].id, imported.employees[1].id);
}

#[test]
fn import_rejects_malformed_payloads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");

    // employees manquant
    fs::write(&path, r#"{ "year": 2025 }"#).unwrap();
    assert!(io::import_employees_json(&path).is_err());

    // unavailableDays non-tableau
    fs::write(
        &path,
        r#"{ "employees": [ { "name": "a", "requiredDays": 3, "unavailableDays": 5 } ] }"#,
    )
    .unwrap();
    assert!(io::import_employees_json(&path).is_err());

    // champ requis absent
    fs::write(&path, r#"{ "employees": [ { "name": "a" } ] }"#).unwrap();
    assert!(io::import_employees_json(&path).is_err());

    // mois hors plage (0-based : 0..=11)
    fs::write(
        &path,
        r#"{ "month": 12, "employees": [ { "name": "a", "requiredDays": 1, "unavailableDays": [] } ] }"#,
    )
    .unwrap();
    assert!(io::import_employees_json(&path).is_err());
}

#[test]
fn export_then_import_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.json");
    let employees = vec![
        Employee::new("alice", 12),
        Employee::with_unavailable("bob", 8, [2, 4]),
    ];

    io::export_employees_json(&path, &employees, 2025, 8).unwrap();
    let imported = io::import_employees_json(&path).unwrap();

    assert_eq!(imported.year, Some(2025));
    assert_eq!(imported.month, Some(8));
    assert_eq!(imported.employees[0].name, "alice");
    assert_eq!(imported.employees[1].unavailable_days.len(), 2);
}

#[test]
fn schedule_exports_have_expected_shape() {
    let dir = tempfile::tempdir().unwrap();
    let employees = vec![Employee::new("alice", 3)];
    let generated = Planner::new()
        .generate(&employees, 2025, 7, &WeekendClassifier)
        .unwrap();

    let json_path = dir.path().join("schedule.json");
    io::export_schedule_json(&json_path, &generated.schedule, &employees).unwrap();
    let value: serde_json::Value =
        serde_json::from_slice(&fs::read(&json_path).unwrap()).unwrap();
    assert_eq!(value["year"], 2025);
    assert_eq!(value["month"], 6); // 0-based sur le fil
    assert_eq!(value["days"].as_object().unwrap().len(), 31);

    let csv_path = dir.path().join("attendance.csv");
    io::export_attendance_csv(&csv_path, &generated.schedule, &employees).unwrap();
    let content = fs::read_to_string(&csv_path).unwrap();
    let mut lines = content.lines();
    assert!(lines.next().unwrap().starts_with("name,1,2,3"));
    let alice = lines.next().unwrap();
    assert!(alice.starts_with("alice,"));
    assert!(alice.ends_with("3/3"));
    assert!(content.lines().last().unwrap().starts_with("staff,"));
}

#[test]
fn storage_roundtrips_roster_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.json");
    let storage = JsonStorage::open(&path).unwrap();

    let roster = RosterFile {
        year: Some(2025),
        month: Some(7),
        employees: vec![EmployeeRecord {
            name: "alice".to_string(),
            required_days: 10,
            unavailable_days: vec![1, 2],
        }],
    };
    storage.save(&roster).unwrap();

    let loaded = storage.load().unwrap();
    assert_eq!(loaded.year, Some(2025));
    assert_eq!(loaded.month, Some(7));
    assert_eq!(loaded.employees.len(), 1);
    assert_eq!(loaded.employees[0].unavailable_days, vec![1, 2]);
}
