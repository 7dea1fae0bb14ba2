use crate::model::{Employee, EmployeeId, Schedule};
use anyhow::{bail, Context};
use csv::WriterBuilder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Enregistrement d'échange d'un membre (format JSON de l'application web).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    pub name: String,
    pub required_days: u32,
    pub unavailable_days: Vec<u32>,
}

/// Fichier d'échange complet. Sur le fil, `month` est 0-based (0 = janvier).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    pub employees: Vec<EmployeeRecord>,
}

/// Résultat d'import : ids frais, mois converti en 1..=12.
#[derive(Debug, Clone)]
pub struct ImportedRoster {
    pub employees: Vec<Employee>,
    pub year: Option<i32>,
    pub month: Option<u32>,
}

pub fn import_employees_json<P: AsRef<Path>>(path: P) -> anyhow::Result<ImportedRoster> {
    let data =
        fs::read(&path).with_context(|| format!("reading {}", path.as_ref().display()))?;
    let file: RosterFile = serde_json::from_slice(&data).with_context(|| {
        "parsing roster: an employees array with name, requiredDays and unavailableDays is required"
    })?;
    roster_from_file(file)
}

pub fn roster_from_file(file: RosterFile) -> anyhow::Result<ImportedRoster> {
    let month = match file.month {
        Some(m) if m > 11 => bail!("invalid wire month {m} (expected 0..=11)"),
        Some(m) => Some(m + 1),
        None => None,
    };
    let employees = file
        .employees
        .into_iter()
        .map(|rec| Employee::with_unavailable(rec.name, rec.required_days, rec.unavailable_days))
        .collect();
    Ok(ImportedRoster {
        employees,
        year: file.year,
        month,
    })
}

/// Export JSON des membres (mois 1..=12 côté appelant, 0-based sur le fil).
pub fn export_employees_json<P: AsRef<Path>>(
    path: P,
    employees: &[Employee],
    year: i32,
    month: u32,
) -> anyhow::Result<()> {
    let file = RosterFile {
        year: Some(year),
        month: Some(month.checked_sub(1).context("month must be 1..=12")?),
        employees: employees
            .iter()
            .map(|e| EmployeeRecord {
                name: e.name.clone(),
                required_days: e.required_days,
                unavailable_days: e.unavailable_days.iter().copied().collect(),
            })
            .collect(),
    };
    let s = serde_json::to_string_pretty(&file)?;
    fs::write(path, s)?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct ScheduleExport {
    year: i32,
    month: u32,
    days: BTreeMap<u32, Vec<String>>,
}

/// Export JSON du planning : jour → noms assignés (mois 0-based sur le fil).
pub fn export_schedule_json<P: AsRef<Path>>(
    path: P,
    schedule: &Schedule,
    employees: &[Employee],
) -> anyhow::Result<()> {
    let mut days = BTreeMap::new();
    for day in 1..=schedule.days_in_month() {
        let names = schedule
            .assigned(day)
            .iter()
            .map(|id| name_of(employees, id))
            .collect();
        days.insert(day, names);
    }
    let export = ScheduleExport {
        year: schedule.year(),
        month: schedule.month() - 1,
        days,
    };
    let s = serde_json::to_string_pretty(&export)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV du tableau de présence : une ligne par membre actif
/// (`○` assigné, `✕` indisponible), colonne `total` en `fait/quota`,
/// dernière ligne = effectif par jour.
pub fn export_attendance_csv<P: AsRef<Path>>(
    path: P,
    schedule: &Schedule,
    employees: &[Employee],
) -> anyhow::Result<()> {
    let days = schedule.days_in_month();
    let mut w = WriterBuilder::new().has_headers(false).from_path(path)?;

    let mut header = vec!["name".to_string()];
    header.extend((1..=days).map(|d| d.to_string()));
    header.push("total".to_string());
    w.write_record(&header)?;

    for emp in employees.iter().filter(|e| e.is_active()) {
        let mut row = vec![emp.name.clone()];
        for day in 1..=days {
            let mark = if emp.is_unavailable(day) {
                "✕"
            } else if schedule.contains(day, &emp.id) {
                "○"
            } else {
                ""
            };
            row.push(mark.to_string());
        }
        row.push(format!(
            "{}/{}",
            schedule.work_days_count(&emp.id),
            emp.required_days
        ));
        w.write_record(&row)?;
    }

    let mut totals = vec!["staff".to_string()];
    totals.extend((1..=days).map(|d| schedule.staff_count(d).to_string()));
    totals.push(String::new());
    w.write_record(&totals)?;

    w.flush()?;
    Ok(())
}

fn name_of(employees: &[Employee], id: &EmployeeId) -> String {
    employees
        .iter()
        .find(|e| &e.id == id)
        .map(|e| e.name.clone())
        .unwrap_or_default()
}
