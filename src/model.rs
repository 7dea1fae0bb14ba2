use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Identifiant fort pour Employee
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Membre de l'équipe, avec son quota mensuel et ses jours bloqués.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub required_days: u32,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub unavailable_days: BTreeSet<u32>,
}

impl Employee {
    pub fn new<N: Into<String>>(name: N, required_days: u32) -> Self {
        Self {
            id: EmployeeId::random(),
            name: name.into(),
            required_days,
            unavailable_days: BTreeSet::new(),
        }
    }

    pub fn with_unavailable<N: Into<String>, I: IntoIterator<Item = u32>>(
        name: N,
        required_days: u32,
        unavailable: I,
    ) -> Self {
        let mut emp = Self::new(name, required_days);
        emp.unavailable_days = unavailable.into_iter().collect();
        emp
    }

    /// Un nom vide exclut le membre de la génération.
    pub fn is_active(&self) -> bool {
        !self.name.trim().is_empty()
    }

    pub fn is_unavailable(&self, day: u32) -> bool {
        self.unavailable_days.contains(&day)
    }
}

/// Type de journée : ouvrée ou de repos (week-end / férié).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayType {
    Work,
    Rest,
}

/// Nombre de jours du mois (mois 1..=12). `None` si le mois est invalide.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(next.signed_duration_since(first).num_days() as u32)
}

/// Planning mensuel : jour (1..=N) → liste ordonnée d'ids, sans doublon.
///
/// Construit par la génération puis exposé en lecture seule ; les mutateurs
/// restent `pub(crate)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    year: i32,
    month: u32,
    days: Vec<Vec<EmployeeId>>,
}

impl Schedule {
    pub(crate) fn new(year: i32, month: u32) -> Option<Self> {
        let len = days_in_month(year, month)?;
        Some(Self {
            year,
            month,
            days: vec![Vec::new(); len as usize],
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Mois 1..=12.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn days_in_month(&self) -> u32 {
        self.days.len() as u32
    }

    /// Ids assignés au jour donné (1..=N), dans l'ordre d'insertion.
    pub fn assigned(&self, day: u32) -> &[EmployeeId] {
        &self.days[(day - 1) as usize]
    }

    pub fn contains(&self, day: u32, id: &EmployeeId) -> bool {
        self.assigned(day).contains(id)
    }

    pub fn staff_count(&self, day: u32) -> usize {
        self.assigned(day).len()
    }

    /// Total des jours travaillés, recomputé par balayage complet.
    pub fn work_days_count(&self, id: &EmployeeId) -> u32 {
        self.days.iter().filter(|d| d.contains(id)).count() as u32
    }

    pub(crate) fn assign(&mut self, day: u32, id: &EmployeeId) {
        let slot = &mut self.days[(day - 1) as usize];
        if !slot.contains(id) {
            slot.push(id.clone());
        }
    }

    pub(crate) fn remove(&mut self, day: u32, id: &EmployeeId) {
        self.days[(day - 1) as usize].retain(|x| x != id);
    }
}
