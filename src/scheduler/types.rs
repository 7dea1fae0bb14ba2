use crate::model::{DayType, EmployeeId, Schedule};
use std::fmt;
use thiserror::Error;

/// Bornes d'effectif pour un type de journée.
#[derive(Debug, Clone, Copy)]
pub struct PolicyBounds {
    pub ideal: u32,
    pub min: u32,
    /// `None` = pas de plafond.
    pub max: Option<u32>,
}

/// Politique d'effectifs, remplaçable dans son ensemble.
#[derive(Debug, Clone, Copy)]
pub struct StaffingPolicy {
    pub work: PolicyBounds,
    pub rest: PolicyBounds,
    /// Plafond global de la passe initiale sur les jours ouvrés.
    pub phase_one_cap: u32,
    /// Limite dure de jours consécutifs.
    pub max_consecutive: u32,
    /// Seuil à partir duquel un candidat est dépriorisé, sans exclusion.
    pub soft_consecutive: u32,
}

impl Default for StaffingPolicy {
    fn default() -> Self {
        Self {
            work: PolicyBounds {
                ideal: 5,
                min: 4,
                max: None,
            },
            rest: PolicyBounds {
                ideal: 2,
                min: 2,
                max: Some(3),
            },
            phase_one_cap: 6,
            max_consecutive: 7,
            soft_consecutive: 6,
        }
    }
}

impl StaffingPolicy {
    pub fn bounds(&self, day_type: DayType) -> PolicyBounds {
        match day_type {
            DayType::Work => self.work,
            DayType::Rest => self.rest,
        }
    }
}

/// Avertissement non fatal accumulé pendant la génération.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Effectif sous l'idéal un jour ouvré.
    BelowIdeal { day: u32, assigned: u32, ideal: u32 },
    /// Effectif sous le minimum.
    BelowMinimum { day: u32, assigned: u32, min: u32 },
    /// Quota d'un membre impossible à atteindre.
    QuotaUnmet {
        employee: EmployeeId,
        name: String,
        assigned: u32,
        required: u32,
    },
    /// Excédent d'un membre impossible à résorber.
    ExcessUnresolved {
        employee: EmployeeId,
        name: String,
        assigned: u32,
        required: u32,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::BelowIdeal {
                day,
                assigned,
                ideal,
            } => write!(f, "day {day}: {assigned} assigned, ideal is {ideal}"),
            Diagnostic::BelowMinimum { day, assigned, min } => {
                write!(f, "day {day}: {assigned} assigned, minimum is {min}")
            }
            Diagnostic::QuotaUnmet {
                name,
                assigned,
                required,
                ..
            } => write!(f, "quota unmet for {name}: {assigned}/{required} days"),
            Diagnostic::ExcessUnresolved {
                name,
                assigned,
                required,
                ..
            } => write!(f, "excess unresolved for {name}: {assigned}/{required} days"),
        }
    }
}

impl Diagnostic {
    /// Concerne-t-il le quota d'un membre (plutôt que l'effectif d'un jour) ?
    pub fn is_quota(&self) -> bool {
        matches!(
            self,
            Diagnostic::QuotaUnmet { .. } | Diagnostic::ExcessUnresolved { .. }
        )
    }
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("no active employee: every name is blank")]
    NoActiveEmployee,
    #[error("invalid month: {0} (expected 1..=12)")]
    InvalidMonth(u32),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Résultat complet d'une génération : planning + avertissements.
#[derive(Debug, Clone)]
pub struct Generated {
    pub schedule: Schedule,
    pub diagnostics: Vec<Diagnostic>,
}
