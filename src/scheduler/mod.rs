mod assignment;
mod balance;
mod types;
mod util;

pub use types::{Diagnostic, Generated, PolicyBounds, SchedError, StaffingPolicy};

use crate::calendar::DayClassifier;
use crate::model::{Employee, Schedule};

/// Planner : porte la politique d'effectifs et enchaîne les deux passes.
#[derive(Debug, Default, Clone, Copy)]
pub struct Planner {
    policy: StaffingPolicy,
}

impl Planner {
    pub fn new() -> Self {
        Self {
            policy: StaffingPolicy::default(),
        }
    }

    pub fn with_policy(policy: StaffingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &StaffingPolicy {
        &self.policy
    }

    /// Génère le planning du mois pour les membres actifs (nom non vide).
    ///
    /// Calcul synchrone et déterministe ; rien n'est publié en cas d'erreur.
    pub fn generate(
        &self,
        employees: &[Employee],
        year: i32,
        month: u32,
        classifier: &dyn DayClassifier,
    ) -> Result<Generated, SchedError> {
        let active: Vec<&Employee> = employees.iter().filter(|e| e.is_active()).collect();
        if active.is_empty() {
            return Err(SchedError::NoActiveEmployee);
        }
        let schedule = Schedule::new(year, month).ok_or(SchedError::InvalidMonth(month))?;

        let mut state = GenerationState::new(schedule, active.len());
        let mut diagnostics = Vec::new();
        assignment::initial_pass(&mut state, &active, classifier, &self.policy, &mut diagnostics);
        balance::reconcile(&mut state, &active, classifier, &self.policy, &mut diagnostics);

        Ok(Generated {
            schedule: state.schedule,
            diagnostics,
        })
    }
}

/// État mutable d'une invocation : planning en construction et compteurs
/// par membre actif (indexés par position dans la liste active). Détruit à
/// la fin de l'appel.
struct GenerationState {
    schedule: Schedule,
    work_days: Vec<u32>,
    consecutive: Vec<u32>,
}

impl GenerationState {
    fn new(schedule: Schedule, active_count: usize) -> Self {
        Self {
            schedule,
            work_days: vec![0; active_count],
            consecutive: vec![0; active_count],
        }
    }
}
