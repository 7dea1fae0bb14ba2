use super::{types::Diagnostic, util, GenerationState, StaffingPolicy};
use crate::calendar::DayClassifier;
use crate::model::{DayType, Employee};

/// Passe initiale : un balayage avant sur les jours 1..=N. L'ordre compte,
/// la priorité d'un jour dépend des compteurs accumulés les jours précédents.
pub(super) fn initial_pass(
    state: &mut GenerationState,
    active: &[&Employee],
    classifier: &dyn DayClassifier,
    policy: &StaffingPolicy,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let year = state.schedule.year();
    let month = state.schedule.month();
    let days = state.schedule.days_in_month();

    for day in 1..=days {
        let day_type = classifier.day_type(year, month, day);
        let bounds = policy.bounds(day_type);

        // candidats : disponibles ce jour et sous la limite dure de série
        let mut candidates: Vec<usize> = (0..active.len())
            .filter(|&i| !active[i].is_unavailable(day))
            .filter(|&i| state.consecutive[i] < policy.max_consecutive)
            .collect();
        util::rank_candidates(&mut candidates, active, state, policy);

        let first_wave = match bounds.max {
            Some(max) => bounds.ideal.min(max),
            None => bounds.ideal,
        };

        let mut assigned = 0u32;
        for &i in &candidates {
            if assigned >= first_wave {
                break;
            }
            state.schedule.assign(day, &active[i].id);
            state.work_days[i] += 1;
            assigned += 1;
        }

        // jours ouvrés : complète avec les membres encore sous leur quota,
        // jusqu'au plafond de la passe
        if day_type == DayType::Work && (assigned as usize) < candidates.len() {
            let mut need_more: Vec<usize> = candidates[assigned as usize..]
                .iter()
                .copied()
                .filter(|&i| state.work_days[i] < active[i].required_days)
                .collect();
            util::rank_candidates(&mut need_more, active, state, policy);
            for &i in &need_more {
                if assigned >= policy.phase_one_cap {
                    break;
                }
                state.schedule.assign(day, &active[i].id);
                state.work_days[i] += 1;
                assigned += 1;
            }
        }

        for i in 0..active.len() {
            if state.schedule.contains(day, &active[i].id) {
                state.consecutive[i] += 1;
            } else {
                state.consecutive[i] = 0;
            }
        }

        if day_type == DayType::Work {
            if assigned < bounds.min {
                diagnostics.push(Diagnostic::BelowMinimum {
                    day,
                    assigned,
                    min: bounds.min,
                });
            } else if assigned < bounds.ideal {
                diagnostics.push(Diagnostic::BelowIdeal {
                    day,
                    assigned,
                    ideal: bounds.ideal,
                });
            }
        }
    }
}
