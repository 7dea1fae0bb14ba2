use super::{
    types::{Diagnostic, PolicyBounds},
    util, GenerationState, StaffingPolicy,
};
use crate::calendar::DayClassifier;
use crate::model::Employee;

/// Passe d'équilibrage : ramène chaque membre, dans l'ordre de la liste, à
/// son quota exact. Chaque passage lit et modifie le planning laissé par les
/// précédents — séquence stricte, sensible à l'ordre.
pub(super) fn reconcile(
    state: &mut GenerationState,
    active: &[&Employee],
    classifier: &dyn DayClassifier,
    policy: &StaffingPolicy,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for (i, emp) in active.iter().enumerate() {
        top_up(state, i, emp, classifier, policy, diagnostics);
        trim(state, i, emp, classifier, policy, diagnostics);
    }
}

fn top_up(
    state: &mut GenerationState,
    i: usize,
    emp: &Employee,
    classifier: &dyn DayClassifier,
    policy: &StaffingPolicy,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let year = state.schedule.year();
    let month = state.schedule.month();
    let days = state.schedule.days_in_month();

    while state.work_days[i] < emp.required_days {
        // jours candidats : (jour, série créée, effectif actuel)
        let mut feasible: Vec<(u32, u32, usize)> = Vec::new();
        for day in 1..=days {
            if state.schedule.contains(day, &emp.id) || emp.is_unavailable(day) {
                continue;
            }
            let run = util::run_with_insertion(&state.schedule, &emp.id, day);
            if run > policy.max_consecutive {
                continue;
            }
            let bounds = policy.bounds(classifier.day_type(year, month, day));
            let staff = state.schedule.staff_count(day);
            if let Some(max) = bounds.max {
                if staff >= max as usize {
                    continue;
                }
            }
            feasible.push((day, run, staff));
        }

        // évitement souple : dès qu'une alternative reste sous le seuil de
        // série, les jours qui l'atteindraient sont écartés
        if feasible
            .iter()
            .any(|&(_, run, _)| run < policy.soft_consecutive)
        {
            feasible.retain(|&(_, run, _)| run < policy.soft_consecutive);
        }

        // série la plus courte, puis effectif le plus faible, puis jour le
        // plus tôt
        let best = feasible
            .iter()
            .copied()
            .min_by(|a, b| (a.1, a.2, a.0).cmp(&(b.1, b.2, b.0)));

        match best {
            Some((day, _, _)) => {
                state.schedule.assign(day, &emp.id);
                state.work_days[i] += 1;
            }
            None => {
                diagnostics.push(Diagnostic::QuotaUnmet {
                    employee: emp.id.clone(),
                    name: emp.name.clone(),
                    assigned: state.work_days[i],
                    required: emp.required_days,
                });
                break;
            }
        }
    }
}

fn trim(
    state: &mut GenerationState,
    i: usize,
    emp: &Employee,
    classifier: &dyn DayClassifier,
    policy: &StaffingPolicy,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let year = state.schedule.year();
    let month = state.schedule.month();

    while state.work_days[i] > emp.required_days {
        // trois niveaux de préférence : au-dessus de l'idéal, puis au-dessus
        // du minimum, puis n'importe quel jour assigné (le quota prime sur
        // le plancher, qui est alors signalé)
        let picked = pick_removal(state, emp, classifier, policy, |staff, b| staff > b.ideal)
            .or_else(|| pick_removal(state, emp, classifier, policy, |staff, b| staff > b.min))
            .or_else(|| pick_removal(state, emp, classifier, policy, |_, _| true));

        match picked {
            Some(day) => {
                state.schedule.remove(day, &emp.id);
                state.work_days[i] -= 1;
                let bounds = policy.bounds(classifier.day_type(year, month, day));
                let staff = state.schedule.staff_count(day) as u32;
                if staff < bounds.min {
                    diagnostics.push(Diagnostic::BelowMinimum {
                        day,
                        assigned: staff,
                        min: bounds.min,
                    });
                }
            }
            None => {
                diagnostics.push(Diagnostic::ExcessUnresolved {
                    employee: emp.id.clone(),
                    name: emp.name.clone(),
                    assigned: state.work_days[i],
                    required: emp.required_days,
                });
                break;
            }
        }
    }
}

/// Jour de retrait au sein d'un niveau d'éligibilité : l'effectif le plus
/// chargé d'abord (aplatit les pics), premier jour en cas d'égalité.
fn pick_removal<F>(
    state: &GenerationState,
    emp: &Employee,
    classifier: &dyn DayClassifier,
    policy: &StaffingPolicy,
    eligible: F,
) -> Option<u32>
where
    F: Fn(u32, PolicyBounds) -> bool,
{
    let year = state.schedule.year();
    let month = state.schedule.month();
    let days = state.schedule.days_in_month();

    let mut best: Option<(u32, u32)> = None;
    for day in 1..=days {
        if !state.schedule.contains(day, &emp.id) {
            continue;
        }
        let staff = state.schedule.staff_count(day) as u32;
        let bounds = policy.bounds(classifier.day_type(year, month, day));
        if !eligible(staff, bounds) {
            continue;
        }
        if best.map_or(true, |(_, s)| staff > s) {
            best = Some((day, staff));
        }
    }
    best.map(|(day, _)| day)
}
