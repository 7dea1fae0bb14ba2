use super::{GenerationState, StaffingPolicy};
use crate::model::{Employee, EmployeeId, Schedule};

/// Ratio d'avancement vers le quota : jours travaillés / max(quota, 1).
pub(super) fn progress_ratio(work_days: u32, required: u32) -> f64 {
    f64::from(work_days) / f64::from(required.max(1))
}

/// Tri stable à deux niveaux : les séries proches du seuil souple passent en
/// queue (dépriorisées, pas exclues), puis ratio d'avancement croissant.
pub(super) fn rank_candidates(
    candidates: &mut [usize],
    active: &[&Employee],
    state: &GenerationState,
    policy: &StaffingPolicy,
) {
    candidates.sort_by(|&a, &b| {
        let a_long = state.consecutive[a] >= policy.soft_consecutive;
        let b_long = state.consecutive[b] >= policy.soft_consecutive;
        a_long.cmp(&b_long).then_with(|| {
            let ra = progress_ratio(state.work_days[a], active[a].required_days);
            let rb = progress_ratio(state.work_days[b], active[b].required_days);
            ra.total_cmp(&rb)
        })
    });
}

/// Longueur de la série que créerait l'insertion du membre au jour donné,
/// recomputée localement autour de ce jour.
pub(super) fn run_with_insertion(schedule: &Schedule, id: &EmployeeId, day: u32) -> u32 {
    let days = schedule.days_in_month();
    let mut run = 1u32;
    let mut d = day;
    while d > 1 && schedule.contains(d - 1, id) {
        d -= 1;
        run += 1;
    }
    let mut d = day;
    while d < days && schedule.contains(d + 1, id) {
        d += 1;
        run += 1;
    }
    run
}
