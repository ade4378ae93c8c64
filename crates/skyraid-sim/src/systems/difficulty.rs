//! Escalation system: steps difficulty up on a fixed run-time interval.

use skyraid_core::events::SimEvent;
use skyraid_core::profile::{ClassBaseline, DifficultyProfile, EscalationPolicy};

use crate::run_state::RunState;

/// Apply at most one escalation step if the interval has elapsed.
/// Returns true when a step was applied.
pub fn run(run: &mut RunState, profile: &DifficultyProfile, events: &mut Vec<SimEvent>) -> bool {
    let Some(policy) = profile.escalation.as_ref() else {
        return false;
    };
    let elapsed = run.time.elapsed_ms;
    if elapsed.saturating_sub(run.last_escalation_ms) < policy.interval_ms {
        return false;
    }

    run.last_escalation_ms = elapsed;
    run.escalation_level += 1;
    escalate(run, policy);

    tracing::info!(
        level = run.escalation_level,
        elapsed_ms = elapsed,
        cycle_ms = run.cycle_period_ms(),
        elite_probability = run.elite_probability,
        max_enemies = run.max_enemies,
        "difficulty escalated"
    );
    events.push(SimEvent::DifficultyEscalated {
        level: run.escalation_level,
    });
    true
}

fn escalate(run: &mut RunState, policy: &EscalationPolicy) {
    for baseline in [&mut run.mob, &mut run.elite, &mut run.elite_plus] {
        scale(baseline, policy);
    }
    run.cycle_duration_ms =
        (run.cycle_duration_ms * policy.cycle_multiplier).max(policy.cycle_floor_ms as f64);
    run.elite_probability =
        (run.elite_probability + policy.elite_probability_step).min(policy.elite_probability_cap);
    run.max_enemies = (run.max_enemies + policy.max_enemies_step).min(policy.max_enemies_cap);
}

fn scale(baseline: &mut ClassBaseline, policy: &EscalationPolicy) {
    baseline.hp *= policy.hp_multiplier;
    baseline.speed *= policy.speed_multiplier;
}
