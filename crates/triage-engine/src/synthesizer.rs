//! Job Synthesis
//!
//! Turns "someone in this zone needs care" into at most one concrete action
//! for one caregiver. The checks run in a fixed order and the first one that
//! matches wins:
//!
//! 1. no pool for the zone, or an empty pool
//! 2. a queued player directive
//! 3. an assigned group duty
//! 4. not an eligible caregiver
//! 5. a player-forced activity
//! 6. already on a caregiving run (and, on the rare tick, fighting)
//! 7. eating, when eating is allowed to finish
//! 8. no candidate this caregiver can reserve and reach
//! 9. current activity cannot be interrupted
//! 10. urgently hungry: eat first (before or after ending the activity)
//! 11. rescue to a bed, or tend in place / in bed
//! 12. claim the patient: remove it from the pool

use triage_types::{
    Action, ActivityKind, AgentState, CallSite, PatientState, PawnId, TendJob, ThingId,
};

use crate::config::{HungerCheck, PolicyConfig};
use crate::eligibility::{
    can_be_rescued, check_caregiver, good_posture_for_tend, has_treatable_condition, Ineligible,
};
use crate::error::HostError;
use crate::host::{ReservationTarget, TriageHost};
use crate::pool::CandidatePool;

/// Why a decision produced no action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skip {
    NoZone,
    EmptyPool,
    PlayerDirective,
    OnDuty,
    Ineligible(Ineligible),
    PlayerForced,
    AlreadyCaregiving,
    Fighting,
    Eating,
    NoReachablePatient,
    NotInterruptible,
    ReservationFailed(HostError),
}

impl Skip {
    /// Policy conflicts are expected and frequent; everything else is worth
    /// a diagnostic line.
    fn is_policy_conflict(&self) -> bool {
        matches!(
            self,
            Skip::PlayerDirective | Skip::OnDuty | Skip::PlayerForced | Skip::AlreadyCaregiving
        )
    }
}

/// Decides what a caregiver should do, given its zone's pool.
///
/// Never fails: every skip reason resolves to [`Action::None`], to be retried
/// on the next trigger.
pub fn make_decision<H: TriageHost + ?Sized>(
    host: &mut H,
    pool: Option<&mut CandidatePool>,
    policy: &PolicyConfig,
    agent: PawnId,
    call_site: CallSite,
) -> Action {
    match decide(host, pool, policy, agent, call_site) {
        Ok(action) => action,
        Err(skip) => {
            if !skip.is_policy_conflict() {
                diag!(policy, agent = %agent, %call_site, reason = ?skip, "no triage decision");
            }
            Action::None
        }
    }
}

fn decide<H: TriageHost + ?Sized>(
    host: &mut H,
    pool: Option<&mut CandidatePool>,
    policy: &PolicyConfig,
    agent_id: PawnId,
    call_site: CallSite,
) -> Result<Action, Skip> {
    let pool = pool.ok_or(Skip::NoZone)?;
    if pool.is_empty() {
        return Err(Skip::EmptyPool);
    }

    let agent = check_agent(&*host, policy, agent_id)?;
    if let Some(activity) = agent.activity {
        if activity.player_forced {
            return Err(Skip::PlayerForced);
        }
        if activity.kind.is_caregiving() {
            return Err(Skip::AlreadyCaregiving);
        }
        if call_site == CallSite::RareTick && activity.kind == ActivityKind::Fighting {
            return Err(Skip::Fighting);
        }
        if activity.kind == ActivityKind::Eating && policy.allow_eating {
            return Err(Skip::Eating);
        }
    }

    let patient = select_patient(&*host, pool, policy, &agent).ok_or(Skip::NoReachablePatient)?;

    if !can_interrupt(&agent, policy) {
        return Err(Skip::NotInterruptible);
    }

    // The hunger check placement only decides whether the meal ends the
    // current activity first.
    if policy.hunger_check == HungerCheck::BeforeInterrupt {
        if let Some(food) = food_first(&*host, policy, &agent) {
            return Ok(Action::Eat { food });
        }
    }
    if agent.activity.is_some_and(|a| a.kind != ActivityKind::Idle) {
        host.end_activity(agent.id);
    }

    if policy.hunger_check == HungerCheck::AfterInterrupt {
        if let Some(food) = food_first(&*host, policy, &agent) {
            return Ok(Action::Eat { food });
        }
    }

    let action = synthesize_treatment(host, &agent, &patient)?;
    pool.remove(patient.id);

    tracing::info!(
        agent = %agent.id,
        patient = %patient.id,
        action = action.label(),
        %call_site,
        "dispatching caregiver"
    );
    Ok(action)
}

/// Steps 2–4: reads the agent and applies the standing overrides.
fn check_agent<H: TriageHost + ?Sized>(
    host: &H,
    policy: &PolicyConfig,
    agent_id: PawnId,
) -> Result<AgentState, Skip> {
    let agent = host.agent(agent_id).map_err(|err| {
        diag!(policy, agent = %agent_id, error = %err, "caregiver lookup failed");
        Skip::Ineligible(Ineligible::HostFault(err))
    })?;
    if agent.queued_player_directive {
        return Err(Skip::PlayerDirective);
    }
    if agent.on_duty {
        return Err(Skip::OnDuty);
    }
    check_caregiver(&agent, policy).map_err(Skip::Ineligible)?;
    Ok(agent)
}

/// First pooled patient this caregiver can reserve and reach.
pub fn select_patient<H: TriageHost + ?Sized>(
    host: &H,
    pool: &CandidatePool,
    policy: &PolicyConfig,
    agent: &AgentState,
) -> Option<PatientState> {
    pool.iter().find_map(|id| {
        if id == agent.id && !agent.self_tend {
            return None;
        }
        let patient = host.patient(id).ok()?;
        if !has_treatable_condition(&patient) {
            return None;
        }
        let reachable_posture = good_posture_for_tend(&patient, Some(agent.id))
            || can_be_rescued(&patient, policy, host);
        if !reachable_posture || !host.can_reserve_and_reach(agent.id, id) {
            return None;
        }
        Some(patient)
    })
}

fn can_interrupt(agent: &AgentState, policy: &PolicyConfig) -> bool {
    let Some(activity) = agent.activity else {
        return true;
    };
    match activity.kind {
        ActivityKind::AwaitingSurgery { emergency: true } => false,
        ActivityKind::AwaitingSurgery { emergency: false } => {
            policy.interrupt_surgery_if_injured && agent.injured
        }
        _ => activity.interruptible,
    }
}

fn food_first<H: TriageHost + ?Sized>(
    host: &H,
    policy: &PolicyConfig,
    agent: &AgentState,
) -> Option<ThingId> {
    if !policy.allow_eating || !agent.hunger.is_urgent() {
        return None;
    }
    host.find_food_for(agent.id)
}

/// Step 11: picks between tending in bed, rescuing to a bed, and tending in
/// place, then reserves the targets.
fn synthesize_treatment<H: TriageHost + ?Sized>(
    host: &mut H,
    agent: &AgentState,
    patient: &PatientState,
) -> Result<Action, Skip> {
    let medicine = host.best_medicine_for(agent.id, patient.id);
    let self_treatment = patient.id == agent.id;

    let bed = if patient.in_bed() || self_treatment {
        None
    } else {
        host.find_bed_for(agent.id, patient.id)
    };

    let claim = ReservationTarget::Pawn(patient.id);
    host.reserve(agent.id, claim).map_err(Skip::ReservationFailed)?;

    let action = match bed {
        Some(bed) => {
            if let Err(err) = host.reserve(agent.id, ReservationTarget::Thing(bed)) {
                // No job will run to release the patient, so give it back now.
                host.unreserve(agent.id, claim);
                return Err(Skip::ReservationFailed(err));
            }
            Action::Rescue {
                patient: patient.id,
                bed,
                follow_up: TendJob {
                    patient: patient.id,
                    medicine,
                    in_place: false,
                },
            }
        }
        None => Action::Tend(TendJob {
            patient: patient.id,
            medicine,
            in_place: !patient.in_bed(),
        }),
    };
    Ok(action)
}

/// Whether a resting caregiver should get up because someone needs care.
///
/// Only answers the question; ending the rest and picking the job are left to
/// the host and the next busy check.
pub fn should_wake<H: TriageHost + ?Sized>(
    host: &H,
    pool: Option<&CandidatePool>,
    policy: &PolicyConfig,
    agent_id: PawnId,
) -> bool {
    if !policy.wake_to_tend {
        return false;
    }
    let Some(pool) = pool.filter(|p| !p.is_empty()) else {
        return false;
    };
    let agent = match check_agent(host, policy, agent_id) {
        Ok(agent) => agent,
        Err(skip) => {
            if !skip.is_policy_conflict() {
                diag!(policy, agent = %agent_id, reason = ?skip, "not waking");
            }
            return false;
        }
    };
    let Some(activity) = agent.activity else {
        return false;
    };
    if !activity.kind.is_resting() || activity.player_forced || !activity.interruptible {
        return false;
    }
    select_patient(host, pool, policy, &agent).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockHost;
    use triage_types::fixtures::{self, HOME};
    use triage_types::{CurrentActivity, HungerLevel, Posture};

    fn policy() -> PolicyConfig {
        PolicyConfig::default()
    }

    fn pooled(host: &MockHost, policy: &PolicyConfig) -> CandidatePool {
        let mut pool = CandidatePool::new(HOME, policy.refresh_interval_ticks);
        pool.refresh(host, policy);
        pool
    }

    fn decide_for(host: &mut MockHost, pool: &mut CandidatePool, policy: &PolicyConfig, agent: u64) -> Action {
        make_decision(host, Some(pool), policy, PawnId(agent), CallSite::BusyCheck)
    }

    #[test]
    fn test_bedded_patient_gets_tend_in_bed() {
        let policy = policy();
        let mut host = MockHost::new()
            .with_agent(fixtures::idle_doctor(1, HOME))
            .with_patient(fixtures::bedded_patient(2, HOME, "Gunshot"));
        host.medicine = Some(ThingId(50));
        let mut pool = pooled(&host, &policy);

        let action = decide_for(&mut host, &mut pool, &policy, 1);
        assert_eq!(
            action,
            Action::Tend(TendJob {
                patient: PawnId(2),
                medicine: Some(ThingId(50)),
                in_place: false,
            })
        );
        assert!(pool.is_empty());
        assert_eq!(
            host.reservations.get(&ReservationTarget::Pawn(PawnId(2))),
            Some(&PawnId(1))
        );
        // Idle agents have nothing to end.
        assert!(host.ended.is_empty());
    }

    #[test]
    fn test_no_bed_means_tend_in_place() {
        let policy = policy();
        let mut host = MockHost::new()
            .with_agent(fixtures::idle_doctor(1, HOME))
            .with_patient(fixtures::downed_patient(2, HOME, "Cut"));
        let mut pool = pooled(&host, &policy);

        let action = decide_for(&mut host, &mut pool, &policy, 1);
        assert_eq!(
            action,
            Action::Tend(TendJob {
                patient: PawnId(2),
                medicine: None,
                in_place: true,
            })
        );
    }

    #[test]
    fn test_bed_found_means_rescue_then_tend() {
        let policy = policy();
        let mut host = MockHost::new()
            .with_agent(fixtures::idle_doctor(1, HOME))
            .with_patient(fixtures::downed_patient(2, HOME, "Cut"))
            .with_bed(70);
        let mut pool = pooled(&host, &policy);

        let action = decide_for(&mut host, &mut pool, &policy, 1);
        assert_eq!(
            action,
            Action::Rescue {
                patient: PawnId(2),
                bed: ThingId(70),
                follow_up: TendJob {
                    patient: PawnId(2),
                    medicine: None,
                    in_place: false,
                },
            }
        );
        assert_eq!(
            host.reservations.get(&ReservationTarget::Thing(ThingId(70))),
            Some(&PawnId(1))
        );
    }

    #[test]
    fn test_hungry_caregiver_eats_first() {
        let policy = policy();
        let doctor = fixtures::idle_doctor(1, HOME)
            .with_hunger(HungerLevel::UrgentlyHungry)
            .with_activity(CurrentActivity::new(ActivityKind::Working));
        let mut host = MockHost::new()
            .with_agent(doctor)
            .with_patient(fixtures::bedded_patient(2, HOME, "Burn"));
        host.food = Some(ThingId(80));
        let mut pool = pooled(&host, &policy);

        let action = decide_for(&mut host, &mut pool, &policy, 1);
        assert_eq!(action, Action::Eat { food: ThingId(80) });
        // Work was interrupted before the meal; the patient stays pooled.
        assert_eq!(host.ended, vec![PawnId(1)]);
        assert!(pool.contains(PawnId(2)));
    }

    #[test]
    fn test_eat_before_interrupt_keeps_current_activity() {
        let mut policy = policy();
        policy.hunger_check = HungerCheck::BeforeInterrupt;
        let doctor = fixtures::idle_doctor(1, HOME)
            .with_hunger(HungerLevel::Starving)
            .with_activity(CurrentActivity::new(ActivityKind::Working));
        let mut host = MockHost::new()
            .with_agent(doctor)
            .with_patient(fixtures::bedded_patient(2, HOME, "Burn"));
        host.food = Some(ThingId(80));
        let mut pool = pooled(&host, &policy);

        let action = decide_for(&mut host, &mut pool, &policy, 1);
        assert_eq!(action, Action::Eat { food: ThingId(80) });
        assert!(host.ended.is_empty());
    }

    #[test]
    fn test_hunger_ignored_without_food_or_permission() {
        let mut policy = policy();
        let doctor = fixtures::idle_doctor(1, HOME).with_hunger(HungerLevel::UrgentlyHungry);
        let mut host = MockHost::new()
            .with_agent(doctor)
            .with_patient(fixtures::bedded_patient(2, HOME, "Burn"));
        let mut pool = pooled(&host, &policy);

        // No food anywhere: treat anyway.
        let action = decide_for(&mut host, &mut pool.clone(), &policy, 1);
        assert_eq!(action.label(), "tend");

        host.food = Some(ThingId(80));
        policy.allow_eating = false;
        let action = decide_for(&mut host, &mut pool, &policy, 1);
        assert_eq!(action.label(), "tend");
    }

    #[test]
    fn test_player_forced_always_none() {
        let policy = policy();
        let doctor = fixtures::idle_doctor(1, HOME)
            .with_activity(CurrentActivity::new(ActivityKind::Working).forced());
        let mut host = MockHost::new()
            .with_agent(doctor)
            .with_patient(fixtures::bedded_patient(2, HOME, "Burn"))
            .with_patient(fixtures::downed_patient(3, HOME, "Cut"))
            .with_bed(70);
        let mut pool = pooled(&host, &policy);

        assert_eq!(decide_for(&mut host, &mut pool, &policy, 1), Action::None);
        assert_eq!(pool.len(), 2);
        assert!(host.ended.is_empty());
    }

    #[test]
    fn test_standing_overrides_short_circuit() {
        let policy = policy();
        let patient = fixtures::bedded_patient(2, HOME, "Burn");

        let mut directed = fixtures::idle_doctor(1, HOME);
        directed.queued_player_directive = true;
        let mut caravan = fixtures::idle_doctor(3, HOME);
        caravan.on_duty = true;
        let tending = fixtures::idle_doctor(4, HOME)
            .with_activity(CurrentActivity::new(ActivityKind::Rescuing));
        let eating = fixtures::idle_doctor(5, HOME)
            .with_activity(CurrentActivity::new(ActivityKind::Eating));
        let mut drafted = fixtures::idle_doctor(6, HOME);
        drafted.drafted = true;

        let mut host = MockHost::new()
            .with_agent(directed)
            .with_agent(caravan)
            .with_agent(tending)
            .with_agent(eating)
            .with_agent(drafted)
            .with_patient(patient);
        let mut pool = pooled(&host, &policy);

        for agent in [1, 3, 4, 5, 6] {
            assert_eq!(decide_for(&mut host, &mut pool, &policy, agent), Action::None, "agent {agent}");
        }
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_eating_interrupted_when_not_allowed() {
        let mut policy = policy();
        policy.allow_eating = false;
        let eating = fixtures::idle_doctor(1, HOME)
            .with_activity(CurrentActivity::new(ActivityKind::Eating));
        let mut host = MockHost::new()
            .with_agent(eating)
            .with_patient(fixtures::bedded_patient(2, HOME, "Burn"));
        let mut pool = pooled(&host, &policy);

        assert_eq!(decide_for(&mut host, &mut pool, &policy, 1).label(), "tend");
        assert_eq!(host.ended, vec![PawnId(1)]);
    }

    #[test]
    fn test_fighting_only_blocks_rare_tick() {
        let policy = policy();
        let fighter = fixtures::idle_doctor(1, HOME)
            .with_activity(CurrentActivity::new(ActivityKind::Fighting));
        let mut host = MockHost::new()
            .with_agent(fighter)
            .with_patient(fixtures::bedded_patient(2, HOME, "Burn"));
        let mut pool = pooled(&host, &policy);

        let rare = make_decision(&mut host, Some(&mut pool), &policy, PawnId(1), CallSite::RareTick);
        assert_eq!(rare, Action::None);

        let busy = make_decision(&mut host, Some(&mut pool), &policy, PawnId(1), CallSite::BusyCheck);
        assert_eq!(busy.label(), "tend");
    }

    #[test]
    fn test_uninterruptible_activity_yields_none() {
        let policy = policy();
        let doctor = fixtures::idle_doctor(1, HOME)
            .with_activity(CurrentActivity::new(ActivityKind::Other).uninterruptible());
        let mut host = MockHost::new()
            .with_agent(doctor)
            .with_patient(fixtures::bedded_patient(2, HOME, "Burn"));
        let mut pool = pooled(&host, &policy);

        assert_eq!(decide_for(&mut host, &mut pool, &policy, 1), Action::None);
        assert!(pool.contains(PawnId(2)));
    }

    #[test]
    fn test_hunger_never_lifts_interrupt_gate() {
        let food = ThingId(80);
        for hunger_check in [HungerCheck::BeforeInterrupt, HungerCheck::AfterInterrupt] {
            let mut policy = policy();
            policy.hunger_check = hunger_check;
            let busy = fixtures::idle_doctor(1, HOME)
                .with_activity(CurrentActivity::new(ActivityKind::Other).uninterruptible())
                .with_hunger(HungerLevel::UrgentlyHungry);
            let mut host = MockHost::new()
                .with_agent(busy)
                .with_patient(fixtures::bedded_patient(2, HOME, "Burn"));
            host.food = Some(food);
            let mut pool = pooled(&host, &policy);

            assert_eq!(
                decide_for(&mut host, &mut pool, &policy, 1),
                Action::None,
                "{hunger_check:?}"
            );
            assert!(host.ended.is_empty());
        }
    }

    #[test]
    fn test_surgery_interrupt_policy() {
        let mut policy = policy();
        let mut doctor = fixtures::idle_doctor(1, HOME)
            .with_activity(CurrentActivity::new(ActivityKind::AwaitingSurgery { emergency: false }));
        doctor.injured = true;
        let mut host = MockHost::new()
            .with_agent(doctor.clone())
            .with_patient(fixtures::bedded_patient(2, HOME, "Burn"));
        let mut pool = pooled(&host, &policy);

        assert_eq!(decide_for(&mut host, &mut pool, &policy, 1), Action::None);

        policy.interrupt_surgery_if_injured = true;
        assert_eq!(decide_for(&mut host, &mut pool, &policy, 1).label(), "tend");

        // Emergency surgery is never interrupted.
        let urgent = doctor
            .with_activity(CurrentActivity::new(ActivityKind::AwaitingSurgery { emergency: true }));
        let mut host = MockHost::new()
            .with_agent(urgent)
            .with_patient(fixtures::bedded_patient(2, HOME, "Burn"));
        let mut pool = pooled(&host, &policy);
        assert_eq!(decide_for(&mut host, &mut pool, &policy, 1), Action::None);
    }

    #[test]
    fn test_unreachable_patients_are_skipped() {
        let policy = policy();
        let mut host = MockHost::new()
            .with_agent(fixtures::idle_doctor(1, HOME))
            .with_patient(fixtures::bedded_patient(2, HOME, "Burn"))
            .with_patient(fixtures::bedded_patient(3, HOME, "Cut"));
        host.unreachable.insert((PawnId(1), PawnId(2)));
        let mut pool = pooled(&host, &policy);

        let action = decide_for(&mut host, &mut pool, &policy, 1);
        assert_eq!(action.patient(), Some(PawnId(3)));
        assert!(pool.contains(PawnId(2)));
    }

    #[test]
    fn test_self_treatment_needs_permission() {
        let policy = policy();
        let mut doctor = fixtures::idle_doctor(1, HOME);
        doctor.injured = true;
        let mut host = MockHost::new()
            .with_agent(doctor.clone())
            .with_patient(fixtures::bedded_patient(1, HOME, "Cut"));
        let mut pool = pooled(&host, &policy);

        assert_eq!(decide_for(&mut host, &mut pool, &policy, 1), Action::None);

        doctor.self_tend = true;
        host.agents.insert(doctor.id, doctor);
        let action = decide_for(&mut host, &mut pool, &policy, 1);
        assert_eq!(
            action,
            Action::Tend(TendJob {
                patient: PawnId(1),
                medicine: None,
                in_place: false,
            })
        );
    }

    #[test]
    fn test_reservation_failure_degrades_to_none() {
        let policy = policy();
        let mut host = MockHost::new()
            .with_agent(fixtures::idle_doctor(1, HOME))
            .with_patient(fixtures::bedded_patient(2, HOME, "Burn"));
        host.reject_reservations.insert(ReservationTarget::Pawn(PawnId(2)));
        let mut pool = pooled(&host, &policy);

        assert_eq!(decide_for(&mut host, &mut pool, &policy, 1), Action::None);
        assert!(pool.contains(PawnId(2)));
    }

    #[test]
    fn test_rejected_bed_releases_patient() {
        let policy = policy();
        let mut host = MockHost::new()
            .with_agent(fixtures::idle_doctor(1, HOME))
            .with_agent(fixtures::idle_doctor(3, HOME))
            .with_patient(fixtures::downed_patient(2, HOME, "Stab"))
            .with_bed(70);
        host.reject_reservations.insert(ReservationTarget::Thing(ThingId(70)));
        let mut pool = pooled(&host, &policy);

        assert_eq!(decide_for(&mut host, &mut pool, &policy, 1), Action::None);
        assert!(pool.contains(PawnId(2)));
        assert_eq!(host.reservations.get(&ReservationTarget::Pawn(PawnId(2))), None);

        // Another caregiver can still reach the patient; with the bed gone it
        // tends where the patient lies.
        host.beds.clear();
        let action = decide_for(&mut host, &mut pool, &policy, 3);
        assert_eq!(action.patient(), Some(PawnId(2)));
        assert_eq!(
            host.reservations.get(&ReservationTarget::Pawn(PawnId(2))),
            Some(&PawnId(3))
        );
    }

    #[test]
    fn test_no_pool_or_empty_pool() {
        let policy = policy();
        let mut host = MockHost::new().with_agent(fixtures::idle_doctor(1, HOME));
        assert_eq!(
            make_decision(&mut host, None, &policy, PawnId(1), CallSite::BusyCheck),
            Action::None
        );

        let mut empty = pooled(&host, &policy);
        assert_eq!(decide_for(&mut host, &mut empty, &policy, 1), Action::None);
    }

    #[test]
    fn test_second_caregiver_same_tick_gets_nothing() {
        let policy = policy();
        let mut host = MockHost::new()
            .with_agent(fixtures::idle_doctor(1, HOME))
            .with_agent(fixtures::idle_doctor(2, HOME))
            .with_patient(fixtures::bedded_patient(3, HOME, "Gunshot"));
        let mut pool = pooled(&host, &policy);

        assert_eq!(decide_for(&mut host, &mut pool, &policy, 1).patient(), Some(PawnId(3)));
        assert_eq!(decide_for(&mut host, &mut pool, &policy, 2), Action::None);
    }

    #[test]
    fn test_decision_is_deterministic() {
        let policy = policy();
        let host = MockHost::new()
            .with_agent(fixtures::idle_doctor(1, HOME))
            .with_patient(fixtures::downed_patient(2, HOME, "Cut"))
            .with_patient(fixtures::bedded_patient(3, HOME, "Burn"))
            .with_bed(70);
        let pool = pooled(&host, &policy);

        let first = decide_for(&mut host.clone(), &mut pool.clone(), &policy, 1);
        let second = decide_for(&mut host.clone(), &mut pool.clone(), &policy, 1);
        assert_eq!(first, second);
        // Discovery order wins: the downed patient is rescued to the bed.
        assert_eq!(first.patient(), Some(PawnId(2)));
        assert_eq!(first.label(), "rescue");
    }

    #[test]
    fn test_wake_check() {
        let mut policy = policy();
        let sleeper = fixtures::idle_doctor(1, HOME)
            .with_activity(CurrentActivity::new(ActivityKind::Sleeping));
        let host = MockHost::new()
            .with_agent(sleeper)
            .with_agent(fixtures::idle_doctor(2, HOME))
            .with_patient(fixtures::bedded_patient(3, HOME, "Burn"));
        let pool = pooled(&host, &policy);

        assert!(!should_wake(&host, Some(&pool), &policy, PawnId(1)));

        policy.wake_to_tend = true;
        assert!(should_wake(&host, Some(&pool), &policy, PawnId(1)));
        // Awake agents are not the wake check's business.
        assert!(!should_wake(&host, Some(&pool), &policy, PawnId(2)));
        assert!(!should_wake(&host, None, &policy, PawnId(1)));
        // Answering does not claim the patient.
        assert!(pool.contains(PawnId(3)));
    }

    #[test]
    fn test_carried_patient_is_not_selected() {
        let policy = policy();
        let mut host = MockHost::new()
            .with_agent(fixtures::idle_doctor(1, HOME))
            .with_patient(fixtures::downed_patient(2, HOME, "Cut"));
        let mut pool = pooled(&host, &policy);

        host.patient_mut(PawnId(2)).unwrap().posture = Posture::Carried;
        host.patient_mut(PawnId(2)).unwrap().wants_rescue = false;
        assert_eq!(decide_for(&mut host, &mut pool, &policy, 1), Action::None);
    }
}
