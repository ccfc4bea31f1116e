//! Trigger call sites
//!
//! The host drives the engine through this hook table. Zone hooks keep the
//! candidate pools current; agent hooks ask for a decision at one of the
//! three [`CallSite`]s.

use std::collections::BTreeMap;

use triage_types::{Action, CallSite, PawnId, ZoneId};

use crate::config::PolicyConfig;
use crate::host::TriageHost;
use crate::pool::CandidatePool;
use crate::synthesizer::{make_decision, should_wake};

/// Callback points a host invokes on the engine.
pub trait TriageHooks<H: TriageHost + ?Sized> {
    /// A zone came into existence (map load, new map). Builds its pool at once.
    fn on_zone_activated(&mut self, host: &H, zone: ZoneId) -> &CandidatePool;

    /// One zone tick: prune, and refresh on cadence.
    fn on_zone_tick(&mut self, host: &H, zone: ZoneId);

    /// The agent is about to pick a new activity. A returned action replaces
    /// whatever the host would have picked.
    fn on_agent_will_choose_activity(&mut self, host: &mut H, agent: PawnId) -> Option<Action>;

    /// Periodic check on a busy agent. Advisory: the host may start the
    /// returned action but keeps running its own logic either way.
    fn on_agent_rare_tick(&mut self, host: &mut H, agent: PawnId) -> Option<Action>;

    /// The agent is resting and the host asks whether it should get up.
    fn on_agent_will_check_wake(&mut self, host: &H, agent: PawnId) -> bool;
}

/// Pools per zone plus the policy they were built under.
#[derive(Debug, Clone, Default)]
pub struct TriageEngine {
    policy: PolicyConfig,
    pools: BTreeMap<ZoneId, CandidatePool>,
}

impl TriageEngine {
    pub fn new(policy: PolicyConfig) -> Self {
        Self {
            policy,
            pools: BTreeMap::new(),
        }
    }

    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Swaps the policy. Existing pools are marked for a full refresh on
    /// their next use, since admission depends on the policy.
    pub fn set_policy(&mut self, policy: PolicyConfig) {
        self.policy = policy;
        let interval = self.policy.refresh_interval_ticks;
        for (zone, pool) in self.pools.iter_mut() {
            *pool = CandidatePool::new(*zone, interval);
        }
    }

    pub fn pool(&self, zone: ZoneId) -> Option<&CandidatePool> {
        self.pools.get(&zone)
    }

    pub fn pool_mut(&mut self, zone: ZoneId) -> Option<&mut CandidatePool> {
        self.pools.get_mut(&zone)
    }

    pub fn zones(&self) -> impl Iterator<Item = ZoneId> + '_ {
        self.pools.keys().copied()
    }

    /// The zone is being torn down; its pool goes with it.
    pub fn on_zone_removed(&mut self, zone: ZoneId) {
        if self.pools.remove(&zone).is_some() {
            tracing::debug!(zone = %zone, "zone removed");
        }
    }

    fn decide<H: TriageHost + ?Sized>(
        &mut self,
        host: &mut H,
        agent: PawnId,
        call_site: CallSite,
    ) -> Option<Action> {
        let zone = match host.agent(agent) {
            Ok(state) => state.zone,
            Err(err) => {
                diag!(self.policy, agent = %agent, %call_site, error = %err, "agent lookup failed");
                return None;
            }
        };
        let pool = zone.and_then(|z| self.pools.get_mut(&z));
        let pool = pool.map(|pool| {
            if pool.is_stale() {
                pool.refresh(&*host, &self.policy);
            }
            pool
        });
        let action = make_decision(host, pool, &self.policy, agent, call_site);
        (!action.is_none()).then_some(action)
    }
}

impl<H: TriageHost + ?Sized> TriageHooks<H> for TriageEngine {
    fn on_zone_activated(&mut self, host: &H, zone: ZoneId) -> &CandidatePool {
        let interval = self.policy.refresh_interval_ticks;
        let pool = self
            .pools
            .entry(zone)
            .or_insert_with(|| CandidatePool::new(zone, interval));
        pool.refresh(host, &self.policy);
        tracing::debug!(zone = %zone, candidates = pool.len(), "zone activated");
        pool
    }

    fn on_zone_tick(&mut self, host: &H, zone: ZoneId) {
        match self.pools.get_mut(&zone) {
            Some(pool) => {
                pool.tick(host, &self.policy);
            }
            None => {
                self.on_zone_activated(host, zone);
            }
        }
    }

    fn on_agent_will_choose_activity(&mut self, host: &mut H, agent: PawnId) -> Option<Action> {
        self.decide(host, agent, CallSite::BusyCheck)
    }

    fn on_agent_rare_tick(&mut self, host: &mut H, agent: PawnId) -> Option<Action> {
        self.decide(host, agent, CallSite::RareTick)
    }

    fn on_agent_will_check_wake(&mut self, host: &H, agent: PawnId) -> bool {
        if !self.policy.wake_to_tend {
            return false;
        }
        let Some(zone) = host.agent(agent).ok().and_then(|a| a.zone) else {
            return false;
        };
        let Some(pool) = self.pools.get_mut(&zone) else {
            return false;
        };
        if pool.is_stale() {
            pool.refresh(host, &self.policy);
        }
        let wake = should_wake(host, Some(&*pool), &self.policy, agent);
        if wake {
            tracing::info!(agent = %agent, zone = %zone, call_site = %CallSite::WakeCheck, "waking caregiver");
        }
        wake
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockHost;
    use triage_types::fixtures::{self, HOME};
    use triage_types::{ActivityKind, CurrentActivity};

    #[test]
    fn test_activation_builds_pool() {
        let host = MockHost::new().with_patient(fixtures::bedded_patient(2, HOME, "Burn"));
        let mut engine = TriageEngine::default();

        let pool = engine.on_zone_activated(&host, HOME);
        assert!(pool.contains(PawnId(2)));
        assert_eq!(engine.zones().collect::<Vec<_>>(), vec![HOME]);
    }

    #[test]
    fn test_busy_check_dispatches_once() {
        let mut host = MockHost::new()
            .with_agent(fixtures::idle_doctor(1, HOME))
            .with_agent(fixtures::idle_doctor(3, HOME))
            .with_patient(fixtures::bedded_patient(2, HOME, "Burn"));
        let mut engine = TriageEngine::default();
        engine.on_zone_activated(&host, HOME);

        let first = engine.on_agent_will_choose_activity(&mut host, PawnId(1));
        assert_eq!(first.and_then(|a| a.patient()), Some(PawnId(2)));
        assert_eq!(engine.on_agent_will_choose_activity(&mut host, PawnId(3)), None);
        assert!(engine.pool(HOME).is_some_and(|p| p.is_empty()));
    }

    #[test]
    fn test_agent_outside_any_zone_gets_nothing() {
        let mut host = MockHost::new()
            .with_agent(triage_types::AgentState::new(PawnId(1), "Wanderer"))
            .with_patient(fixtures::bedded_patient(2, HOME, "Burn"));
        let mut engine = TriageEngine::default();
        engine.on_zone_activated(&host, HOME);

        assert_eq!(engine.on_agent_will_choose_activity(&mut host, PawnId(1)), None);
        assert_eq!(engine.on_agent_will_choose_activity(&mut host, PawnId(42)), None);
    }

    #[test]
    fn test_zone_tick_activates_unknown_zone() {
        let host = MockHost::new().with_patient(fixtures::bedded_patient(2, HOME, "Burn"));
        let mut engine = TriageEngine::default();

        engine.on_zone_tick(&host, HOME);
        assert!(engine.pool(HOME).is_some_and(|p| p.contains(PawnId(2))));

        engine.on_zone_removed(HOME);
        assert!(engine.pool(HOME).is_none());
    }

    #[test]
    fn test_set_policy_forces_refresh() {
        let mut flu = fixtures::bedded_patient(2, HOME, "Flu");
        flu.should_be_tended = true;
        let mut host = MockHost::new()
            .with_agent(fixtures::idle_doctor(1, HOME))
            .with_patient(flu);
        let mut engine = TriageEngine::default();
        engine.on_zone_activated(&host, HOME);
        assert!(engine.pool(HOME).is_some_and(|p| p.is_empty()));

        let mut policy = engine.policy().clone();
        policy.include_sickness = true;
        engine.set_policy(policy);

        let action = engine.on_agent_will_choose_activity(&mut host, PawnId(1));
        assert_eq!(action.and_then(|a| a.patient()), Some(PawnId(2)));
    }

    #[test]
    fn test_wake_hook_is_gated_by_policy() {
        let sleeper = fixtures::idle_doctor(1, HOME)
            .with_activity(CurrentActivity::new(ActivityKind::Sleeping));
        let host = MockHost::new()
            .with_agent(sleeper)
            .with_patient(fixtures::bedded_patient(2, HOME, "Burn"));

        let mut engine = TriageEngine::default();
        engine.on_zone_activated(&host, HOME);
        assert!(!engine.on_agent_will_check_wake(&host, PawnId(1)));

        let mut policy = engine.policy().clone();
        policy.wake_to_tend = true;
        let mut engine = TriageEngine::new(policy);
        engine.on_zone_activated(&host, HOME);
        assert!(engine.on_agent_will_check_wake(&host, PawnId(1)));
    }

    #[test]
    fn test_rare_tick_is_advisory_decision() {
        let worker = fixtures::idle_doctor(1, HOME)
            .with_activity(CurrentActivity::new(ActivityKind::Working));
        let mut host = MockHost::new()
            .with_agent(worker)
            .with_patient(fixtures::bedded_patient(2, HOME, "Burn"));
        let mut engine = TriageEngine::default();
        engine.on_zone_activated(&host, HOME);

        let action = engine.on_agent_rare_tick(&mut host, PawnId(1));
        assert_eq!(action.map(|a| a.label()), Some("tend"));
        assert_eq!(host.ended, vec![PawnId(1)]);
    }
}
