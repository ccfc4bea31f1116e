//! Candidate Pool
//!
//! Per-zone cache of patients believed to need care now. Rebuilt wholesale on
//! a fixed cadence and pruned cheaply between rebuilds, so a caregiver's
//! decision costs O(pool) instead of O(zone population).

use std::collections::HashSet;

use triage_types::{PatientState, PawnId, ZoneId};

use crate::config::PolicyConfig;
use crate::eligibility::{can_be_rescued, good_posture_for_tend, has_treatable_condition, is_emergency};
use crate::host::TriageHost;

/// Lifecycle state of a pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolState {
    /// Created but never refreshed
    Empty,
    Populated,
}

/// Patients in one zone that currently need care, humanlike first.
#[derive(Debug, Clone)]
pub struct CandidatePool {
    zone: ZoneId,
    patients: Vec<PawnId>,
    state: PoolState,
    /// Zone ticks since the last full refresh
    ticks_since_refresh: u64,
    refresh_interval: u64,
}

impl CandidatePool {
    pub fn new(zone: ZoneId, refresh_interval: u64) -> Self {
        Self {
            zone,
            patients: Vec::new(),
            state: PoolState::Empty,
            ticks_since_refresh: 0,
            refresh_interval: refresh_interval.max(1),
        }
    }

    pub fn zone(&self) -> ZoneId {
        self.zone
    }

    pub fn state(&self) -> PoolState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    pub fn contains(&self, patient: PawnId) -> bool {
        self.patients.contains(&patient)
    }

    pub fn iter(&self) -> impl Iterator<Item = PawnId> + '_ {
        self.patients.iter().copied()
    }

    pub fn patients(&self) -> &[PawnId] {
        &self.patients
    }

    pub fn ticks_since_refresh(&self) -> u64 {
        self.ticks_since_refresh
    }

    /// Never refreshed, or a full interval has passed without one
    pub fn is_stale(&self) -> bool {
        self.state == PoolState::Empty || self.ticks_since_refresh >= self.refresh_interval
    }

    /// Rebuilds the pool from every patient in the zone.
    pub fn refresh<H: TriageHost + ?Sized>(&mut self, host: &H, policy: &PolicyConfig) {
        let mut humanlike = Vec::new();
        let mut others = Vec::new();
        let mut seen = HashSet::new();

        for id in host.zone_patients(self.zone) {
            if !seen.insert(id) {
                continue;
            }
            let patient = match host.patient(id) {
                Ok(p) => p,
                Err(err) => {
                    diag!(policy, zone = %self.zone, patient = %id, error = %err, "skipping patient during refresh");
                    continue;
                }
            };
            if !admits(&patient, policy, host) {
                continue;
            }
            if patient.humanlike {
                humanlike.push(id);
            } else {
                others.push(id);
            }
        }

        humanlike.extend(others);
        self.patients = humanlike;
        self.state = PoolState::Populated;
        self.ticks_since_refresh = 0;

        tracing::trace!(zone = %self.zone, candidates = self.patients.len(), "candidate pool refreshed");
    }

    /// Drops patients that healed, died, or vanished since the last refresh.
    pub fn prune<H: TriageHost + ?Sized>(&mut self, host: &H, policy: &PolicyConfig) {
        self.patients.retain(|id| match host.patient(*id) {
            Ok(patient) => has_treatable_condition(&patient),
            Err(err) => {
                diag!(policy, patient = %id, error = %err, "pruning unreadable patient");
                false
            }
        });
    }

    /// Advances the cadence by one zone tick. Returns true if a full refresh ran.
    pub fn tick<H: TriageHost + ?Sized>(&mut self, host: &H, policy: &PolicyConfig) -> bool {
        self.ticks_since_refresh += 1;
        self.prune(host, policy);
        if self.ticks_since_refresh >= self.refresh_interval {
            self.refresh(host, policy);
            return true;
        }
        false
    }

    /// Removes a patient that has just been claimed by a caregiver.
    pub fn remove(&mut self, patient: PawnId) -> bool {
        let before = self.patients.len();
        self.patients.retain(|id| *id != patient);
        self.patients.len() != before
    }
}

/// Whether a patient belongs in a zone's pool.
fn admits<H: TriageHost + ?Sized>(patient: &PatientState, policy: &PolicyConfig, host: &H) -> bool {
    if !has_treatable_condition(patient) || patient.hostile_state {
        return false;
    }
    if !is_emergency(patient, policy) {
        return false;
    }
    if good_posture_for_tend(patient, None) {
        return true;
    }
    can_be_rescued(patient, policy, host) && !patient.is_carried()
}
