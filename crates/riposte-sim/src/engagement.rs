//! Engagement pool: which agents exist and which hold a combat slot.
//!
//! Stored in `SimulationEngine`, NOT as ECS entities. Registrations and
//! removals are deferred and applied at the start of a scheduling tick, so
//! the live set never changes while the director is iterating it.

use serde::{Deserialize, Serialize};

use riposte_core::types::AgentId;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngagementPool {
    /// Live agents in registration order.
    registered: Vec<AgentId>,
    /// Slot holders in grant order. Always a subset of `registered`.
    engaged: Vec<AgentId>,
    pending_add: Vec<AgentId>,
    pending_remove: Vec<AgentId>,
    max_engaged: usize,
    next_select_at: f64,
}

impl EngagementPool {
    pub fn new(max_engaged: usize) -> Self {
        Self {
            max_engaged,
            ..Self::default()
        }
    }

    /// Queue a registration for the next scheduling tick.
    pub fn register(&mut self, agent: AgentId) {
        self.pending_remove.retain(|a| *a != agent);
        if !self.registered.contains(&agent) && !self.pending_add.contains(&agent) {
            self.pending_add.push(agent);
        }
    }

    /// Queue a removal for the next scheduling tick.
    pub fn unregister(&mut self, agent: AgentId) {
        self.pending_add.retain(|a| *a != agent);
        if self.registered.contains(&agent) && !self.pending_remove.contains(&agent) {
            self.pending_remove.push(agent);
        }
    }

    /// Apply queued registrations and removals. Returns how many changes were applied.
    pub fn apply_pending(&mut self) -> usize {
        let changes = self.pending_add.len() + self.pending_remove.len();
        self.registered.append(&mut self.pending_add);
        for agent in self.pending_remove.drain(..) {
            self.registered.retain(|a| *a != agent);
            self.engaged.retain(|a| *a != agent);
        }
        changes
    }

    /// Grant a slot if one is free. Only the director calls this.
    pub(crate) fn try_grant(&mut self, agent: AgentId) -> bool {
        if self.engaged.len() >= self.max_engaged
            || self.engaged.contains(&agent)
            || !self.registered.contains(&agent)
        {
            return false;
        }
        self.engaged.push(agent);
        true
    }

    /// Give a slot back. Returns whether the agent held one.
    pub fn release(&mut self, agent: AgentId) -> bool {
        let before = self.engaged.len();
        self.engaged.retain(|a| *a != agent);
        self.engaged.len() != before
    }

    pub fn is_engaged(&self, agent: AgentId) -> bool {
        self.engaged.contains(&agent)
    }

    pub fn is_registered(&self, agent: AgentId) -> bool {
        self.registered.contains(&agent)
    }

    pub fn registered(&self) -> &[AgentId] {
        &self.registered
    }

    pub fn engaged(&self) -> &[AgentId] {
        &self.engaged
    }

    pub fn max_engaged(&self) -> usize {
        self.max_engaged
    }

    pub fn has_free_slot(&self) -> bool {
        self.engaged.len() < self.max_engaged
    }

    /// Index used for staging-ring placement. Pending registrations count
    /// after the live ones.
    pub fn index_of(&self, agent: AgentId) -> Option<usize> {
        self.registered
            .iter()
            .chain(self.pending_add.iter())
            .position(|a| *a == agent)
    }

    /// Agents counted for staging-ring placement.
    pub fn total(&self) -> usize {
        self.registered.len() + self.pending_add.len()
    }

    pub fn next_select_at(&self) -> f64 {
        self.next_select_at
    }

    pub(crate) fn schedule_next_select(&mut self, at: f64) {
        self.next_select_at = at;
    }

    /// Verify `engaged ⊆ registered` and the slot bound.
    ///
    /// A violation is a programming error: fatal in debug builds, clamped
    /// and logged otherwise. Returns whether the pool was consistent.
    pub fn check_invariant(&mut self) -> bool {
        let registered = &self.registered;
        let orphaned = self.engaged.iter().any(|a| !registered.contains(a));
        let overrun = self.engaged.len() > self.max_engaged;
        if !orphaned && !overrun {
            return true;
        }

        log::error!(
            "engagement pool invariant violated: {} engaged of max {}, orphaned slot holders: {}",
            self.engaged.len(),
            self.max_engaged,
            orphaned
        );
        debug_assert!(!overrun, "engaged set exceeds max_engaged");
        debug_assert!(!orphaned, "engaged set is not a subset of registered");

        let registered = &self.registered;
        self.engaged.retain(|a| registered.contains(a));
        self.engaged.truncate(self.max_engaged);
        false
    }

    /// Test hook: push a slot holder past every guard.
    #[cfg(test)]
    pub(crate) fn force_engage(&mut self, agent: AgentId) {
        self.engaged.push(agent);
    }
}
