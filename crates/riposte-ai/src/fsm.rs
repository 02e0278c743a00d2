//! Agent combat finite state machine.
//!
//! Pure functions that compute state transitions and the movement directive
//! for one hostile agent from a snapshot of its situation.
//! No ECS dependency; operates on plain data.
//!
//! Engagement grants (Waiting/Staging → Approaching), stuns and deaths are
//! driven from outside; this module decides everything an agent decides for
//! itself.

use riposte_core::enums::AgentState;

/// Input to the agent FSM for a single entity.
#[derive(Debug, Clone, Copy)]
pub struct AgentContext {
    pub state: AgentState,
    pub now: f64,
    /// Horizontal distance to the target, `None` when there is no live target.
    pub distance_to_target: Option<f32>,
    pub sight_radius: f32,
    pub attack_range: f32,
    pub attack_ready_at: f64,
    pub stunned_until: f64,
    /// The agent's periodic self-request timer has elapsed.
    pub request_due: bool,
}

/// What the agent does with its body this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Stay where you are.
    Hold,
    /// Move to the staging spot; optionally ask for an engagement slot.
    HoldStagingSpot { request_slot: bool },
    /// Path toward the target.
    ApproachTarget,
    /// Stop and begin the cast routine.
    BeginAttack,
    /// The cast routine is running; stay put.
    ContinueAttack,
    /// Stun expired; roll a fresh staging spot and re-queue.
    Recover,
}

/// Output from the agent FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentUpdate {
    pub new_state: AgentState,
    pub directive: Directive,
    pub state_changed: bool,
}

impl AgentUpdate {
    fn stay(state: AgentState, directive: Directive) -> Self {
        Self {
            new_state: state,
            directive,
            state_changed: false,
        }
    }

    fn transition(state: AgentState, directive: Directive) -> Self {
        Self {
            new_state: state,
            directive,
            state_changed: true,
        }
    }
}

/// Evaluate the FSM for one agent.
pub fn evaluate(ctx: &AgentContext) -> AgentUpdate {
    match ctx.state {
        AgentState::Dead => AgentUpdate::stay(AgentState::Dead, Directive::Hold),
        AgentState::Stunned => evaluate_stunned(ctx),
        AgentState::Waiting => evaluate_idle(ctx, ctx.request_due),
        // Staging re-requests every tick.
        AgentState::Staging => evaluate_idle(ctx, true),
        AgentState::Approaching => evaluate_approaching(ctx),
        AgentState::Attacking => AgentUpdate::stay(AgentState::Attacking, Directive::ContinueAttack),
    }
}

/// Whether the target is within the agent's sight radius.
pub fn in_sight(ctx: &AgentContext) -> bool {
    matches!(ctx.distance_to_target, Some(d) if d <= ctx.sight_radius)
}

fn evaluate_stunned(ctx: &AgentContext) -> AgentUpdate {
    if ctx.now >= ctx.stunned_until {
        // Re-queue as if newly arrived, not as a released fighter.
        return AgentUpdate::transition(AgentState::Waiting, Directive::Recover);
    }
    AgentUpdate::stay(AgentState::Stunned, Directive::Hold)
}

fn evaluate_idle(ctx: &AgentContext, wants_slot: bool) -> AgentUpdate {
    if !in_sight(ctx) {
        return AgentUpdate::stay(ctx.state, Directive::Hold);
    }
    AgentUpdate::stay(
        ctx.state,
        Directive::HoldStagingSpot {
            request_slot: wants_slot,
        },
    )
}

fn evaluate_approaching(ctx: &AgentContext) -> AgentUpdate {
    let Some(distance) = ctx.distance_to_target else {
        // Target gone: keep the slot but stop moving.
        return AgentUpdate::stay(AgentState::Approaching, Directive::Hold);
    };

    if distance <= ctx.attack_range && ctx.now >= ctx.attack_ready_at {
        return AgentUpdate::transition(AgentState::Attacking, Directive::BeginAttack);
    }

    AgentUpdate::stay(AgentState::Approaching, Directive::ApproachTarget)
}
