#[cfg(test)]
mod tests {
    use glam::Vec3;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use riposte_core::components::{BossPhaseClock, StagingSlot};
    use riposte_core::enums::{AgentState, BossPhase};

    use crate::facing::*;
    use crate::fsm::{evaluate, AgentContext, Directive};
    use crate::phase::*;
    use crate::staging::*;

    fn make_context(state: AgentState, distance: Option<f32>, now: f64) -> AgentContext {
        AgentContext {
            state,
            now,
            distance_to_target: distance,
            sight_radius: 20.0,
            attack_range: 1.2,
            attack_ready_at: 0.0,
            stunned_until: 0.0,
            request_due: false,
        }
    }

    // --- FSM ---

    #[test]
    fn test_dead_is_terminal() {
        let update = evaluate(&make_context(AgentState::Dead, Some(0.5), 10.0));
        assert!(!update.state_changed);
        assert_eq!(update.new_state, AgentState::Dead);
        assert_eq!(update.directive, Directive::Hold);
    }

    #[test]
    fn test_waiting_out_of_sight_holds() {
        let update = evaluate(&make_context(AgentState::Waiting, Some(25.0), 1.0));
        assert_eq!(update.directive, Directive::Hold);
        assert_eq!(update.new_state, AgentState::Waiting);
    }

    #[test]
    fn test_waiting_in_sight_stages_and_requests_when_due() {
        let mut ctx = make_context(AgentState::Waiting, Some(10.0), 1.0);
        assert_eq!(
            evaluate(&ctx).directive,
            Directive::HoldStagingSpot {
                request_slot: false
            }
        );
        ctx.request_due = true;
        assert_eq!(
            evaluate(&ctx).directive,
            Directive::HoldStagingSpot { request_slot: true }
        );
    }

    #[test]
    fn test_staging_requests_every_tick() {
        let ctx = make_context(AgentState::Staging, Some(10.0), 1.0);
        let update = evaluate(&ctx);
        assert_eq!(update.directive, Directive::HoldStagingSpot { request_slot: true });
        assert!(!update.state_changed);
    }

    #[test]
    fn test_idle_never_self_promotes_even_in_range() {
        // Only an engagement grant moves an idle agent into combat.
        let update = evaluate(&make_context(AgentState::Waiting, Some(0.5), 1.0));
        assert_eq!(update.new_state, AgentState::Waiting);
    }

    #[test]
    fn test_approaching_attacks_in_range_when_ready() {
        let update = evaluate(&make_context(AgentState::Approaching, Some(1.0), 1.0));
        assert!(update.state_changed);
        assert_eq!(update.new_state, AgentState::Attacking);
        assert_eq!(update.directive, Directive::BeginAttack);
    }

    #[test]
    fn test_approaching_waits_for_cooldown() {
        let mut ctx = make_context(AgentState::Approaching, Some(1.0), 1.0);
        ctx.attack_ready_at = 2.0;
        let update = evaluate(&ctx);
        assert_eq!(update.new_state, AgentState::Approaching);
        assert_eq!(update.directive, Directive::ApproachTarget);
    }

    #[test]
    fn test_approaching_not_interrupted_by_sight_loss() {
        let update = evaluate(&make_context(AgentState::Approaching, Some(40.0), 1.0));
        assert_eq!(update.new_state, AgentState::Approaching);
        assert_eq!(update.directive, Directive::ApproachTarget);
    }

    #[test]
    fn test_scenario_a_distance_ten_never_attacks() {
        let update = evaluate(&make_context(AgentState::Approaching, Some(10.0), 5.0));
        assert_eq!(update.new_state, AgentState::Approaching);
        let update = evaluate(&make_context(AgentState::Waiting, Some(10.0), 5.0));
        assert_eq!(update.new_state, AgentState::Waiting);
    }

    #[test]
    fn test_attacking_continues() {
        let update = evaluate(&make_context(AgentState::Attacking, None, 1.0));
        assert_eq!(update.new_state, AgentState::Attacking);
        assert_eq!(update.directive, Directive::ContinueAttack);
    }

    #[test]
    fn test_stun_expiry_returns_to_waiting() {
        let mut ctx = make_context(AgentState::Stunned, Some(3.0), 2.9);
        ctx.stunned_until = 3.0;
        assert_eq!(evaluate(&ctx).new_state, AgentState::Stunned);

        ctx.now = 3.0;
        let update = evaluate(&ctx);
        assert!(update.state_changed);
        assert_eq!(update.new_state, AgentState::Waiting);
        assert_eq!(update.directive, Directive::Recover);
    }

    // --- Staging ---

    #[test]
    fn test_slots_spread_around_ring() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let a = roll_slot(0, 4, 5.0, 0.6, &mut rng);
        let b = roll_slot(2, 4, 5.0, 0.6, &mut rng);
        assert!(a.angle.abs() <= 0.2 + 1e-6);
        assert!((b.angle - std::f32::consts::PI).abs() <= 0.2 + 1e-6);
        for slot in [a, b] {
            assert!(slot.radius >= 4.4 - 1e-5 && slot.radius <= 5.6 + 1e-5);
        }
    }

    #[test]
    fn test_slot_roll_tolerates_zero_total() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let slot = roll_slot(0, 0, 5.0, 0.0, &mut rng);
        assert_eq!(slot.radius, 5.0);
    }

    #[test]
    fn test_slot_position_follows_target() {
        let slot = StagingSlot {
            angle: 0.0,
            radius: 5.0,
        };
        let p = slot_position(Vec3::new(10.0, 2.0, -3.0), &slot, Vec3::ZERO);
        assert!((p - Vec3::new(15.0, 0.0, -3.0)).length() < 1e-5);
    }

    #[test]
    fn test_shuffle_offset_inside_disk() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..200 {
            let o = roll_shuffle_offset(0.5, &mut rng);
            assert_eq!(o.y, 0.0);
            assert!(o.length() <= 0.5 + 1e-5);
        }
        assert_eq!(roll_shuffle_offset(0.0, &mut rng), Vec3::ZERO);
    }

    #[test]
    fn test_timer_delays_in_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for _ in 0..200 {
            let s = next_shuffle_delay(2.2, &mut rng);
            assert!((1.8 - 1e-9..=2.6 + 1e-9).contains(&s));
            let r = next_request_delay(1.0, 2.0, &mut rng);
            assert!((1.0..=2.0).contains(&r));
        }
        assert_eq!(next_request_delay(1.5, 1.5, &mut rng), 1.5);
    }

    #[test]
    fn test_same_seed_same_slots() {
        let mut a = ChaCha8Rng::seed_from_u64(9);
        let mut b = ChaCha8Rng::seed_from_u64(9);
        for i in 0..5 {
            assert_eq!(roll_slot(i, 5, 5.0, 0.6, &mut a), roll_slot(i, 5, 5.0, 0.6, &mut b));
        }
    }

    // --- Facing ---

    #[test]
    fn test_turn_is_rate_limited() {
        let out = turn_toward(Vec3::Z, Vec3::X, 30f32.to_radians());
        assert!((out.angle_between(Vec3::Z) - 30f32.to_radians()).abs() < 1e-4);
        assert!(out.x > 0.0);

        let out = turn_toward(Vec3::Z, -Vec3::X, 30f32.to_radians());
        assert!(out.x < 0.0);
    }

    #[test]
    fn test_turn_snaps_when_within_budget() {
        let out = turn_toward(Vec3::Z, Vec3::new(0.1, 0.0, 1.0), 1.0);
        assert!((out - Vec3::new(0.1, 0.0, 1.0).normalize()).length() < 1e-5);
    }

    #[test]
    fn test_front_cone_uses_cosine_threshold() {
        let origin = Vec3::ZERO;
        // 60° off-axis: cos = 0.5 > 0.3
        let p60 = Vec3::new(60f32.to_radians().sin(), 0.0, 60f32.to_radians().cos());
        assert!(in_front_cone(Vec3::Z, origin, p60, 0.3));
        // 80° off-axis: cos ≈ 0.17 < 0.3
        let p80 = Vec3::new(80f32.to_radians().sin(), 0.0, 80f32.to_radians().cos());
        assert!(!in_front_cone(Vec3::Z, origin, p80, 0.3));
        assert!(in_front_cone(Vec3::Z, origin, origin, 0.3));
    }

    #[test]
    fn test_strike_lands_needs_range_and_cone() {
        let attacker = Vec3::ZERO;
        assert!(strike_lands(attacker, Vec3::Z, Vec3::new(0.0, 0.0, 1.0), 1.2, 0.3));
        assert!(!strike_lands(attacker, Vec3::Z, Vec3::new(0.0, 0.0, 1.5), 1.2, 0.3));
        assert!(!strike_lands(attacker, Vec3::Z, Vec3::new(0.0, 0.0, -1.0), 1.2, 0.3));
    }

    #[test]
    fn test_within_cone_angle_half_width() {
        let origin = Vec3::ZERO;
        let p30 = Vec3::new(30f32.to_radians().sin(), 0.0, 30f32.to_radians().cos());
        let p50 = Vec3::new(50f32.to_radians().sin(), 0.0, 50f32.to_radians().cos());
        assert!(within_cone_angle(Vec3::Z, origin, p30, 80.0));
        assert!(!within_cone_angle(Vec3::Z, origin, p50, 80.0));
    }

    // --- Boss phase ---

    #[test]
    fn test_boss_phase_boundary() {
        let clock = BossPhaseClock {
            spawned_at: 0.0,
            invulnerable_secs: 30.0,
        };
        assert_eq!(phase_at(&clock, 10.0), BossPhase::Survive);
        assert_eq!(phase_at(&clock, 30.0), BossPhase::Breakable);
        assert_eq!(parry_verdict(&clock, 10.0), ParryVerdict::PunishPlayer);
        assert_eq!(parry_verdict(&clock, 31.0), ParryVerdict::KillBoss);
        assert_eq!(invulnerable_remaining(&clock, 10.0), 20.0);
        assert_eq!(invulnerable_remaining(&clock, 40.0), 0.0);
    }

    proptest! {
        /// Invulnerable strictly before the bound, breakable from it on, never flapping.
        #[test]
        fn prop_invulnerability_monotonic(
            spawned_at in 0.0f64..1000.0,
            secs in 0.0f64..120.0,
            a in -50.0f64..200.0,
            b in -50.0f64..200.0,
        ) {
            let clock = BossPhaseClock { spawned_at, invulnerable_secs: secs };
            let (early, late) = if a <= b { (a, b) } else { (b, a) };
            let t_early = spawned_at + early;
            let t_late = spawned_at + late;
            prop_assert_eq!(is_invulnerable(&clock, t_early), t_early - spawned_at < secs);
            if !is_invulnerable(&clock, t_early) {
                prop_assert!(!is_invulnerable(&clock, t_late));
            }
            if is_invulnerable(&clock, t_late) {
                prop_assert!(is_invulnerable(&clock, t_early));
            }
        }
    }
}
