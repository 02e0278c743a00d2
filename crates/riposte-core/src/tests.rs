#[cfg(test)]
mod tests {
    use glam::Vec3;
    use proptest::prelude::*;

    use crate::commands::{ExternalEvent, PlayerCommand};
    use crate::config::CombatConfig;
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::events::CombatEvent;
    use crate::state::CombatSnapshot;
    use crate::types::*;
    use crate::window::TimingWindow;

    fn parry_window() -> TimingWindow {
        TimingWindow::new(0.5, 0.0, 0.06)
    }

    // --- Timing window ---

    #[test]
    fn test_window_unarmed_never_matches() {
        let mut w = parry_window();
        assert!(!w.is_armed());
        assert_eq!(w.query(0.0), None);
        assert_eq!(w.query(100.0), None);
    }

    #[test]
    fn test_press_before_confirmation_is_on_time() {
        // Press at 0.45, damage frame at 0.5.
        let mut w = parry_window();
        w.activate(0.45);
        assert_eq!(w.query(0.5), Some(WindowMatch::OnTime));
    }

    #[test]
    fn test_press_just_after_confirmation_uses_late_grace() {
        // Press at 0.52, damage frame at 0.5: 0.02 late, grace is 0.06.
        let mut w = parry_window();
        w.activate(0.52);
        assert_eq!(w.query(0.5), Some(WindowMatch::LatePress));
    }

    #[test]
    fn test_press_too_late_fails() {
        let mut w = parry_window();
        w.activate(0.6);
        assert_eq!(w.query(0.5), None);
        // A failed query does not consume.
        assert!(w.is_armed());
    }

    #[test]
    fn test_press_too_early_fails() {
        let mut w = parry_window();
        w.activate(0.0);
        assert_eq!(w.query(0.51), None);
        assert_eq!(w.query(0.5), Some(WindowMatch::OnTime));
    }

    #[test]
    fn test_pre_grace_extends_forward_window() {
        let mut w = TimingWindow::new(0.5, 0.1, 0.0);
        w.activate(0.0);
        assert_eq!(w.query(0.58), Some(WindowMatch::OnTime));
    }

    #[test]
    fn test_zero_duration_only_late_branch() {
        let mut w = TimingWindow::new(0.0, 0.2, 0.06);
        w.activate(1.0);
        // Exactly at activation: forward branch is disabled, late branch holds (0 <= 0 <= 0.06).
        assert_eq!(w.peek(1.0), Some(WindowMatch::LatePress));
        // Forward of activation never matches, pre-grace notwithstanding.
        assert_eq!(w.peek(1.01), None);
        assert_eq!(w.query(0.97), Some(WindowMatch::LatePress));
    }

    #[test]
    fn test_successful_query_consumes() {
        let mut w = parry_window();
        w.activate(0.45);
        assert!(w.query(0.5).is_some());
        assert!(!w.is_armed());
        assert_eq!(w.query(0.55), None);
    }

    #[test]
    fn test_activation_overwrites_previous_press() {
        let mut w = parry_window();
        w.activate(0.0);
        w.activate(2.0);
        assert_eq!(w.activated_at(), Some(2.0));
        assert_eq!(w.query(0.4), None);
        assert_eq!(w.query(2.3), Some(WindowMatch::OnTime));
    }

    #[test]
    fn test_is_open_tracks_forward_deadline() {
        let mut w = parry_window();
        assert!(!w.is_open(0.0));
        w.activate(1.0);
        assert!(w.is_open(1.4));
        assert!(!w.is_open(1.6));
    }

    proptest! {
        /// A window that matched once never matches again without a new activation.
        #[test]
        fn prop_window_consumed_after_success(
            activation in 0.0f64..100.0,
            valid in 0.0f64..2.0,
            pre in 0.0f64..0.5,
            post in 0.0f64..0.5,
            offset in -1.0f64..3.0,
            later in 0.0001f64..10.0,
        ) {
            let mut w = TimingWindow::new(valid, pre, post);
            w.activate(activation);
            let t1 = activation + offset;
            if w.query(t1).is_some() {
                prop_assert_eq!(w.query(t1 + later), None);
                prop_assert!(!w.is_armed());
            }
        }

        /// At most one branch accepts any query.
        #[test]
        fn prop_window_branches_are_exclusive(
            activation in 0.0f64..10.0,
            valid in 0.0f64..1.0,
            post in 0.0f64..0.5,
            t in 0.0f64..12.0,
        ) {
            let w = {
                let mut w = TimingWindow::new(valid, 0.0, post);
                w.activate(activation);
                w
            };
            match w.peek(t) {
                Some(WindowMatch::OnTime) => prop_assert!(valid > 0.0 && t >= activation),
                Some(WindowMatch::LatePress) => {
                    prop_assert!(activation - t >= 0.0 && activation - t <= post)
                }
                None => {}
            }
        }
    }

    // --- Types ---

    #[test]
    fn test_sim_time_derives_elapsed_from_ticks() {
        let mut t = SimTime::default();
        for _ in 0..15 {
            t.advance(30);
        }
        assert_eq!(t.tick, 15);
        assert_eq!(t.elapsed_secs, 0.5);
    }

    #[test]
    fn test_horizontal_distance_ignores_height() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(3.0, 10.0, 4.0);
        assert!((horizontal_distance(a, b) - 5.0).abs() < 1e-5);
        assert!((horizontal_distance_sq(a, b) - 25.0).abs() < 1e-4);
    }

    #[test]
    fn test_horizontal_direction_coincident_is_none() {
        let p = Vec3::new(1.0, 0.0, 1.0);
        assert_eq!(horizontal_direction(p, p + Vec3::Y), None);
        let dir = horizontal_direction(p, Vec3::new(1.0, 0.0, 5.0)).unwrap();
        assert!((dir - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_agent_id_display() {
        assert_eq!(AgentId(7).to_string(), "agent#7");
    }

    // --- Configuration ---

    #[test]
    fn test_default_config_is_valid() {
        assert!(CombatConfig::default().validate().is_ok());
        assert!(CombatConfig::with_director().validate().is_ok());
    }

    #[test]
    fn test_partial_json_overrides_only_named_fields() {
        let cfg = CombatConfig::from_json(
            r#"{ "parry": { "post_grace_secs": 0.1 }, "director": { "max_engaged": 3 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.parry.post_grace_secs, 0.1);
        assert_eq!(cfg.parry.valid_secs, 0.5);
        let director = cfg.director.unwrap();
        assert_eq!(director.max_engaged, 3);
        assert_eq!(director.select_interval_secs, 3.0);
        assert_eq!(cfg.boss.profile.combo_hits, 3);
        assert_eq!(cfg.boss.profile.confirmation, ConfirmationMode::AnimationEvent);
    }

    #[test]
    fn test_config_rejects_zero_slots() {
        let err = CombatConfig::from_json(r#"{ "director": { "max_engaged": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroEngagementSlots));
    }

    #[test]
    fn test_config_rejects_negative_duration() {
        let err = CombatConfig::from_json(r#"{ "parry": { "stun_secs": -1.0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidDuration { field: "parry.stun_secs", .. }
        ));
    }

    #[test]
    fn test_config_rejects_front_dot_out_of_range() {
        let err = CombatConfig::from_json(r#"{ "grunt": { "front_dot": 1.5 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::FrontDotOutOfRange(_)));
    }

    #[test]
    fn test_config_rejects_malformed_json() {
        let err = CombatConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    // --- Wire shapes ---

    #[test]
    fn test_commands_are_internally_tagged() {
        let json = serde_json::to_value(PlayerCommand::Parry { at: None }).unwrap();
        assert_eq!(json["type"], "Parry");

        // A bare press carries no timestamp; a host may add one.
        let bare: PlayerCommand = serde_json::from_str(r#"{"type":"Parry"}"#).unwrap();
        assert!(matches!(bare, PlayerCommand::Parry { at: None }));
        let stamped: PlayerCommand =
            serde_json::from_str(r#"{"type":"Parry","at":0.495}"#).unwrap();
        assert!(matches!(stamped, PlayerCommand::Parry { at: Some(t) } if t == 0.495));

        let event = ExternalEvent::ConfirmDamageWindow {
            ticket: CastTicket {
                agent: AgentId(2),
                generation: 5,
            },
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"ConfirmDamageWindow""#));
        let back: ExternalEvent = serde_json::from_str(&json).unwrap();
        match back {
            ExternalEvent::ConfirmDamageWindow { ticket } => {
                assert_eq!(ticket.agent, AgentId(2));
                assert_eq!(ticket.generation, 5);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_snapshot_serializes_events() {
        let snapshot = CombatSnapshot {
            events: vec![CombatEvent::AgentDied {
                agent: AgentId(1),
                cause: DeathCause::ParryKill,
            }],
            ..Default::default()
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains(r#""type":"AgentDied""#));
        assert!(json.contains("ParryKill"));
    }
}
