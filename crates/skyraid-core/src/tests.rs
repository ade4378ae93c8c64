#[cfg(test)]
mod tests {
    use crate::commands::PlayerCommand;
    use crate::constants::*;
    use crate::enums::*;
    use crate::error::ProfileError;
    use crate::events::SimEvent;
    use crate::pattern::FiringPattern;
    use crate::profile::DifficultyProfile;
    use crate::state::GameStateSnapshot;
    use crate::types::{Hitbox, Position, SimTime, Velocity};

    // ---- Geometry ----

    #[test]
    fn test_hitbox_overlap_symmetric() {
        let sprites = [
            SpriteKind::Hero,
            SpriteKind::Mob,
            SpriteKind::Boss,
            SpriteKind::HeroBullet,
            SpriteKind::EnemyBullet,
            SpriteKind::PickupBomb,
        ];
        let offsets = [-120.0, -61.0, -30.0, -5.0, 0.0, 5.0, 30.0, 61.0, 120.0];

        for &a in &sprites {
            for &b in &sprites {
                for &dx in &offsets {
                    for &dy in &offsets {
                        let box_a = Hitbox::of_sprite(a, Position::new(200.0, 300.0));
                        let box_b = Hitbox::of_sprite(b, Position::new(200.0 + dx, 300.0 + dy));
                        assert_eq!(
                            box_a.overlaps(&box_b),
                            box_b.overlaps(&box_a),
                            "asymmetric overlap for {a:?} vs {b:?} at ({dx}, {dy})"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_hitbox_touching_edges_do_not_overlap() {
        let a = Hitbox::new(Position::new(0.0, 0.0), 10.0, 10.0);
        let b = Hitbox::new(Position::new(10.0, 0.0), 10.0, 10.0);
        assert!(!a.overlaps(&b));

        let c = Hitbox::new(Position::new(9.9, 0.0), 10.0, 10.0);
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_aircraft_hitbox_uses_half_height() {
        let hero = Hitbox::of_sprite(SpriteKind::Hero, Position::default());
        assert_eq!(hero.width, HERO_SIZE.0);
        assert_eq!(hero.height, HERO_SIZE.1 * 0.5);

        let bullet = Hitbox::of_sprite(SpriteKind::HeroBullet, Position::default());
        assert_eq!(bullet.height, HERO_BULLET_SIZE.1);
    }

    #[test]
    fn test_position_clamped_to_playfield() {
        let p = Position::new(-40.0, 900.0).clamped_to_playfield();
        assert_eq!(p, Position::new(0.0, PLAYFIELD_HEIGHT));

        let inside = Position::new(100.0, 100.0);
        assert_eq!(inside.clamped_to_playfield(), inside);
        assert!(inside.inside_playfield());
        assert!(Position::new(0.0, 10.0).inside_playfield());
        assert!(Position::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT).inside_playfield());
        assert!(!Position::new(PLAYFIELD_WIDTH + 0.5, 10.0).inside_playfield());
        assert!(!Position::new(10.0, -0.5).inside_playfield());
    }

    #[test]
    fn test_velocity_speed() {
        assert!((Velocity::new(3.0, 4.0).speed() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..25 {
            time.advance();
        }
        assert_eq!(time.tick, 25);
        assert_eq!(time.elapsed_ms, 1000);
        assert_eq!(TICK_RATE, 25);
    }

    // ---- Enums ----

    #[test]
    fn test_side_inferred_from_kind() {
        assert_eq!(AircraftKind::Hero.side(), Side::Player);
        for kind in [
            AircraftKind::Mob,
            AircraftKind::Elite,
            AircraftKind::ElitePlus,
            AircraftKind::Boss,
        ] {
            assert_eq!(kind.side(), Side::Enemy);
        }
    }

    #[test]
    fn test_heading_sign() {
        assert_eq!(Heading::Up.sign(), -1.0);
        assert_eq!(Heading::Down.sign(), 1.0);
    }

    #[test]
    fn test_difficulty_labels() {
        for difficulty in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            assert_eq!(Difficulty::from_label(difficulty.label()), Some(difficulty));
        }
        assert_eq!(Difficulty::from_label("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_label("nightmare"), None);
    }

    // ---- Profiles ----

    #[test]
    fn test_presets_validate() {
        for difficulty in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            let profile = DifficultyProfile::preset(difficulty);
            assert_eq!(profile.difficulty, difficulty);
            assert_eq!(profile.validate(), Ok(()));
        }
    }

    #[test]
    fn test_easy_has_no_boss_or_escalation() {
        let easy = DifficultyProfile::easy();
        assert!(easy.boss.is_none());
        assert!(easy.escalation.is_none());
        assert_eq!(easy.boss_hp(1), None);
    }

    #[test]
    fn test_boss_hp_policies() {
        let normal = DifficultyProfile::normal();
        assert_eq!(normal.boss_hp(1), Some(500));
        assert_eq!(normal.boss_hp(4), Some(500));

        let hard = DifficultyProfile::hard();
        assert_eq!(hard.boss_hp(1), Some(600));
        assert_eq!(hard.boss_hp(2), Some(750));
        assert_eq!(hard.boss_hp(3), Some(900));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut profile = DifficultyProfile::normal();
        profile.elite_probability = 1.5;
        assert!(matches!(
            profile.validate(),
            Err(ProfileError::NotAProbability { .. })
        ));

        let mut profile = DifficultyProfile::normal();
        profile.cycle_duration_ms = 0;
        assert_eq!(
            profile.validate(),
            Err(ProfileError::NotPositive {
                field: "cycle_duration_ms"
            })
        );

        let mut profile = DifficultyProfile::hard();
        if let Some(policy) = profile.escalation.as_mut() {
            policy.max_enemies_cap = 2;
        }
        assert_eq!(
            profile.validate(),
            Err(ProfileError::CapBelowStart {
                field: "max_enemies_cap"
            })
        );

        let mut profile = DifficultyProfile::normal();
        if let Some(policy) = profile.escalation.as_mut() {
            policy.hp_multiplier = 0.9;
        }
        assert!(matches!(
            profile.validate(),
            Err(ProfileError::NonMonotonic { .. })
        ));

        let mut profile = DifficultyProfile::easy();
        profile.mob.speed = -4.0;
        assert_eq!(
            profile.validate(),
            Err(ProfileError::NotPositive { field: "mob.speed" })
        );

        let mut profile = DifficultyProfile::easy();
        profile.elite_plus.speed = 0.0;
        assert_eq!(
            profile.validate(),
            Err(ProfileError::NotPositive {
                field: "elite_plus.speed"
            })
        );

        let mut profile = DifficultyProfile::hard();
        if let Some(boss) = profile.boss.as_mut() {
            boss.hp_increment = -100;
        }
        assert!(matches!(
            profile.validate(),
            Err(ProfileError::NonMonotonic {
                field: "boss.hp_increment",
                ..
            })
        ));

        let mut profile = DifficultyProfile::normal();
        if let Some(boss) = profile.boss.as_mut() {
            boss.score_threshold = 0;
        }
        assert_eq!(
            profile.validate(),
            Err(ProfileError::NotPositive {
                field: "boss.score_threshold"
            })
        );
    }

    #[test]
    fn test_boss_hp_saturates() {
        let mut profile = DifficultyProfile::hard();
        if let Some(boss) = profile.boss.as_mut() {
            boss.initial_hp = 2_000_000_000;
            boss.hp_increment = 500_000_000;
        }
        assert_eq!(profile.validate(), Ok(()));
        assert_eq!(profile.boss_hp(1), Some(2_000_000_000));
        assert_eq!(profile.boss_hp(2), Some(i32::MAX));
        assert_eq!(profile.boss_hp(u32::MAX), Some(i32::MAX));
    }

    #[test]
    fn test_profile_json_optional_sections() {
        let json = r#"{
            "difficulty": "Easy",
            "max_enemies": 2,
            "cycle_duration_ms": 1000,
            "hero_fire_period_ms": 500,
            "elite_probability": 0.1,
            "mob": { "hp": 10.0, "speed": 4.0 },
            "elite": { "hp": 40.0, "speed": 3.0 },
            "elite_plus": { "hp": 90.0, "speed": 8.0 }
        }"#;
        let profile: DifficultyProfile = serde_json::from_str(json).unwrap();
        assert!(profile.boss.is_none());
        assert!(profile.escalation.is_none());
        assert_eq!(profile.validate(), Ok(()));
    }

    // ---- Patterns, commands, events ----

    #[test]
    fn test_hero_patterns() {
        assert_eq!(
            FiringPattern::hero_default(),
            FiringPattern::Straight {
                count: 1,
                damage: 30,
                heading: Heading::Up
            }
        );
        match FiringPattern::hero_circle() {
            FiringPattern::Circle { count, speed, .. } => {
                assert_eq!(count, 20);
                assert_eq!(speed, 6.0);
            }
            other => panic!("unexpected pattern {other:?}"),
        }
    }

    #[test]
    fn test_tagged_serialization() {
        let json = serde_json::to_string(&PlayerCommand::StartRun).unwrap();
        assert_eq!(json, r#"{"type":"StartRun"}"#);

        let event = SimEvent::BombActivated {
            enemies_destroyed: 2,
            score: 100,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"BombActivated""#));
        let back: SimEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);

        let pattern: FiringPattern =
            serde_json::from_str(r#"{"type":"Scatter","damage":30,"heading":"Down"}"#).unwrap();
        assert_eq!(
            pattern,
            FiringPattern::Scatter {
                damage: 30,
                heading: Heading::Down
            }
        );
    }

    #[test]
    fn test_default_snapshot_serializes() {
        let snapshot = GameStateSnapshot::default();
        assert_eq!(snapshot.phase, GamePhase::MainMenu);
        assert!(!snapshot.terminal);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"phase\":\"MainMenu\""));
    }
}
