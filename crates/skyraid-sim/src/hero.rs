//! The player's craft. One instance per run, owned by the engine.

use skyraid_core::components::{Hitpoints, Validity};
use skyraid_core::constants::{
    HEAL_AMOUNT, HERO_INITIAL_HP, HERO_SIZE, PATTERN_BOOST_DURATION_MS, PLAYFIELD_HEIGHT,
    PLAYFIELD_WIDTH,
};
use skyraid_core::enums::SpriteKind;
use skyraid_core::pattern::FiringPattern;
use skyraid_core::state::HeroView;
use skyraid_core::types::{Hitbox, Position, Velocity};

use crate::damage;
use crate::timers::{TimerAction, TimerId, TimerQueue};

#[derive(Debug, Clone)]
pub struct Hero {
    pub position: Position,
    pub hitpoints: Hitpoints,
    pub validity: Validity,
    pattern: FiringPattern,
    /// Pending reversion of a boosted pattern, if any.
    reversion: Option<TimerId>,
}

impl Hero {
    /// A fresh hero centred at the bottom of the playfield.
    pub fn new() -> Self {
        Self {
            position: Position::new(PLAYFIELD_WIDTH / 2.0, PLAYFIELD_HEIGHT - HERO_SIZE.1),
            hitpoints: Hitpoints {
                current: HERO_INITIAL_HP,
                max: HERO_INITIAL_HP,
            },
            validity: Validity { alive: true },
            pattern: FiringPattern::hero_default(),
            reversion: None,
        }
    }

    /// The hero never moves by itself.
    pub fn velocity(&self) -> Velocity {
        Velocity::default()
    }

    pub fn is_alive(&self) -> bool {
        self.validity.alive
    }

    pub fn hp(&self) -> i32 {
        self.hitpoints.current
    }

    pub fn pattern(&self) -> &FiringPattern {
        &self.pattern
    }

    /// The only way the hero's pattern changes.
    pub fn set_pattern(&mut self, pattern: FiringPattern) {
        self.pattern = pattern;
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox::of_sprite(SpriteKind::Hero, self.position)
    }

    /// Move to an input position, clamped into the playfield.
    pub fn move_to(&mut self, target: Position) {
        if self.validity.alive {
            self.position = target.clamped_to_playfield();
        }
    }

    /// Returns true if this hit destroyed the hero.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        damage::take_damage(&mut self.hitpoints, &mut self.validity, amount)
    }

    /// Body collision: HP goes straight to zero.
    pub fn destroy(&mut self) {
        let remaining = self.hitpoints.current.max(1);
        self.take_damage(remaining);
    }

    pub fn heal(&mut self, amount: i32) {
        if self.validity.alive && amount > 0 {
            self.hitpoints.current = (self.hitpoints.current + amount).min(self.hitpoints.max);
        }
    }

    pub fn heal_pickup(&mut self) {
        self.heal(HEAL_AMOUNT);
    }

    /// Switch to a temporary pattern and schedule the reversion. A reversion
    /// still pending from an earlier boost is cancelled.
    pub fn boost_pattern(
        &mut self,
        pattern: FiringPattern,
        timers: &mut TimerQueue,
        run_id: u64,
        now_ms: u64,
    ) {
        if let Some(previous) = self.reversion.take() {
            timers.cancel(previous);
        }
        self.set_pattern(pattern);
        self.reversion = Some(timers.schedule(
            run_id,
            now_ms + PATTERN_BOOST_DURATION_MS,
            TimerAction::RevertHeroPattern,
        ));
    }

    /// Handle a fired reversion. Ignored unless `id` is the current one.
    pub fn revert_pattern(&mut self, id: TimerId) -> bool {
        if self.reversion != Some(id) {
            return false;
        }
        self.reversion = None;
        self.set_pattern(FiringPattern::hero_default());
        true
    }

    pub fn view(&self) -> HeroView {
        HeroView {
            position: self.position,
            hp: self.hitpoints.current,
            max_hp: self.hitpoints.max,
            pattern: self.pattern,
        }
    }
}

impl Default for Hero {
    fn default() -> Self {
        Self::new()
    }
}
