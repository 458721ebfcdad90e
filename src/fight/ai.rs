//! Opponent policy.
//!
//! A reactive dispatcher with no lookahead: the decision depends only on
//! the current distance, whether the player is mid-attack and whether the
//! opponent's own attack interval has elapsed.  Randomness is injected so
//! tests can force either branch.

use rand::Rng;

use crate::config::FightConfig;
use crate::fight::entities::AttackKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AiDecision {
    /// Walk toward the player.
    Approach,
    Block,
    Attack(AttackKind),
    Idle,
}

/// What the policy sees each tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AiView {
    /// Horizontal distance between fighter centres.
    pub distance: f32,
    pub player_attacking: bool,
    pub cooldown_elapsed: bool,
}

pub fn decide(view: AiView, config: &FightConfig, rng: &mut impl Rng) -> AiDecision {
    if view.distance > config.engage_distance() {
        return AiDecision::Approach;
    }
    if view.player_attacking && rng.gen_bool(config.ai_block_chance) {
        return AiDecision::Block;
    }
    if view.cooldown_elapsed {
        let kind = if rng.gen_bool(config.ai_kick_chance) {
            AttackKind::Kick
        } else {
            AttackKind::Punch
        };
        return AiDecision::Attack(kind);
    }
    AiDecision::Idle
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    // Every `gen_bool(p)` with 0 < p < 1 is true for an all-zero stream and
    // false for an all-ones stream.
    fn always_yes() -> StepRng {
        StepRng::new(0, 0)
    }

    fn always_no() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    fn view(distance: f32, player_attacking: bool, cooldown_elapsed: bool) -> AiView {
        AiView {
            distance,
            player_attacking,
            cooldown_elapsed,
        }
    }

    #[test]
    fn far_away_always_approaches() {
        let config = FightConfig::default();
        let d = decide(view(300.0, true, true), &config, &mut always_yes());
        assert_eq!(d, AiDecision::Approach);
    }

    #[test]
    fn engage_threshold_is_inclusive() {
        let config = FightConfig::default();
        let d = decide(view(100.0, false, false), &config, &mut always_yes());
        assert_eq!(d, AiDecision::Idle);
    }

    #[test]
    fn blocks_incoming_attack_when_roll_succeeds() {
        let config = FightConfig::default();
        let d = decide(view(50.0, true, true), &config, &mut always_yes());
        assert_eq!(d, AiDecision::Block);
    }

    #[test]
    fn failed_block_roll_falls_through_to_attack() {
        let config = FightConfig::default();
        let d = decide(view(50.0, true, true), &config, &mut always_no());
        assert_eq!(d, AiDecision::Attack(AttackKind::Punch));
    }

    #[test]
    fn attack_kind_follows_roll() {
        let config = FightConfig::default();
        let kick = decide(view(50.0, false, true), &config, &mut always_yes());
        let punch = decide(view(50.0, false, true), &config, &mut always_no());
        assert_eq!(kick, AiDecision::Attack(AttackKind::Kick));
        assert_eq!(punch, AiDecision::Attack(AttackKind::Punch));
    }

    #[test]
    fn idles_while_cooling_down() {
        let config = FightConfig::default();
        let d = decide(view(50.0, false, false), &config, &mut always_yes());
        assert_eq!(d, AiDecision::Idle);
    }
}
