use tracing::debug;

use crate::sim::battler::BattlerId;
use crate::sim::logic::BattleLogic;
use crate::sim::message::{BattleMessage, BattleOutcome};
use crate::sim::stats::MajorStatus;

/// Modified catch rate before the shake checks. `ball_bonus` is in tenths.
pub fn catch_value(max_hp: u16, hp: u16, catch_rate: u8, ball_bonus: u16, status: Option<MajorStatus>) -> u32 {
    let max_hp = max_hp.max(1) as u64;
    let hp = hp as u64;
    let base = (3 * max_hp - 2 * hp.min(max_hp)) * catch_rate as u64 * ball_bonus as u64 / (3 * max_hp * 10);
    let value = match status {
        Some(MajorStatus::Sleep | MajorStatus::Freeze) => base * 2,
        Some(_) => base * 3 / 2,
        None => base,
    };
    value.min(u32::MAX as u64) as u32
}

/// Threshold each of the four shake rolls (0..=65535) must stay under.
pub fn shake_threshold(value: u32) -> u32 {
    if value == 0 {
        return 0;
    }
    let ratio = 16_711_680.0 / value as f64;
    (1_048_560.0 / ratio.sqrt().sqrt()) as u32
}

/// Throws a ball at a wild battler. Four successful shakes end the battle.
pub fn attempt_catch(logic: &mut BattleLogic, target: BattlerId, ball_bonus: u16) {
    let battler = logic.state.battler(target);
    let value = catch_value(
        battler.max_hp(),
        battler.hp(),
        battler.species().catch_rate,
        ball_bonus,
        battler.status(),
    );
    let shakes = if value >= 255 {
        4
    } else {
        let threshold = shake_threshold(value);
        let mut shakes = 0;
        while shakes < 4 && logic.rng.range(0, 65535) < threshold {
            shakes += 1;
        }
        shakes
    };
    debug!(target = target.0, value, shakes, "catch attempt");
    logic.emit(BattleMessage::CatchShakes { target, shakes });
    if shakes == 4 {
        logic.emit(BattleMessage::Caught { target });
        logic.outcome = Some(BattleOutcome::Caught(target));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_hp_and_status_raise_the_odds() {
        let full = catch_value(100, 100, 45, 10, None);
        let low = catch_value(100, 1, 45, 10, None);
        let asleep = catch_value(100, 1, 45, 10, Some(MajorStatus::Sleep));
        let burned = catch_value(100, 1, 45, 10, Some(MajorStatus::Burn));
        assert_eq!(full, 15);
        assert!(low > full);
        assert_eq!(asleep, low * 2);
        assert_eq!(burned, low * 3 / 2);
    }

    #[test]
    fn master_ball_value_always_catches() {
        assert!(catch_value(300, 300, 3, 2550, None) >= 255);
    }

    #[test]
    fn threshold_grows_with_value() {
        assert_eq!(shake_threshold(0), 0);
        assert!(shake_threshold(10) < shake_threshold(200));
        assert!(shake_threshold(254) < 65536);
    }
}
