use serde_json::json;

use crate::data::items::get_item;
use crate::data::moves::get_move;
use crate::scene::BattlePresenter;
use crate::sim::battler::BattlerId;
use crate::sim::message::{BattleMessage, BattleOutcome};
use crate::sim::state::{BattleState, Terrain, Weather};

/// Presenter that records a Showdown-protocol style log.
#[derive(Clone, Debug, Default)]
pub struct BattleLogger {
    formatid: String,
    players: [String; 2],
    log: Vec<String>,
}

impl BattleLogger {
    pub fn new() -> Self {
        Self::new_with_format("gen9customgame")
    }

    pub fn new_with_format(formatid: impl Into<String>) -> Self {
        Self {
            formatid: formatid.into(),
            players: Default::default(),
            log: Vec::new(),
        }
    }

    pub fn log_turn(&mut self, turn: u32) {
        self.log.push(format!("|turn|{turn}"));
    }

    pub fn log_move(&mut self, source: &str, move_name: &str) {
        self.log.push(format!("|move|{source}|{move_name}|"));
    }

    pub fn log_damage(&mut self, target: &str, hp: u16, max_hp: u16) {
        self.log.push(format!("|-damage|{target}|{hp}/{max_hp}"));
    }

    pub fn log_heal(&mut self, target: &str, hp: u16, max_hp: u16) {
        self.log.push(format!("|-heal|{target}|{hp}/{max_hp}"));
    }

    pub fn log_status(&mut self, target: &str, status: &str) {
        self.log.push(format!("|-status|{target}|{status}"));
    }

    pub fn log_switch(&mut self, kind: &str, pokemon: &str, species: &str, hp: u16, max_hp: u16) {
        self.log.push(format!("|{kind}|{pokemon}|{species}|{hp}/{max_hp}"));
    }

    pub fn log_win(&mut self, winner: &str) {
        self.log.push(format!("|win|{winner}"));
    }

    pub fn log_tie(&mut self) {
        self.log.push("|tie|".to_string());
    }

    pub fn log_lines(&self) -> &[String] {
        &self.log
    }

    pub fn into_lines(self) -> Vec<String> {
        self.log
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "formatid": self.formatid,
            "p1": self.players[0],
            "p2": self.players[1],
            "log": self.log,
        })
    }

    fn line(&mut self, line: String) {
        self.log.push(line);
    }

    fn remember_players(&mut self, state: &BattleState) {
        if self.players[0].is_empty() {
            self.players = [state.sides[0].name.clone(), state.sides[1].name.clone()];
        }
    }
}

/// `p1a: Name` style identifier for the battler's current slot.
pub fn showdown_ident(state: &BattleState, id: BattlerId) -> String {
    let battler = state.battler(id);
    let slot = (b'a' + battler.position().unwrap_or(0) as u8) as char;
    format!("p{}{slot}: {}", battler.bank + 1, battler.name())
}

fn weather_name(weather: Option<Weather>) -> &'static str {
    match weather {
        Some(Weather::Sun) => "SunnyDay",
        Some(Weather::Rain) => "RainDance",
        Some(Weather::Sand) => "Sandstorm",
        Some(Weather::Hail) => "Hail",
        None => "none",
    }
}

fn terrain_name(terrain: Terrain) -> &'static str {
    match terrain {
        Terrain::Electric => "Electric Terrain",
        Terrain::Grassy => "Grassy Terrain",
        Terrain::Misty => "Misty Terrain",
        Terrain::Psychic => "Psychic Terrain",
    }
}

fn item_name(id: &str) -> &str {
    get_item(id).map_or(id, |item| item.name)
}

impl BattlePresenter for BattleLogger {
    fn show_effect_used(&mut self, state: &BattleState, battler: BattlerId, symbol: &'static str) {
        let ident = showdown_ident(state, battler);
        self.line(format!("|-activate|{ident}|{symbol}"));
    }

    fn display_message(&mut self, state: &BattleState, message: &BattleMessage) -> Option<usize> {
        self.remember_players(state);
        let ident = |id: BattlerId| showdown_ident(state, id);
        match *message {
            BattleMessage::TurnStarted { turn } => self.log_turn(turn),
            BattleMessage::SentOut { battler } | BattleMessage::DraggedOut { battler } => {
                let kind = if matches!(message, BattleMessage::SentOut { .. }) {
                    "switch"
                } else {
                    "drag"
                };
                let b = state.battler(battler);
                self.log_switch(kind, &ident(battler), b.species().name, b.hp(), b.max_hp());
            }
            BattleMessage::Withdrew { battler } => self.line(format!("|-withdraw|{}", ident(battler))),
            BattleMessage::UsedMove { user, move_id } => {
                let name = get_move(move_id).map_or(move_id, |data| data.name);
                self.log_move(&ident(user), name);
            }
            BattleMessage::MoveFailed { user } => self.line(format!("|-fail|{}", ident(user))),
            BattleMessage::Missed { user, target } => self.line(format!("|-miss|{}|{}", ident(user), ident(target))),
            BattleMessage::NoEffect { target } => self.line(format!("|-immune|{}", ident(target))),
            BattleMessage::SuperEffective { target } => self.line(format!("|-supereffective|{}", ident(target))),
            BattleMessage::NotVeryEffective { target } => self.line(format!("|-resisted|{}", ident(target))),
            BattleMessage::CriticalHit { target } => self.line(format!("|-crit|{}", ident(target))),
            BattleMessage::Damaged { target, hp, max_hp, .. } => self.log_damage(&ident(target), hp, max_hp),
            BattleMessage::Healed { target, hp, max_hp, .. } => self.log_heal(&ident(target), hp, max_hp),
            BattleMessage::Fainted { battler } => self.line(format!("|faint|{}", ident(battler))),
            BattleMessage::StatusApplied { target, status } => self.log_status(&ident(target), status.name()),
            BattleMessage::StatusCured { target, status } => {
                self.line(format!("|-curestatus|{}|{}", ident(target), status.name()))
            }
            BattleMessage::AlreadyStatused { target } => self.line(format!("|-fail|{}|status", ident(target))),
            BattleMessage::StatusPrevented { target, by } | BattleMessage::MovePrevented { battler: target, by } => {
                self.line(format!("|cant|{}|{by}", ident(target)))
            }
            BattleMessage::StageChanged { target, stat, delta } => {
                let kind = if delta > 0 { "-boost" } else { "-unboost" };
                self.line(format!("|{kind}|{}|{}|{}", ident(target), stat.name(), delta.unsigned_abs()));
            }
            BattleMessage::StageUnchanged { target, stat, rising } => {
                let kind = if rising { "-boost" } else { "-unboost" };
                self.line(format!("|{kind}|{}|{}|0", ident(target), stat.name()));
            }
            BattleMessage::ItemChanged { holder, old, new, consumed } => match (old, new) {
                (_, Some(new)) => self.line(format!("|-item|{}|{}", ident(holder), item_name(new))),
                (Some(old), None) => {
                    let suffix = if consumed { "|[eat]" } else { "" };
                    self.line(format!("|-enditem|{}|{}{suffix}", ident(holder), item_name(old)));
                }
                (None, None) => {}
            },
            BattleMessage::AbilityChanged { battler, ability } => {
                self.line(format!("|-ability|{}|{ability}", ident(battler)))
            }
            BattleMessage::MegaEvolved { battler, form } => self.line(format!("|-mega|{}|{form}", ident(battler))),
            BattleMessage::EffectTriggered { battler, effect } => {
                self.line(format!("|-activate|{}|{effect}", ident(battler)))
            }
            BattleMessage::VolatileStarted { target, volatile } => {
                self.line(format!("|-start|{}|{volatile}", ident(target)))
            }
            BattleMessage::VolatileEnded { target, volatile } => self.line(format!("|-end|{}|{volatile}", ident(target))),
            BattleMessage::WeatherChanged { weather } => self.line(format!("|-weather|{}", weather_name(weather))),
            BattleMessage::TerrainChanged { terrain } => match terrain {
                Some(terrain) => self.line(format!("|-fieldstart|{}", terrain_name(terrain))),
                None => self.line("|-fieldend|terrain".to_string()),
            },
            BattleMessage::SideConditionStarted { bank, condition } => {
                self.line(format!("|-sidestart|p{}|{condition}", bank + 1))
            }
            BattleMessage::SideConditionEnded { bank, condition } => {
                self.line(format!("|-sideend|p{}|{condition}", bank + 1))
            }
            BattleMessage::FieldConditionStarted { condition } => self.line(format!("|-fieldstart|{condition}")),
            BattleMessage::FieldConditionEnded { condition } => self.line(format!("|-fieldend|{condition}")),
            BattleMessage::ItemUsed { bank, item, target } => {
                self.line(format!("|-useitem|p{}|{}|{}", bank + 1, item_name(item), ident(target)))
            }
            BattleMessage::FleeSucceeded { battler } => self.line(format!("|-flee|{}", ident(battler))),
            BattleMessage::FleeFailed { battler } => self.line(format!("|-fail|{}|flee", ident(battler))),
            BattleMessage::CatchShakes { target, shakes } => {
                self.line(format!("|-shake|{}|{shakes}", ident(target)))
            }
            BattleMessage::Caught { target } => self.line(format!("|-caught|{}", ident(target))),
            BattleMessage::ConfirmFlee { .. } => {}
        }
        None
    }

    fn battle_ended(&mut self, state: &BattleState, outcome: BattleOutcome) {
        self.remember_players(state);
        match outcome {
            BattleOutcome::Won(bank) => {
                let winner = state.sides[bank].name.clone();
                self.log_win(&winner);
            }
            BattleOutcome::Draw => self.log_tie(),
            BattleOutcome::Fled => self.line("|-end|fled".to_string()),
            BattleOutcome::Caught(id) => self.line(format!("|-end|caught|{}", state.battler(id).name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::BattleScene;
    use crate::sim::ai::RandomAI;
    use crate::sim::info::{BattleConfig, BattleInfo, BattleSide, PartyMember};
    use crate::sim::logic::BattleLogic;

    #[test]
    fn records_a_full_battle() {
        let side = |name: &str, member| BattleSide {
            name: name.into(),
            party: vec![member],
            ..BattleSide::default()
        };
        let info = BattleInfo::singles(
            side("red", PartyMember::new("garchomp", 60, &["earthquake"])),
            side("blue", PartyMember::new("magikarp", 5, &["splash"])),
        );
        let logic = BattleLogic::new(&info, BattleConfig::with_seed(3)).unwrap();
        let mut logger = BattleLogger::new();
        let mut scene = BattleScene::new(logic, &mut logger);
        let (mut red, mut blue) = (RandomAI::new(1), RandomAI::new(2));
        scene.drive(&mut [&mut red, &mut blue]);
        drop(scene);

        let lines = logger.log_lines();
        assert_eq!(lines[0], "|switch|p1a: Garchomp|Garchomp|218/218");
        assert!(lines.iter().any(|l| l == "|turn|1"));
        assert!(lines.iter().any(|l| l.starts_with("|move|p1a: Garchomp|Earthquake|")));
        assert!(lines.iter().any(|l| l == "|faint|p2a: Magikarp"));
        assert_eq!(lines.last().map(String::as_str), Some("|win|red"));
        assert_eq!(logger.to_json()["p2"], "blue");
    }

    #[test]
    fn ident_uses_slot_letter() {
        let info = BattleInfo {
            battle_size: 2,
            ..BattleInfo::singles(
                BattleSide {
                    name: "a".into(),
                    party: vec![
                        PartyMember::new("pikachu", 50, &["tackle"]),
                        PartyMember::new("jolteon", 50, &["tackle"]),
                    ],
                    ..BattleSide::default()
                },
                BattleSide {
                    name: "b".into(),
                    party: vec![PartyMember::new("pidgey", 50, &["tackle"])],
                    ..BattleSide::default()
                },
            )
        };
        let mut logic = BattleLogic::new(&info, BattleConfig::default()).unwrap();
        logic.start();
        assert_eq!(showdown_ident(logic.state(), BattlerId(1)), "p1b: Jolteon");
        assert_eq!(showdown_ident(logic.state(), BattlerId(2)), "p2a: Pidgey");
    }
}
