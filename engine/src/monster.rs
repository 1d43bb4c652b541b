use serde::{Deserialize, Serialize};

use crate::error::MalformedReason;

/// Speed used when a definition file has no `speed` column.
pub const DEFAULT_SPEED: i32 = 10;

/// A fully validated monster definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonsterRecord {
    pub name: String,
    pub hp: i32,
    pub move_name: String,
    pub move_power: i32,
    #[serde(default = "default_speed")]
    pub speed: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_video_url: Option<String>,
}

fn default_speed() -> i32 {
    DEFAULT_SPEED
}

impl MonsterRecord {
    /// Record without media; used by tests and hosts that build rosters in memory.
    pub fn new(
        name: impl Into<String>,
        hp: i32,
        move_name: impl Into<String>,
        move_power: i32,
        speed: i32,
    ) -> Self {
        Self {
            name: name.into(),
            hp,
            move_name: move_name.into(),
            move_power,
            speed,
            image_url: None,
            move_video_url: None,
        }
    }

    /// Non-empty move name, `hp > 0`, `move_power >= 0`.
    pub fn check(&self) -> Result<(), MalformedReason> {
        if self.move_name.is_empty() {
            return Err(MalformedReason::EmptyMoveName);
        }
        if self.hp <= 0 {
            return Err(MalformedReason::OutOfRange {
                field: "hp",
                value: self.hp,
            });
        }
        if self.move_power < 0 {
            return Err(MalformedReason::OutOfRange {
                field: "movePower",
                value: self.move_power,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_uses_camel_case_and_omits_missing_media() {
        let rec = MonsterRecord::new("embercat", 90, "Cinder Pounce", 18, 14);
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["moveName"], "Cinder Pounce");
        assert_eq!(json["movePower"], 18);
        assert!(json.get("imageUrl").is_none());
        assert!(json.get("moveVideoUrl").is_none());
    }

    #[test]
    fn speed_defaults_when_deserializing_old_payloads() {
        let rec: MonsterRecord =
            serde_json::from_str(r#"{"name":"a","hp":5,"moveName":"Tap","movePower":1}"#).unwrap();
        assert_eq!(rec.speed, DEFAULT_SPEED);
    }

    #[test]
    fn check_rejects_negative_power_and_dead_records() {
        assert!(MonsterRecord::new("a", 5, "Tap", 0, 1).check().is_ok());
        assert_eq!(
            MonsterRecord::new("a", 5, "Heal", -50, 1).check(),
            Err(MalformedReason::OutOfRange {
                field: "movePower",
                value: -50
            })
        );
        assert_eq!(
            MonsterRecord::new("a", 0, "Tap", 1, 1).check(),
            Err(MalformedReason::OutOfRange { field: "hp", value: 0 })
        );
        assert_eq!(
            MonsterRecord::new("a", 5, "", 1, 1).check(),
            Err(MalformedReason::EmptyMoveName)
        );
    }
}
