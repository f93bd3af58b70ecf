use serde::{Deserialize, Serialize};

/// Controls a view forwards to the step player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum PlayerCommand {
    Next,
    Previous,
    TogglePlay,
    Play,
    Pause,
    Reset,
    SetSpeed { ms: u64 },
}

/// Player state published after every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<usize>,
    pub len: usize,
    pub playing: bool,
    pub speed_ms: u64,
    pub can_previous: bool,
    pub can_next: bool,
}

impl PlayerSnapshot {
    pub fn is_complete(&self) -> bool {
        self.len > 0 && self.cursor == Some(self.len - 1)
    }

    /// "Step N of M", or "Ready" before a run starts.
    pub fn counter_label(&self) -> String {
        match self.cursor {
            Some(cursor) => format!("Step {} of {}", cursor + 1, self.len),
            None => format!("Ready ({} steps)", self.len),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_use_tagged_representation() {
        let json = serde_json::to_string(&PlayerCommand::SetSpeed { ms: 500 }).expect("json");
        assert_eq!(json, r#"{"type":"set_speed","payload":{"ms":500}}"#);
        let parsed: PlayerCommand =
            serde_json::from_str(r#"{"type":"toggle_play"}"#).expect("parse");
        assert_eq!(parsed, PlayerCommand::TogglePlay);
    }

    #[test]
    fn counter_label_is_one_based() {
        let snapshot = PlayerSnapshot {
            cursor: Some(0),
            len: 7,
            playing: false,
            speed_ms: 1500,
            can_previous: false,
            can_next: true,
        };
        assert_eq!(snapshot.counter_label(), "Step 1 of 7");
        assert!(!snapshot.is_complete());
        let done = PlayerSnapshot {
            cursor: Some(6),
            ..snapshot
        };
        assert!(done.is_complete());
    }
}
