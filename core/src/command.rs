use serde::{Deserialize, Serialize};

/// Dashboard refresh cadence when none is given.
pub const DEFAULT_INTERVAL_MS: u64 = 1000;

/// Upper bound on `tick {count}`; a batch holds the engine lock throughout.
pub const MAX_TICKS_PER_COMMAND: u64 = 10_000;

/// Commands a driver accepts on its line protocol.
/// Strategy and risk arrive as raw strings: an unknown strategy still
/// applies (as flat sizing), an unknown risk level is reported back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DriverCommand {
    // ── Reads ─────────────────────────────────────
    GetState,

    // ── Stepping ──────────────────────────────────
    Tick {
        #[serde(default = "one")]
        count: u64,
    },
    Start {
        #[serde(default = "default_interval")]
        interval_ms: u64,
    },
    Stop,
    Reset,

    // ── Configuration ─────────────────────────────
    SetStrategy { strategy: String },
    SetRisk { level: String },
    Log { message: String },

    Quit,
}

fn one() -> u64 {
    1
}

fn default_interval() -> u64 {
    DEFAULT_INTERVAL_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_commands() {
        let cmd: DriverCommand = serde_json::from_str(r#"{"type":"tick","count":5}"#).unwrap();
        assert_eq!(cmd, DriverCommand::Tick { count: 5 });

        let cmd: DriverCommand =
            serde_json::from_str(r#"{"type":"set_strategy","strategy":"kelly"}"#).unwrap();
        assert_eq!(cmd, DriverCommand::SetStrategy { strategy: "kelly".into() });
    }

    #[test]
    fn defaults_fill_missing_fields() {
        let cmd: DriverCommand = serde_json::from_str(r#"{"type":"tick"}"#).unwrap();
        assert_eq!(cmd, DriverCommand::Tick { count: 1 });

        let cmd: DriverCommand = serde_json::from_str(r#"{"type":"start"}"#).unwrap();
        assert_eq!(cmd, DriverCommand::Start { interval_ms: 1000 });
    }

    #[test]
    fn rejects_unknown_command() {
        assert!(serde_json::from_str::<DriverCommand>(r#"{"type":"withdraw"}"#).is_err());
    }
}
