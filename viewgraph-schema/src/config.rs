use serde::{Deserialize, Serialize};

/// How an absent value (an unloaded relation, or a missing nullable scalar)
/// is written out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsentPolicy {
    /// Emit the key with a `null` value.
    #[default]
    Null,
    /// Leave the key out.
    Omit,
}

/// Output settings fixed at freeze time and applied to every render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub absent: AbsentPolicy,
    /// Indented output instead of compact.
    pub pretty: bool,
}
