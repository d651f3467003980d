//! Lifecycle events and the aggregated scripts the host runs for them.

use std::fmt;
use std::str::FromStr;

/// One of the trigger points the host invokes a named script for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    Load,
    Unload,
    Tick,
}

impl LifecycleEvent {
    /// All events, in the order their scripts are written.
    pub const ALL: [LifecycleEvent; 3] = [Self::Load, Self::Unload, Self::Tick];

    /// Script name inside the package's function directory.
    pub fn function_name(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Unload => "unload",
            Self::Tick => "tick",
        }
    }

    /// Whether the host discovers this script through a function tag.
    /// Unload has no host tag; it only runs through `reload`.
    pub fn is_auto_registered(self) -> bool {
        !matches!(self, Self::Unload)
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.function_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown lifecycle event '{0}' (expected load, unload or tick)")]
pub struct UnknownEvent(pub String);

impl FromStr for LifecycleEvent {
    type Err = UnknownEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "load" => Ok(Self::Load),
            "unload" => Ok(Self::Unload),
            "tick" => Ok(Self::Tick),
            other => Err(UnknownEvent(other.to_string())),
        }
    }
}

/// Instruction sequences for every lifecycle event, already concatenated
/// across plugins in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LifecycleScripts {
    pub load: Vec<String>,
    pub unload: Vec<String>,
    pub tick: Vec<String>,
}

impl LifecycleScripts {
    pub fn get(&self, event: LifecycleEvent) -> &[String] {
        match event {
            LifecycleEvent::Load => &self.load,
            LifecycleEvent::Unload => &self.unload,
            LifecycleEvent::Tick => &self.tick,
        }
    }

    pub fn get_mut(&mut self, event: LifecycleEvent) -> &mut Vec<String> {
        match event {
            LifecycleEvent::Load => &mut self.load,
            LifecycleEvent::Unload => &mut self.unload,
            LifecycleEvent::Tick => &mut self.tick,
        }
    }

    /// The script text for `event`: lines joined by `\n`, no trailing newline.
    pub fn render(&self, event: LifecycleEvent) -> String {
        self.get(event).join("\n")
    }
}
