//! Layout configuration and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/card-stack/config.toml` (default `~/.config/card-stack/config.toml`).

use std::path::PathBuf;

use crate::core::error::LayoutError;
use crate::core::geometry::Size;

// ───────────────────────────────────────── front motion ──────

/// How the front card travels before it reaches the stopping line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrontCardMotion {
    /// Slide left by the full in-page delta.
    #[default]
    Follow,
    /// Slide left by the in-page delta, but never further than one card width.
    ClampToCardWidth,
}

impl FrontCardMotion {
    fn config_key(self) -> &'static str {
        match self {
            FrontCardMotion::Follow => "follow",
            FrontCardMotion::ClampToCardWidth => "clamp",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        match s {
            "follow" => Some(FrontCardMotion::Follow),
            "clamp" | "clamp_to_card_width" => Some(FrontCardMotion::ClampToCardWidth),
            _ => None,
        }
    }
}

// ───────────────────────────────────────── config ────────────

/// Largest fan the layout accepts.
pub const MAX_VISIBLE_ITEMS_LIMIT: usize = 64;

/// Everything that shapes the stack.  Immutable during a layout pass; the
/// host may swap it between passes.
#[derive(Debug, Clone, PartialEq)]
pub struct StackConfig {
    pub card_width: f64,
    pub card_height: f64,
    /// Horizontal offset added per stacking depth.
    pub horizontal_spacing: f64,
    /// Vertical offset added per stacking depth.
    pub vertical_spacing: f64,
    /// Cards shown in the fan before they fade out.
    pub max_visible_items: usize,
    /// Per-depth scale multiplier, in (0, 1).
    pub scale_decay_base: f64,
    /// Distance from the viewport's left edge at which the front card pins.
    pub stopping_line: f64,
    /// Floor for the front card's scale while it retreats.
    pub minimum_front_scale: f64,
    /// Multiplier applied to negative scroll progress (rubber-band feel).
    pub overscroll_damping: f64,
    /// Calibration added to every settled paging offset.
    pub paging_snap_offset: f64,
    /// Velocities above this (pages per gesture) skip whole pages.
    pub flick_velocity_threshold: f64,
    pub front_card_motion: FrontCardMotion,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            card_width: 260.0,
            card_height: 500.0,
            horizontal_spacing: 20.0,
            vertical_spacing: 5.0,
            max_visible_items: 4,
            scale_decay_base: 0.95,
            stopping_line: 40.0,
            minimum_front_scale: 1.0,
            overscroll_damping: 0.08,
            paging_snap_offset: 0.0,
            flick_velocity_threshold: 1.0,
            front_card_motion: FrontCardMotion::Follow,
        }
    }
}

impl StackConfig {
    pub fn card_size(&self) -> Size {
        Size::new(self.card_width, self.card_height)
    }

    /// Check every field against the range the geometry formulas need.
    pub fn validate(&self) -> Result<(), LayoutError> {
        fn positive(field: &'static str, v: f64) -> Result<(), LayoutError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(LayoutError::InvalidConfig {
                    field,
                    reason: "must be finite and > 0",
                })
            }
        }
        fn finite(field: &'static str, v: f64) -> Result<(), LayoutError> {
            if v.is_finite() {
                Ok(())
            } else {
                Err(LayoutError::InvalidConfig {
                    field,
                    reason: "must be finite",
                })
            }
        }

        positive("card_width", self.card_width)?;
        positive("card_height", self.card_height)?;
        finite("horizontal_spacing", self.horizontal_spacing)?;
        finite("vertical_spacing", self.vertical_spacing)?;
        finite("stopping_line", self.stopping_line)?;
        finite("paging_snap_offset", self.paging_snap_offset)?;
        positive("minimum_front_scale", self.minimum_front_scale)?;
        if self.max_visible_items == 0 {
            return Err(LayoutError::InvalidConfig {
                field: "max_visible_items",
                reason: "must be >= 1",
            });
        }
        if self.max_visible_items > MAX_VISIBLE_ITEMS_LIMIT {
            return Err(LayoutError::InvalidConfig {
                field: "max_visible_items",
                reason: "must be <= 64",
            });
        }
        if !(self.scale_decay_base > 0.0 && self.scale_decay_base < 1.0) {
            return Err(LayoutError::InvalidConfig {
                field: "scale_decay_base",
                reason: "must lie in (0, 1)",
            });
        }
        if !(0.0..=1.0).contains(&self.overscroll_damping) {
            return Err(LayoutError::InvalidConfig {
                field: "overscroll_damping",
                reason: "must lie in [0, 1]",
            });
        }
        if !self.flick_velocity_threshold.is_finite() || self.flick_velocity_threshold < 0.0 {
            return Err(LayoutError::InvalidConfig {
                field: "flick_velocity_threshold",
                reason: "must be finite and >= 0",
            });
        }
        Ok(())
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        if path.exists() {
            if let Ok(contents) = std::fs::read_to_string(&path) {
                tracing::debug!("loading config from {}", path.display());
                return Self::parse(&contents);
            }
        }
        Self::default()
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(())
    }

    /// Parse the `key = value` format.  Unknown keys and values that fail
    /// to parse are skipped; whatever is left keeps its default.
    pub fn parse(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            let applied = match key {
                "card_width" => set_f64(&mut config.card_width, value),
                "card_height" => set_f64(&mut config.card_height, value),
                "horizontal_spacing" => set_f64(&mut config.horizontal_spacing, value),
                "vertical_spacing" => set_f64(&mut config.vertical_spacing, value),
                "scale_decay_base" => set_f64(&mut config.scale_decay_base, value),
                "stopping_line" => set_f64(&mut config.stopping_line, value),
                "minimum_front_scale" => set_f64(&mut config.minimum_front_scale, value),
                "overscroll_damping" => set_f64(&mut config.overscroll_damping, value),
                "paging_snap_offset" => set_f64(&mut config.paging_snap_offset, value),
                "flick_velocity_threshold" => {
                    set_f64(&mut config.flick_velocity_threshold, value)
                }
                "max_visible_items" => match value.parse::<usize>() {
                    Ok(v) => {
                        config.max_visible_items = v;
                        true
                    }
                    Err(_) => false,
                },
                "front_card_motion" => match FrontCardMotion::from_config_key(value) {
                    Some(m) => {
                        config.front_card_motion = m;
                        true
                    }
                    None => false,
                },
                _ => {
                    tracing::warn!("config: unknown key `{key}`");
                    continue;
                }
            };
            if !applied {
                tracing::warn!("config: ignoring bad value for `{key}`: {value}");
            }
        }

        config
    }

    pub fn serialise(&self) -> String {
        let lines = [
            "# card-stack configuration".to_string(),
            String::new(),
            "# Card geometry".to_string(),
            format!("card_width = {}", self.card_width),
            format!("card_height = {}", self.card_height),
            format!("horizontal_spacing = {}", self.horizontal_spacing),
            format!("vertical_spacing = {}", self.vertical_spacing),
            String::new(),
            "# Stack shape".to_string(),
            format!("max_visible_items = {}", self.max_visible_items),
            format!("scale_decay_base = {}", self.scale_decay_base),
            format!("minimum_front_scale = {}", self.minimum_front_scale),
            String::new(),
            "# Front card".to_string(),
            "# front_card_motion: follow | clamp".to_string(),
            format!("stopping_line = {}", self.stopping_line),
            format!("front_card_motion = {}", self.front_card_motion.config_key()),
            String::new(),
            "# Scrolling".to_string(),
            format!("overscroll_damping = {}", self.overscroll_damping),
            format!("paging_snap_offset = {}", self.paging_snap_offset),
            format!("flick_velocity_threshold = {}", self.flick_velocity_threshold),
            String::new(),
        ];
        lines.join("\n")
    }
}

fn set_f64(slot: &mut f64, value: &str) -> bool {
    match value.parse::<f64>() {
        Ok(v) => {
            *slot = v;
            true
        }
        Err(_) => false,
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/card-stack/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("card-stack").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = StackConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.overscroll_damping, 0.08);
        assert_eq!(config.max_visible_items, 4);
    }

    #[test]
    fn serialised_config_parses_back() {
        let config = StackConfig {
            card_width: 200.0,
            max_visible_items: 6,
            stopping_line: 32.5,
            front_card_motion: FrontCardMotion::ClampToCardWidth,
            ..StackConfig::default()
        };
        assert_eq!(StackConfig::parse(&config.serialise()), config);
    }

    #[test]
    fn parse_skips_garbage_and_keeps_defaults() {
        let text = "\
            # comment\n\
            [section]\n\
            stopping_line = 55\n\
            max_visible_items = many\n\
            no_such_key = 3\n\
            not a pair\n\
            front_card_motion = \"clamp\"\n";
        let config = StackConfig::parse(text);
        assert_eq!(config.stopping_line, 55.0);
        assert_eq!(config.max_visible_items, 4);
        assert_eq!(config.front_card_motion, FrontCardMotion::ClampToCardWidth);
    }

    #[test]
    fn validate_names_the_offending_field() {
        let config = StackConfig {
            max_visible_items: 0,
            ..StackConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidConfig { field: "max_visible_items", .. })
        ));

        let config = StackConfig {
            max_visible_items: i32::MAX as usize + 1,
            ..StackConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidConfig { field: "max_visible_items", .. })
        ));
        let config = StackConfig {
            max_visible_items: MAX_VISIBLE_ITEMS_LIMIT,
            ..StackConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));

        let config = StackConfig {
            scale_decay_base: 1.2,
            ..StackConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidConfig { field: "scale_decay_base", .. })
        ));

        let config = StackConfig {
            card_width: 0.0,
            ..StackConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidConfig { field: "card_width", .. })
        ));
    }
}
