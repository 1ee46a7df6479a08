//! Sprite dimensions
//!
//! The simulation never touches pixels, but collision boxes, pipe placement
//! and HUD layout all depend on sprite sizes. An `AssetBundle` carries those
//! sizes and is handed to the session by reference; nothing here is global.
//! Bundles can be read from a JSON manifest so a presenter with different
//! artwork can describe its sprites.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Width and height of one sprite, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteSize {
    pub width: f32,
    pub height: f32,
}

impl SpriteSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Asset manifest errors (fatal at startup)
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read asset manifest: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse asset manifest: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("sprite `{sprite}` has a non-positive or non-finite dimension")]
    InvalidDimension { sprite: String },
}

/// Sizes of every sprite the game draws
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetBundle {
    pub background: SpriteSize,
    pub player: SpriteSize,
    /// Both pipe orientations share one image (the upper one is rotated)
    pub pipe: SpriteSize,
    pub base: SpriteSize,
    pub message: SpriteSize,
    /// Digit sprites 0 through 9
    pub digits: [SpriteSize; 10],
}

impl Default for AssetBundle {
    /// Dimensions of the classic sprite sheet
    fn default() -> Self {
        let digit = SpriteSize::new(24.0, 36.0);
        let mut digits = [digit; 10];
        digits[1] = SpriteSize::new(16.0, 36.0);
        Self {
            background: SpriteSize::new(288.0, 512.0),
            player: SpriteSize::new(34.0, 24.0),
            pipe: SpriteSize::new(52.0, 320.0),
            base: SpriteSize::new(336.0, 112.0),
            message: SpriteSize::new(184.0, 267.0),
            digits,
        }
    }
}

impl AssetBundle {
    /// Parse a manifest from JSON. Missing sprites keep their default size.
    pub fn from_json(json: &str) -> Result<Self, AssetError> {
        let bundle: Self = serde_json::from_str(json)?;
        bundle.validate()?;
        Ok(bundle)
    }

    /// Load a manifest from disk
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let json = fs::read_to_string(path)?;
        let bundle = Self::from_json(&json)?;
        log::info!("Loaded asset manifest from {}", path.display());
        Ok(bundle)
    }

    /// Reject sizes that would break collision boxes or layout
    pub fn validate(&self) -> Result<(), AssetError> {
        let named = [
            ("background", self.background),
            ("player", self.player),
            ("pipe", self.pipe),
            ("base", self.base),
            ("message", self.message),
        ];
        for (name, size) in named {
            check(name.to_string(), size)?;
        }
        for (i, size) in self.digits.iter().enumerate() {
            check(format!("digit {i}"), *size)?;
        }
        Ok(())
    }

    /// Size of the sprite for a single decimal digit
    pub fn digit(&self, digit: u8) -> SpriteSize {
        self.digits[usize::from(digit % 10)]
    }
}

fn check(sprite: String, size: SpriteSize) -> Result<(), AssetError> {
    let ok = |v: f32| v.is_finite() && v > 0.0;
    if ok(size.width) && ok(size.height) {
        Ok(())
    } else {
        Err(AssetError::InvalidDimension { sprite })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bundle_is_valid() {
        let bundle = AssetBundle::default();
        assert!(bundle.validate().is_ok());
        assert_eq!(bundle.player, SpriteSize::new(34.0, 24.0));
        assert_eq!(bundle.pipe, SpriteSize::new(52.0, 320.0));
    }

    #[test]
    fn test_partial_manifest_keeps_defaults() {
        let bundle = AssetBundle::from_json(r#"{ "player": { "width": 40, "height": 30 } }"#)
            .expect("manifest should parse");
        assert_eq!(bundle.player, SpriteSize::new(40.0, 30.0));
        assert_eq!(bundle.pipe, AssetBundle::default().pipe);
    }

    #[test]
    fn test_rejects_zero_dimension() {
        let err = AssetBundle::from_json(r#"{ "pipe": { "width": 0, "height": 320 } }"#)
            .unwrap_err();
        assert!(matches!(err, AssetError::InvalidDimension { ref sprite } if sprite == "pipe"));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = AssetBundle::from_json("{ not json").unwrap_err();
        assert!(matches!(err, AssetError::Parse(_)));
    }

    #[test]
    fn test_digit_lookup_wraps() {
        let bundle = AssetBundle::default();
        assert_eq!(bundle.digit(1).width, 16.0);
        assert_eq!(bundle.digit(11).width, 16.0);
        assert_eq!(bundle.digit(0).width, 24.0);
    }
}
