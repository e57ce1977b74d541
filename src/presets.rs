//! # Presets and Color Profiles
//!
//! Named starting points for the effect. A preset only touches the fields
//! it names; everything else in the settings is left as it was.

use serde::{Deserialize, Serialize};

use crate::{
    config::{BlendMode, ChannelParams, Settings},
    error::{PresetError, Result},
};

/// Names accepted by [`apply_preset`]
pub const PRESET_NAMES: [&str; 6] = ["subtle", "glitch", "vhs", "3d", "neon", "retro"];

/// Palette the three channel tints are drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorProfile {
    #[default]
    Rgb,
    Cmy,
    Custom,
}

impl ColorProfile {
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "rgb" => Ok(Self::Rgb),
            "cmy" => Ok(Self::Cmy),
            "custom" => Ok(Self::Custom),
            _ => Err(PresetError::ProfileNotFound { name: name.to_string() }.into()),
        }
    }

    /// Channel tints for this profile; `Custom` has none of its own
    pub fn colors(&self) -> Option<[&'static str; 3]> {
        match self {
            Self::Rgb => Some(["#ff0000", "#00ff00", "#0000ff"]),
            Self::Cmy => Some(["#00ffff", "#ff00ff", "#ffff00"]),
            Self::Custom => None,
        }
    }

    /// Select this profile, replacing the channel colors unless custom
    pub fn apply(&self, settings: &mut Settings) {
        settings.color_profile = *self;
        if let Some([c1, c2, c3]) = self.colors() {
            settings.channel1_color = c1.to_string();
            settings.channel2_color = c2.to_string();
            settings.channel3_color = c3.to_string();
        }
    }
}

fn channel(x: f64, y: f64, opacity: f64, blend: BlendMode, scale: f64, rotation: f64) -> ChannelParams {
    ChannelParams { x, y, opacity, blend, scale, rotation }
}

/// Overlay a named preset onto `settings`
pub fn apply_preset(name: &str, settings: &mut Settings) -> Result<()> {
    use BlendMode::*;

    match name {
        "subtle" => {
            settings.algorithm = "classic".to_string();
            settings.intensity = 100.0;
            settings.red = channel(2.0, -1.0, 100.0, Screen, 100.0, 0.0);
            settings.green = channel(0.0, 0.0, 100.0, Screen, 100.0, 0.0);
            settings.blue = channel(-2.0, 1.0, 100.0, Screen, 100.0, 0.0);
            settings.show_base = true;
            settings.base_opacity = 70.0;
        }
        "glitch" => {
            settings.algorithm = "classic".to_string();
            settings.intensity = 150.0;
            settings.red = channel(12.0, -4.0, 90.0, Screen, 102.0, 1.0);
            settings.green = channel(-3.0, 2.0, 85.0, Lighten, 100.0, 0.0);
            settings.blue = channel(-10.0, 5.0, 95.0, Screen, 98.0, -1.0);
            settings.show_base = false;
            settings.base_opacity = 50.0;
        }
        "vhs" => {
            settings.algorithm = "wave".to_string();
            settings.intensity = 120.0;
            settings.frequency = 8.0;
            settings.amplitude = 6.0;
            settings.red = channel(8.0, 0.0, 80.0, Lighten, 100.0, 0.0);
            settings.green = channel(0.0, 2.0, 90.0, Screen, 100.0, 0.0);
            settings.blue = channel(-6.0, 0.0, 85.0, Lighten, 100.0, 0.0);
            settings.show_base = true;
            settings.base_opacity = 40.0;
        }
        "3d" => {
            settings.algorithm = "classic".to_string();
            settings.intensity = 100.0;
            settings.red = channel(-6.0, 0.0, 100.0, Multiply, 100.0, 0.0);
            settings.green = channel(0.0, 0.0, 0.0, Normal, 100.0, 0.0);
            settings.blue = channel(6.0, 0.0, 100.0, Multiply, 100.0, 0.0);
            settings.show_base = true;
            settings.base_opacity = 100.0;
            settings.bg_color = "#ffffff".to_string();
        }
        "neon" => {
            settings.algorithm = "radial".to_string();
            settings.intensity = 130.0;
            settings.angle = 45.0;
            settings.red = channel(6.0, -6.0, 100.0, Screen, 105.0, 2.0);
            settings.green = channel(0.0, 0.0, 100.0, Screen, 100.0, 0.0);
            settings.blue = channel(-6.0, 6.0, 100.0, Screen, 95.0, -2.0);
            settings.show_base = false;
            settings.base_opacity = 50.0;
        }
        "retro" => {
            settings.algorithm = "angular".to_string();
            settings.intensity = 110.0;
            settings.angle = 120.0;
            settings.red = channel(4.0, 2.0, 95.0, Overlay, 100.0, 0.0);
            settings.green = channel(-2.0, -1.0, 90.0, Overlay, 100.0, 0.0);
            settings.blue = channel(3.0, -3.0, 100.0, Overlay, 100.0, 0.0);
            settings.show_base = true;
            settings.base_opacity = 60.0;
        }
        _ => return Err(PresetError::NotFound { name: name.to_string() }.into()),
    }

    Ok(())
}
