use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigError, Result},
    geometry::Bounds,
    presets::ColorProfile,
};

/// Main configuration for RGB-Split
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Effect settings snapshot
    pub settings: Settings,

    /// Styling for generated text content
    pub text: TextStyle,

    /// Render target and export settings
    pub render: RenderConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    ///
    /// Rendering itself tolerates every value; this is a load-time check
    /// so that typos in a config file are reported instead of silently
    /// falling back.
    pub fn validate(&self) -> Result<()> {
        self.settings.validate()?;
        self.text.validate()?;
        self.render.validate()?;
        Ok(())
    }
}

/// One of the three logical color roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Map a layer-order selector character
    pub fn from_selector(selector: char) -> Option<Self> {
        match selector {
            'r' => Some(Self::Red),
            'g' => Some(Self::Green),
            'b' => Some(Self::Blue),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        }
    }

    /// Identifier of the tint filter definition for this channel
    pub fn filter_id(&self) -> &'static str {
        match self {
            Self::Red => "redChannel",
            Self::Green => "greenChannel",
            Self::Blue => "blueChannel",
        }
    }

    /// Outward/inward direction used by the radial and angular splits
    pub fn polarity(&self) -> f64 {
        match self {
            Self::Red => 1.0,
            Self::Green => 0.0,
            Self::Blue => -1.0,
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// CSS/SVG compositing operator for a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    #[default]
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

impl BlendMode {
    const ALL: [BlendMode; 16] = [
        BlendMode::Normal,
        BlendMode::Multiply,
        BlendMode::Screen,
        BlendMode::Overlay,
        BlendMode::Darken,
        BlendMode::Lighten,
        BlendMode::ColorDodge,
        BlendMode::ColorBurn,
        BlendMode::HardLight,
        BlendMode::SoftLight,
        BlendMode::Difference,
        BlendMode::Exclusion,
        BlendMode::Hue,
        BlendMode::Saturation,
        BlendMode::Color,
        BlendMode::Luminosity,
    ];

    /// Look up a blend mode by its CSS keyword
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.as_css() == name)
    }

    /// CSS `mix-blend-mode` keyword
    pub fn as_css(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Multiply => "multiply",
            Self::Screen => "screen",
            Self::Overlay => "overlay",
            Self::Darken => "darken",
            Self::Lighten => "lighten",
            Self::ColorDodge => "color-dodge",
            Self::ColorBurn => "color-burn",
            Self::HardLight => "hard-light",
            Self::SoftLight => "soft-light",
            Self::Difference => "difference",
            Self::Exclusion => "exclusion",
            Self::Hue => "hue",
            Self::Saturation => "saturation",
            Self::Color => "color",
            Self::Luminosity => "luminosity",
        }
    }
}

impl std::fmt::Display for BlendMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_css())
    }
}

/// Per-channel transform parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelParams {
    /// Horizontal base offset in px
    pub x: f64,

    /// Vertical base offset in px
    pub y: f64,

    /// Opacity in percent (values above 100 are passed through)
    pub opacity: f64,

    /// Compositing operator
    pub blend: BlendMode,

    /// Scale in percent
    pub scale: f64,

    /// Rotation in degrees
    pub rotation: f64,
}

impl ChannelParams {
    pub fn with_offset(x: f64, y: f64) -> Self {
        Self { x, y, ..Self::default() }
    }
}

impl Default for ChannelParams {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            opacity: 100.0,
            blend: BlendMode::Screen,
            scale: 100.0,
            rotation: 0.0,
        }
    }
}

/// Effect settings, read-only for the duration of one render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Displacement algorithm name; unknown names render as `classic`
    pub algorithm: String,

    /// Global multiplier for all offsets, in percent
    pub intensity: f64,

    /// Angle in degrees (radial, angular)
    pub angle: f64,

    /// Wave frequency
    pub frequency: f64,

    /// Wave amplitude in px
    pub amplitude: f64,

    /// Noise sampling scale in percent
    pub noise_scale: f64,

    /// Noise permutation seed
    pub noise_seed: i64,

    /// Lens distortion strength in percent (barrel, pincushion)
    pub distortion: f64,

    pub red: ChannelParams,
    pub green: ChannelParams,
    pub blue: ChannelParams,

    /// Named palette the channel colors were last taken from
    pub color_profile: ColorProfile,

    /// Tint for the red channel, `#rrggbb`
    pub channel1_color: String,

    /// Tint for the green channel, `#rrggbb`
    pub channel2_color: String,

    /// Tint for the blue channel, `#rrggbb`
    pub channel3_color: String,

    /// Blend last written to all channels at once, if any
    pub all_channels_blend: Option<BlendMode>,

    pub bg_color: String,
    pub bg_transparent: bool,

    /// Blend mode of the whole composition against its container
    pub global_blend: BlendMode,

    /// Stacking order as channel selectors, e.g. `"rgb"` or `"rrg"`
    pub layer_order: String,

    /// Include an untransformed reference layer below the channels
    pub show_base: bool,

    /// Base layer opacity in percent
    pub base_opacity: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            algorithm: "classic".to_string(),
            intensity: 100.0,
            angle: 0.0,
            frequency: 5.0,
            amplitude: 10.0,
            noise_scale: 50.0,
            noise_seed: 42,
            distortion: 30.0,

            red: ChannelParams::with_offset(5.0, -3.0),
            green: ChannelParams::with_offset(0.0, 0.0),
            blue: ChannelParams::with_offset(-5.0, 3.0),

            color_profile: ColorProfile::Rgb,
            channel1_color: "#ff0000".to_string(),
            channel2_color: "#00ff00".to_string(),
            channel3_color: "#0000ff".to_string(),
            all_channels_blend: None,

            bg_color: "#0a0a0f".to_string(),
            bg_transparent: false,
            global_blend: BlendMode::Normal,
            layer_order: "rgb".to_string(),
            show_base: true,
            base_opacity: 50.0,
        }
    }
}

impl Settings {
    /// Parameters for the given channel
    pub fn channel(&self, channel: Channel) -> &ChannelParams {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
        }
    }

    pub fn channel_mut(&mut self, channel: Channel) -> &mut ChannelParams {
        match channel {
            Channel::Red => &mut self.red,
            Channel::Green => &mut self.green,
            Channel::Blue => &mut self.blue,
        }
    }

    /// Configured tint color for the given channel
    pub fn channel_color(&self, channel: Channel) -> &str {
        match channel {
            Channel::Red => &self.channel1_color,
            Channel::Green => &self.channel2_color,
            Channel::Blue => &self.channel3_color,
        }
    }

    /// Set one channel's tint, detaching from any named profile
    pub fn set_channel_color<S: Into<String>>(&mut self, channel: Channel, color: S) {
        let color = color.into();
        match channel {
            Channel::Red => self.channel1_color = color,
            Channel::Green => self.channel2_color = color,
            Channel::Blue => self.channel3_color = color,
        }
        self.color_profile = ColorProfile::Custom;
    }

    /// Write one blend mode into every channel
    ///
    /// The selection is remembered, but it is not a lock: later preset or
    /// per-channel edits still take effect. `None` leaves the channel
    /// blends as they are.
    pub fn set_all_channels_blend(&mut self, blend: Option<BlendMode>) {
        self.all_channels_blend = blend;
        if let Some(blend) = blend {
            for channel in Channel::ALL {
                self.channel_mut(channel).blend = blend;
            }
        }
    }

    /// Channels in stacking order; unrecognized selectors are skipped,
    /// duplicates are kept
    pub fn layer_channels(&self) -> impl Iterator<Item = Channel> + '_ {
        self.layer_order.chars().filter_map(Channel::from_selector)
    }

    fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("settings.channel1Color", &self.channel1_color),
            ("settings.channel2Color", &self.channel2_color),
            ("settings.channel3Color", &self.channel3_color),
            ("settings.bgColor", &self.bg_color),
        ] {
            if parse_hex_rgb(value).is_none() {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: value.clone()
                }.into());
            }
        }

        if self.layer_channels().next().is_none() && !self.show_base {
            return Err(ConfigError::InvalidValue {
                key: "settings.layerOrder".to_string(),
                value: self.layer_order.clone()
            }.into());
        }

        Ok(())
    }
}

/// Styling for generated text content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextStyle {
    /// Font size in px
    pub font_size: f64,

    pub font_weight: u32,

    /// Fill color, `#rrggbb`
    pub text_color: String,

    pub font_family: String,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 72.0,
            font_weight: 700,
            text_color: "#ffffff".to_string(),
            font_family: "Inter, sans-serif".to_string(),
        }
    }
}

impl TextStyle {
    fn validate(&self) -> Result<()> {
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(ConfigError::InvalidValue {
                key: "text.fontSize".to_string(),
                value: self.font_size.to_string()
            }.into());
        }

        if parse_hex_rgb(&self.text_color).is_none() {
            return Err(ConfigError::InvalidValue {
                key: "text.textColor".to_string(),
                value: self.text_color.clone()
            }.into());
        }

        Ok(())
    }
}

/// Render target and export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Render target width in px
    pub width: f64,

    /// Render target height in px
    pub height: f64,

    /// Supersampling factor handed to the external rasterizer
    pub supersample: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let bounds = Bounds::default();
        Self {
            width: bounds.width(),
            height: bounds.height(),
            supersample: 2,
        }
    }
}

impl RenderConfig {
    /// Bounds for rendering; degenerate sizes fall back to the default
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }

    fn validate(&self) -> Result<()> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::InvalidValue {
                key: "render.size".to_string(),
                value: format!("{}x{}", self.width, self.height)
            }.into());
        }

        if self.supersample == 0 {
            return Err(ConfigError::InvalidValue {
                key: "render.supersample".to_string(),
                value: self.supersample.to_string()
            }.into());
        }

        Ok(())
    }
}

/// Parse `#rrggbb` (leading `#` optional, case-insensitive)
pub fn parse_hex_rgb(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let component = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some([component(0)?, component(2)?, component(4)?])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test_config.toml");

        let mut original_config = Config::default();
        original_config.settings.algorithm = "wave".to_string();
        original_config.settings.layer_order = "bgr".to_string();
        original_config.settings.all_channels_blend = Some(BlendMode::ColorDodge);

        original_config.save_to_file(&file_path).unwrap();
        let loaded_config = Config::from_file(&file_path).unwrap();

        assert_eq!(original_config.settings, loaded_config.settings);
        assert_eq!(original_config.text, loaded_config.text);
        assert_eq!(original_config.render, loaded_config.render);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r##"
            [settings]
            algorithm = "noise"
            noiseSeed = 7
            layerOrder = "rrg"

            [settings.red]
            x = 12
            blend = "lighten"
            "##,
        )
        .unwrap();

        assert_eq!(config.settings.algorithm, "noise");
        assert_eq!(config.settings.noise_seed, 7);
        assert_eq!(config.settings.red.x, 12.0);
        assert_eq!(config.settings.red.y, 0.0);
        assert_eq!(config.settings.red.blend, BlendMode::Lighten);
        assert_eq!(config.settings.blue, Settings::default().blue);
        assert_eq!(config.render.supersample, 2);
    }

    #[test]
    fn test_missing_file() {
        let result = Config::from_file("/definitely/not/here.toml");
        assert!(result.is_err());
        assert!(result.unwrap_err().is_recoverable());
    }

    #[test]
    fn test_invalid_color() {
        let mut config = Config::default();
        config.settings.channel2_color = "#12345".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_render_size() {
        let mut config = Config::default();
        config.render.width = 0.0;
        assert!(config.validate().is_err());
        // Rendering still works with the fallback
        assert_eq!(config.render.bounds(), Bounds::default());
    }

    #[test]
    fn test_layer_channels_skip_unknown_and_keep_duplicates() {
        let settings = Settings {
            layer_order: "rxg-r".to_string(),
            ..Settings::default()
        };
        let channels: Vec<_> = settings.layer_channels().collect();
        assert_eq!(channels, vec![Channel::Red, Channel::Green, Channel::Red]);
    }

    #[test]
    fn test_channel_color_marks_custom_profile() {
        let mut settings = Settings::default();
        settings.set_channel_color(Channel::Green, "#123456");
        assert_eq!(settings.channel_color(Channel::Green), "#123456");
        assert_eq!(settings.color_profile, ColorProfile::Custom);
    }

    #[test]
    fn test_all_channels_blend() {
        let mut settings = Settings::default();
        settings.set_all_channels_blend(Some(BlendMode::Difference));
        for channel in Channel::ALL {
            assert_eq!(settings.channel(channel).blend, BlendMode::Difference);
        }

        // a later per-channel edit wins over the shared selection
        settings.red.blend = BlendMode::Multiply;
        assert_eq!(settings.all_channels_blend, Some(BlendMode::Difference));
        assert_eq!(settings.channel(Channel::Red).blend, BlendMode::Multiply);

        settings.set_all_channels_blend(None);
        assert_eq!(settings.channel(Channel::Green).blend, BlendMode::Difference);
    }

    #[test]
    fn test_parse_hex_rgb() {
        assert_eq!(parse_hex_rgb("#FF8000"), Some([255, 128, 0]));
        assert_eq!(parse_hex_rgb("00ff00"), Some([0, 255, 0]));
        assert_eq!(parse_hex_rgb("#fff"), None);
        assert_eq!(parse_hex_rgb("#gg0000"), None);
        assert_eq!(parse_hex_rgb("#ff00000"), None);
    }

    #[test]
    fn test_blend_mode_names() {
        assert_eq!(BlendMode::from_name("soft-light"), Some(BlendMode::SoftLight));
        assert_eq!(BlendMode::from_name("sparkle"), None);
        assert_eq!(BlendMode::HardLight.to_string(), "hard-light");
    }
}
