use std::{fmt, str::FromStr};

use crate::error::ConfigError;

/// Compositing algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderingMode {
    /// Direct volume rendering, back to front
    #[default]
    Dvr,
    FirstHit,
    /// Maximum intensity projection
    Mip,
    Average,
}

impl RenderingMode {
    pub const ALL: [RenderingMode; 4] = [
        RenderingMode::Dvr,
        RenderingMode::FirstHit,
        RenderingMode::Mip,
        RenderingMode::Average,
    ];
}

impl fmt::Display for RenderingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RenderingMode::Dvr => "Direct Volume Rendering",
            RenderingMode::FirstHit => "First-hit",
            RenderingMode::Mip => "Maximum Intensity Projection",
            RenderingMode::Average => "Average Projection",
        };
        f.write_str(name)
    }
}

impl FromStr for RenderingMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dvr" => Ok(RenderingMode::Dvr),
            "first-hit" => Ok(RenderingMode::FirstHit),
            "mip" => Ok(RenderingMode::Mip),
            "average" => Ok(RenderingMode::Average),
            _ => Err(ConfigError::UnknownRenderingMode(s.to_string())),
        }
    }
}

/// Mode codes as stored by presets, in declaration order
impl TryFrom<u8> for RenderingMode {
    type Error = ConfigError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        RenderingMode::ALL
            .get(code as usize)
            .copied()
            .ok_or_else(|| ConfigError::UnknownRenderingMode(code.to_string()))
    }
}

/// Settings of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfiguration {
    pub rendering_mode: RenderingMode,
    pub use_trilinear_interpolation: bool,
    /// Accepted, but has no effect on the image
    pub use_phong_shading: bool,
    /// Attenuate DVR opacity by gradient magnitude
    pub use_gradient_opacity: bool,
    /// Distance between samples, in voxels
    pub step_size: f32,
}

impl Default for RenderConfiguration {
    fn default() -> Self {
        Self {
            rendering_mode: RenderingMode::default(),
            use_trilinear_interpolation: false,
            use_phong_shading: false,
            use_gradient_opacity: false,
            step_size: 1.0,
        }
    }
}

impl RenderConfiguration {
    pub fn builder() -> RenderConfigurationBuilder {
        RenderConfigurationBuilder::default()
    }

    /// Step size must be positive and finite
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step_size.is_finite() && self.step_size > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidStepSize(self.step_size))
        }
    }
}

#[derive(Debug, Default)]
pub struct RenderConfigurationBuilder {
    config: RenderConfiguration,
}

impl RenderConfigurationBuilder {
    pub fn rendering_mode(mut self, mode: RenderingMode) -> Self {
        self.config.rendering_mode = mode;
        self
    }

    pub fn trilinear(mut self, enabled: bool) -> Self {
        self.config.use_trilinear_interpolation = enabled;
        self
    }

    pub fn phong_shading(mut self, enabled: bool) -> Self {
        self.config.use_phong_shading = enabled;
        self
    }

    pub fn gradient_opacity(mut self, enabled: bool) -> Self {
        self.config.use_gradient_opacity = enabled;
        self
    }

    pub fn step_size(mut self, step_size: f32) -> Self {
        self.config.step_size = step_size;
        self
    }

    pub fn build(self) -> Result<RenderConfiguration, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }

    /// Skip validation, the renderer still validates before every frame
    pub fn build_unchecked(self) -> RenderConfiguration {
        self.config
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn mode_names() {
        assert_eq!("MIP".parse::<RenderingMode>(), Ok(RenderingMode::Mip));
        assert_eq!("First-Hit".parse::<RenderingMode>(), Ok(RenderingMode::FirstHit));
        assert_eq!("dvr".parse::<RenderingMode>(), Ok(RenderingMode::Dvr));
        assert_eq!(
            "phong".parse::<RenderingMode>(),
            Err(ConfigError::UnknownRenderingMode("phong".into()))
        );
    }

    #[test]
    fn mode_codes() {
        assert_eq!(RenderingMode::try_from(0), Ok(RenderingMode::Dvr));
        assert_eq!(RenderingMode::try_from(3), Ok(RenderingMode::Average));
        assert_eq!(
            RenderingMode::try_from(4),
            Err(ConfigError::UnknownRenderingMode("4".into()))
        );
    }

    #[test]
    fn friendly_names() {
        assert_eq!(RenderingMode::Mip.to_string(), "Maximum Intensity Projection");
        assert_eq!(RenderingMode::FirstHit.to_string(), "First-hit");
    }

    #[test]
    fn builder_validates() {
        let config = RenderConfiguration::builder()
            .rendering_mode(RenderingMode::Average)
            .trilinear(true)
            .step_size(0.5)
            .build()
            .unwrap();
        assert_eq!(config.rendering_mode, RenderingMode::Average);
        assert!(config.use_trilinear_interpolation);

        for bad in [0.0, -1.0, f32::INFINITY] {
            let res = RenderConfiguration::builder().step_size(bad).build();
            assert_eq!(res, Err(ConfigError::InvalidStepSize(bad)));
        }

        let res = RenderConfiguration::builder().step_size(f32::NAN).build();
        assert!(matches!(res, Err(ConfigError::InvalidStepSize(_))));
    }

    #[test]
    fn unchecked_keeps_values() {
        let config = RenderConfiguration::builder().step_size(0.0).build_unchecked();
        assert_eq!(config.step_size, 0.0);
        assert!(config.validate().is_err());
    }
}
