mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from the default location or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_path = Path::new("./hlspack.toml");
    if default_path.exists() {
        return load_config(default_path);
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    let packaging = &config.packaging;

    if packaging.renditions.is_empty() {
        anyhow::bail!("Packaging config must declare at least one rendition");
    }

    if packaging.segment_duration_secs == 0 {
        anyhow::bail!("Segment duration cannot be 0");
    }

    if packaging.audio_bitrate_kbps == 0 {
        anyhow::bail!("Audio bitrate cannot be 0");
    }

    for rendition in &packaging.renditions {
        if rendition.label.is_empty() {
            anyhow::bail!("Rendition labels cannot be empty");
        }
        if rendition.width == 0 || rendition.height == 0 {
            anyhow::bail!(
                "Rendition '{}' has a zero dimension ({}x{})",
                rendition.label,
                rendition.width,
                rendition.height
            );
        }
        if rendition.video_bitrate_kbps == 0 {
            anyhow::bail!("Rendition '{}' has a zero video bitrate", rendition.label);
        }
    }

    if !packaging.ladder().is_monotonic() {
        tracing::warn!(
            "rendition ladder bitrates are not strictly increasing; players may switch unpredictably"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.packaging.renditions.len(), 4);
        assert_eq!(config.packaging.segment_duration_secs, 5);
        assert_eq!(config.packaging.audio_bitrate_kbps, 128);
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let config: Config = toml::from_str(
            r#"
            [packaging]
            audio_bitrate_kbps = 192
            "#,
        )
        .unwrap();
        assert_eq!(config.packaging.audio_bitrate_kbps, 192);
        assert_eq!(config.packaging.segment_duration_secs, 5);
        assert_eq!(config.packaging.renditions.len(), 4);
    }

    #[test]
    fn parses_custom_ladder() {
        let config: Config = toml::from_str(
            r#"
            [[packaging.renditions]]
            label = "540p"
            width = 960
            height = 540
            video_bitrate_kbps = 2000
            "#,
        )
        .unwrap();
        assert_eq!(config.packaging.renditions.len(), 1);
        assert_eq!(config.packaging.renditions[0].label, "540p");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn rejects_empty_ladder() {
        let config: Config = toml::from_str(
            r#"
            [packaging]
            renditions = []
            "#,
        )
        .unwrap();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_zero_segment_duration() {
        let config: Config = toml::from_str(
            r#"
            [packaging]
            segment_duration_secs = 0
            "#,
        )
        .unwrap();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn parses_tool_overrides() {
        let config: Config = toml::from_str(
            r#"
            [tools]
            ffmpeg_path = "/opt/ffmpeg/bin/ffmpeg"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.tools.ffmpeg_path.as_deref(),
            Some(std::path::Path::new("/opt/ffmpeg/bin/ffmpeg"))
        );
    }
}
