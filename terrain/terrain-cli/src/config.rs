//! Resolve generation parameters from a TOML file and command-line flags.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use terrain_fractal::GenerationParams;
use tracing::debug;

/// Flag values that override the configuration file when present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub side_length: Option<f64>,
    pub magnitude: Option<f64>,
    pub damping: Option<f64>,
    pub iterations: Option<u32>,
    pub seed: Option<u64>,
    pub max_vertices: Option<usize>,
}

/// Parse a TOML parameter table. Missing keys keep their defaults.
pub fn parse(text: &str) -> Result<GenerationParams> {
    toml::from_str(text).context("Invalid terrain configuration")
}

/// Load `path` if given, apply `overrides`, and validate the result.
pub fn resolve(path: Option<&Path>, overrides: &Overrides) -> Result<GenerationParams> {
    let mut params = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            parse(&text).with_context(|| format!("In {}", path.display()))?
        }
        None => GenerationParams::default(),
    };

    apply(&mut params, overrides);
    params
        .validate()
        .context("Invalid generation parameters")?;

    debug!("Resolved generation parameters: {params:?}");
    Ok(params)
}

fn apply(params: &mut GenerationParams, overrides: &Overrides) {
    if let Some(side_length) = overrides.side_length {
        params.side_length = side_length;
    }
    if let Some(magnitude) = overrides.magnitude {
        params.initial_magnitude = magnitude;
    }
    if let Some(damping) = overrides.damping {
        params.damping = damping;
    }
    if let Some(iterations) = overrides.iterations {
        params.iterations = iterations;
    }
    if overrides.seed.is_some() {
        params.seed = overrides.seed;
    }
    if let Some(max_vertices) = overrides.max_vertices {
        params.max_vertices = max_vertices;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use terrain_fractal::GenerationState;

    #[test]
    fn test_parse_partial_table() {
        let params = parse("damping = 0.4\nseed = 11\n").unwrap();
        assert_eq!(params.damping, 0.4);
        assert_eq!(params.seed, Some(11));
        // Untouched keys keep defaults
        assert_eq!(params.initial_magnitude, 2.5);
        assert_eq!(params.iterations, 5);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse("damping = \"high\"").is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_key() {
        let err = parse("initial_magnitude = 9.0\ndampng = 0.1\n").unwrap_err();
        assert!(format!("{err:#}").contains("dampng"));
    }

    #[test]
    fn test_parse_accepts_flag_spelling_of_magnitude() {
        let params = parse("magnitude = 9.0\n").unwrap();
        assert_eq!(params.initial_magnitude, 9.0);
    }

    #[test]
    fn test_state_deserialization_is_validated() {
        let state: GenerationState = toml::from_str("magnitude = 1.5\ndamping = 0.5\n").unwrap();
        assert_eq!(state.magnitude(), 1.5);
        assert!(toml::from_str::<GenerationState>("magnitude = 1.0\ndamping = 1.5\n").is_err());
        assert!(toml::from_str::<GenerationState>("magnitude = -1.0\ndamping = 0.5\n").is_err());
    }

    #[test]
    fn test_overrides_win() {
        let mut params = parse("iterations = 2\nside_length = 3.5\n").unwrap();
        apply(
            &mut params,
            &Overrides {
                iterations: Some(7),
                seed: Some(5),
                ..Overrides::default()
            },
        );
        assert_eq!(params.iterations, 7);
        assert_eq!(params.side_length, 3.5);
        assert_eq!(params.seed, Some(5));
    }

    #[test]
    fn test_resolve_validates() {
        let overrides = Overrides {
            damping: Some(1.5),
            ..Overrides::default()
        };
        let err = resolve(None, &overrides).unwrap_err();
        assert!(format!("{err:#}").contains("damping"));
    }

    #[test]
    fn test_resolve_missing_file() {
        let err = resolve(Some(Path::new("/nonexistent/terrain.toml")), &Overrides::default())
            .unwrap_err();
        assert!(format!("{err}").contains("Failed to read config"));
    }
}
