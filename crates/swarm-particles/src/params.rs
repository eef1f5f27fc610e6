//! Simulation parameters (parsed from TOML) and the pool rebuild key

use crate::map::JuliaPreset;
use serde::{Deserialize, Serialize};
use std::path::Path;
use swarm_core::{Result, SwarmError};

/// Largest population accepted at ingestion
pub const MAX_PARTICLES: usize = 1_000_000;

/// Keys recognised in a parameter table
const KNOWN_KEYS: &[&str] = &[
    "count",
    "point_size",
    "speed",
    "scale",
    "attraction",
    "spawn_radius",
    "c_re",
    "c_im",
    "paused",
    "reset_token",
];

/// Per-frame configuration snapshot. The engine only ever reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimParams {
    /// Population size
    pub count: usize,
    /// Uniform display scale written to every transform
    pub point_size: f32,
    /// Integration speed multiplier
    pub speed: f32,
    /// Plane-to-world scale factor
    pub scale: f32,
    /// Restoring force coefficient toward the origin
    pub attraction: f32,
    /// Half-extent of the spawn cube
    pub spawn_radius: f32,
    /// Real part of the map constant
    pub c_re: f32,
    /// Imaginary part of the map constant
    pub c_im: f32,
    pub paused: bool,
    /// Opaque counter; any change rebuilds the pool
    pub reset_token: u64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            count: 2000,
            point_size: 0.15,
            speed: 1.0,
            scale: 24.0,
            attraction: 0.5,
            spawn_radius: 10.0,
            c_re: -0.7,
            c_im: 0.27,
            paused: false,
            reset_token: 0,
        }
    }
}

/// The parameters whose change means "restart the experiment"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolKey {
    pub count: usize,
    spawn_radius_bits: u32,
    pub reset_token: u64,
}

impl PoolKey {
    pub fn spawn_radius(&self) -> f32 {
        f32::from_bits(self.spawn_radius_bits)
    }
}

impl SimParams {
    /// Parse parameters from a TOML table, starting from defaults.
    /// The result is validated before it is returned.
    pub fn from_toml(table: &toml::value::Table) -> Result<Self> {
        let mut params = Self::default();

        for key in table.keys() {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                tracing::warn!(key = key.as_str(), "ignoring unknown simulation parameter");
            }
        }

        if let Some(v) = table.get("count") {
            params.count = toml_count(v)?;
        }
        if let Some(v) = table.get("point_size") {
            params.point_size = toml_f32("point_size", v)?;
        }
        if let Some(v) = table.get("speed") {
            params.speed = toml_f32("speed", v)?;
        }
        if let Some(v) = table.get("scale") {
            params.scale = toml_f32("scale", v)?;
        }
        if let Some(v) = table.get("attraction") {
            params.attraction = toml_f32("attraction", v)?;
        }
        if let Some(v) = table.get("spawn_radius") {
            params.spawn_radius = toml_f32("spawn_radius", v)?;
        }
        // Map constants may arrive as text from UI widgets
        if let Some(v) = table.get("c_re") {
            params.c_re = toml_real("c_re", v)?;
        }
        if let Some(v) = table.get("c_im") {
            params.c_im = toml_real("c_im", v)?;
        }
        if let Some(v) = table.get("paused") {
            params.paused = v
                .as_bool()
                .ok_or_else(|| invalid_type("paused", "boolean", v))?;
        }
        if let Some(v) = table.get("reset_token") {
            let token = v
                .as_integer()
                .ok_or_else(|| invalid_type("reset_token", "integer", v))?;
            params.reset_token = u64::try_from(token).map_err(|_| SwarmError::ValueOutOfRange {
                field: "reset_token".into(),
                min: 0.0,
                max: i64::MAX as f64,
                value: token as f64,
            })?;
        }

        params.validate()?;
        Ok(params)
    }

    /// Parse a TOML document. Parameters may sit at top level or under `[simulation]`.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let doc: toml::value::Table = toml::from_str(source)?;
        match doc.get("simulation") {
            Some(toml::Value::Table(section)) => Self::from_toml(section),
            Some(other) => Err(invalid_type("simulation", "table", other)),
            None => Self::from_toml(&doc),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Reject values the stepper cannot handle without producing NaN or Infinity.
    pub fn validate(&self) -> Result<()> {
        if self.count > MAX_PARTICLES {
            return Err(SwarmError::ValueOutOfRange {
                field: "count".into(),
                min: 0.0,
                max: MAX_PARTICLES as f64,
                value: self.count as f64,
            });
        }

        let reals = [
            ("point_size", self.point_size),
            ("speed", self.speed),
            ("scale", self.scale),
            ("attraction", self.attraction),
            ("spawn_radius", self.spawn_radius),
            ("c_re", self.c_re),
            ("c_im", self.c_im),
        ];
        for (field, value) in reals {
            if !value.is_finite() {
                return Err(SwarmError::ValidationError(format!(
                    "{field} must be finite, got {value}"
                )));
            }
        }

        require_positive("point_size", self.point_size)?;
        require_positive("scale", self.scale)?;
        require_non_negative("speed", self.speed)?;
        require_non_negative("attraction", self.attraction)?;
        require_non_negative("spawn_radius", self.spawn_radius)?;
        Ok(())
    }

    pub fn pool_key(&self) -> PoolKey {
        PoolKey {
            count: self.count,
            spawn_radius_bits: self.spawn_radius.to_bits(),
            reset_token: self.reset_token,
        }
    }

    /// Swap in a preset's map constant. Never touches the pool key.
    pub fn with_preset(mut self, preset: &JuliaPreset) -> Self {
        self.c_re = preset.c_re;
        self.c_im = preset.c_im;
        self
    }

    /// Bump the reset token so the next sync rebuilds the pool
    pub fn request_reset(&mut self) {
        self.reset_token = self.reset_token.wrapping_add(1);
    }
}

/// Parse a textual real, as supplied by text inputs for the map constants
pub fn parse_real(field: &str, text: &str) -> Result<f32> {
    text.trim()
        .parse::<f32>()
        .map_err(|_| SwarmError::ParseError(format!("{field}: '{text}' is not a real number")))
}

fn require_positive(field: &str, value: f32) -> Result<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(SwarmError::ValidationError(format!(
            "{field} must be greater than 0, got {value}"
        )))
    }
}

fn require_non_negative(field: &str, value: f32) -> Result<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(SwarmError::ValueOutOfRange {
            field: field.into(),
            min: 0.0,
            max: f32::MAX as f64,
            value: value as f64,
        })
    }
}

// ── TOML helpers (handle integer/float coercion) ──

fn invalid_type(field: &str, expected: &str, v: &toml::Value) -> SwarmError {
    SwarmError::InvalidFieldType {
        field: field.into(),
        expected: expected.into(),
        got: v.type_str().into(),
    }
}

fn toml_f32(field: &str, v: &toml::Value) -> Result<f32> {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
        .ok_or_else(|| invalid_type(field, "number", v))
}

fn toml_real(field: &str, v: &toml::Value) -> Result<f32> {
    match v.as_str() {
        Some(text) => parse_real(field, text),
        None => toml_f32(field, v),
    }
}

fn toml_count(v: &toml::Value) -> Result<usize> {
    let n = v
        .as_integer()
        .ok_or_else(|| invalid_type("count", "integer", v))?;
    usize::try_from(n)
        .ok()
        .filter(|&n| n <= MAX_PARTICLES)
        .ok_or_else(|| SwarmError::ValueOutOfRange {
            field: "count".into(),
            min: 0.0,
            max: MAX_PARTICLES as f64,
            value: n as f64,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::find_preset;

    fn parse(source: &str) -> Result<SimParams> {
        SimParams::from_toml_str(source)
    }

    #[test]
    fn default_params_are_valid() {
        let params = SimParams::default();
        params.validate().unwrap();
        assert!(params.scale > 0.0);
        assert!(!params.paused);
    }

    #[test]
    fn parse_overrides_defaults() {
        let params = parse(
            r#"
count = 500
speed = 2
attraction = 0.25
c_re = -0.4
paused = true
reset_token = 3
"#,
        )
        .unwrap();
        assert_eq!(params.count, 500);
        assert!((params.speed - 2.0).abs() < 1e-6);
        assert!((params.attraction - 0.25).abs() < 1e-6);
        assert!((params.c_re + 0.4).abs() < 1e-6);
        assert!(params.paused);
        assert_eq!(params.reset_token, 3);
        assert_eq!(params.scale, SimParams::default().scale);
    }

    #[test]
    fn parse_simulation_section() {
        let params = parse("[simulation]\ncount = 12\n").unwrap();
        assert_eq!(params.count, 12);
    }

    #[test]
    fn map_constants_accept_strings() {
        let params = parse("c_re = \" -0.8 \"\nc_im = \"0.156\"").unwrap();
        assert!((params.c_re + 0.8).abs() < 1e-6);
        assert!((params.c_im - 0.156).abs() < 1e-6);
    }

    #[test]
    fn non_numeric_map_constant_is_parse_error() {
        let err = parse("c_im = \"abc\"").unwrap_err();
        assert!(matches!(err, SwarmError::ParseError(_)));
    }

    #[test]
    fn nan_string_is_rejected() {
        let err = parse("c_re = \"NaN\"").unwrap_err();
        assert!(matches!(err, SwarmError::ValidationError(_)));
    }

    #[test]
    fn zero_scale_is_rejected() {
        let err = parse("scale = 0").unwrap_err();
        assert!(err.to_string().contains("scale"));
    }

    #[test]
    fn negative_values_are_rejected() {
        assert!(matches!(
            parse("count = -1").unwrap_err(),
            SwarmError::ValueOutOfRange { .. }
        ));
        assert!(matches!(
            parse("attraction = -0.5").unwrap_err(),
            SwarmError::ValueOutOfRange { .. }
        ));
        assert!(parse("point_size = 0.0").is_err());
    }

    #[test]
    fn wrong_types_are_rejected() {
        let err = parse("speed = \"fast\"").unwrap_err();
        assert!(matches!(err, SwarmError::InvalidFieldType { .. }));
        assert!(parse("paused = 1").is_err());
        assert!(parse("count = 1.5").is_err());
    }

    #[test]
    fn oversized_count_is_rejected() {
        let source = format!("count = {}", MAX_PARTICLES + 1);
        assert!(parse(&source).is_err());
    }

    #[test]
    fn toml_round_trip() {
        let params = SimParams {
            count: 42,
            reset_token: 9,
            ..Default::default()
        };
        let text = params.to_toml_string().unwrap();
        assert_eq!(parse(&text).unwrap(), params);
    }

    #[test]
    fn pool_key_tracks_only_rebuild_fields() {
        let base = SimParams::default();
        let tuned = SimParams {
            speed: 5.0,
            attraction: 2.0,
            c_re: 0.1,
            c_im: -0.1,
            point_size: 1.0,
            paused: true,
            ..base.clone()
        };
        assert_eq!(base.pool_key(), tuned.pool_key());

        let mut reset = base.clone();
        reset.request_reset();
        assert_ne!(base.pool_key(), reset.pool_key());

        let wider = SimParams {
            spawn_radius: base.spawn_radius + 1e-3,
            ..base.clone()
        };
        assert_ne!(base.pool_key(), wider.pool_key());
        assert_eq!(wider.pool_key().spawn_radius(), wider.spawn_radius);
    }

    #[test]
    fn preset_only_changes_map_constant() {
        let base = SimParams::default();
        let rabbit = base.clone().with_preset(find_preset("rabbit").unwrap());
        assert_eq!(base.pool_key(), rabbit.pool_key());
        assert_eq!(rabbit.c_re, -0.123);
        assert_eq!(rabbit.c_im, 0.745);
    }

    #[test]
    fn load_from_file() {
        let dir = std::env::temp_dir().join(format!("swarm_params_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("params.toml");
        std::fs::write(&path, "count = 7\nscale = 12.0\n").unwrap();

        let params = SimParams::load(&path).unwrap();
        assert_eq!(params.count, 7);
        assert_eq!(params.scale, 12.0);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SimParams::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, SwarmError::IoError(_)));
    }
}
