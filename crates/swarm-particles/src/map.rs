//! The quadratic complex map `z ← z² + c` and a catalogue of well-known constants

/// One iteration of `z ← z² + c` with `z = x + iy` and `c = c_re + i·c_im`.
#[inline]
pub fn quadratic_map(x: f32, y: f32, c_re: f32, c_im: f32) -> (f32, f32) {
    (x * x - y * y + c_re, 2.0 * x * y + c_im)
}

/// A named map constant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JuliaPreset {
    pub name: &'static str,
    pub c_re: f32,
    pub c_im: f32,
}

pub const PRESETS: &[JuliaPreset] = &[
    JuliaPreset {
        name: "classic",
        c_re: -0.7,
        c_im: 0.27,
    },
    JuliaPreset {
        name: "rabbit",
        c_re: -0.123,
        c_im: 0.745,
    },
    JuliaPreset {
        name: "dendrite",
        c_re: 0.0,
        c_im: 1.0,
    },
    JuliaPreset {
        name: "san-marco",
        c_re: -0.75,
        c_im: 0.0,
    },
    JuliaPreset {
        name: "siegel",
        c_re: -0.391,
        c_im: -0.587,
    },
    JuliaPreset {
        name: "spiral",
        c_re: 0.285,
        c_im: 0.01,
    },
    JuliaPreset {
        name: "shimmer",
        c_re: -0.8,
        c_im: 0.156,
    },
    JuliaPreset {
        name: "dust",
        c_re: 0.45,
        c_im: 0.1428,
    },
];

/// Case-insensitive preset lookup
pub fn find_preset(name: &str) -> Option<&'static JuliaPreset> {
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_maps_to_c() {
        assert_eq!(quadratic_map(0.0, 0.0, -0.7, 0.27), (-0.7, 0.27));
    }

    #[test]
    fn squares_the_point() {
        // (1 + 2i)^2 = -3 + 4i
        let (x, y) = quadratic_map(1.0, 2.0, 0.0, 0.0);
        assert!((x + 3.0).abs() < 1e-6);
        assert!((y - 4.0).abs() < 1e-6);
    }

    #[test]
    fn preset_lookup_ignores_case() {
        let p = find_preset("Rabbit").unwrap();
        assert_eq!(p.c_re, -0.123);
        assert!(find_preset("nope").is_none());
    }

    #[test]
    fn preset_names_unique() {
        for (i, a) in PRESETS.iter().enumerate() {
            for b in &PRESETS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }
}
