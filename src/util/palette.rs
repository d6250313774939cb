//! Sequential color palette used to tell trajectories apart.

/// Viridis key colors, low to high.
const VIRIDIS: [&str; 10] = [
    "#440154", "#482878", "#3E4A89", "#31688E", "#26828E", "#1F9E89", "#35B779", "#6DCD59",
    "#B4DE2C", "#FDE725",
];

fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some([r, g, b])
}

/// Viridis color at position `t` in `[0, 1]`, clamped.
pub fn viridis(t: f64) -> [u8; 3] {
    let stops: Vec<[u8; 3]> = VIRIDIS.iter().filter_map(|h| parse_hex_color(h)).collect();
    let n = stops.len();

    let t = if t.is_nan() { 0. } else { t.clamp(0., 1.) };
    let pos = t * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = pos - lo as f64;

    let mix = |a: u8, b: u8| (a as f64 * (1. - frac) + b as f64 * frac).round() as u8;
    [
        mix(stops[lo][0], stops[hi][0]),
        mix(stops[lo][1], stops[hi][1]),
        mix(stops[lo][2], stops[hi][2]),
    ]
}

/// `n` colors evenly spaced over the palette, first and last included.
pub fn spaced(n: usize) -> Vec<[u8; 3]> {
    match n {
        0 => vec![],
        1 => vec![viridis(0.)],
        _ => (0..n).map(|i| viridis(i as f64 / (n - 1) as f64)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing() {
        assert_eq!(parse_hex_color("#440154"), Some([68, 1, 84]));
        assert_eq!(parse_hex_color("FDE725"), Some([253, 231, 37]));
        assert_eq!(parse_hex_color("#FFF"), None);
        assert_eq!(parse_hex_color("GGGGGG"), None);
    }

    #[test]
    fn endpoints() {
        assert_eq!(viridis(0.), [68, 1, 84]);
        assert_eq!(viridis(1.), [253, 231, 37]);
        assert_eq!(viridis(-3.), viridis(0.));
        assert_eq!(viridis(7.), viridis(1.));
    }

    #[test]
    fn spaced_colors_are_distinct() {
        let colors = spaced(10);
        assert_eq!(colors.len(), 10);
        assert_eq!(colors[0], [68, 1, 84]);
        assert_eq!(colors[9], [253, 231, 37]);

        for w in colors.windows(2) {
            assert_ne!(w[0], w[1]);
        }
        assert_eq!(spaced(1), vec![[68, 1, 84]]);
        assert!(spaced(0).is_empty());
    }
}
