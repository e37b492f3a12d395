/// CDF of the logistic distribution in Elo's base-10 parametrization:
/// a unit increase in `z` multiplies the odds by ten.
pub fn base10_logistic_cdf(z: f64) -> f64 {
    (1. + 10f64.powf(-z)).recip()
}

/// Piecewise-linear interpolation through `knots`, which must be sorted by x.
/// Inputs outside the knots are clamped to the first or last y value.
pub fn interpolate_clamped(knots: &[(f64, f64)], x: f64) -> f64 {
    let (first, last) = match (knots.first(), knots.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return f64::NAN,
    };
    if x <= first.0 {
        return first.1;
    }
    if x >= last.0 {
        return last.1;
    }
    knots
        .windows(2)
        .find(|pair| x <= pair[1].0)
        .map(|pair| {
            let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
            y0 + (y1 - y0) * (x - x0) / (x1 - x0)
        })
        .unwrap_or(last.1)
}

pub fn round_to_places(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
