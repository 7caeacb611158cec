/// Assert two floats agree to within a relative tolerance.
pub fn assert_close(actual: f64, expected: f64, relative: f64) {
    let scale = actual.abs().max(expected.abs()).max(1.0);
    assert!(
        (actual - expected).abs() <= relative * scale,
        "expected {} ± {} (relative), got {}",
        expected,
        relative,
        actual
    );
}
