pub fn format_tick(value: f32) -> String {
    if value.fract().abs() < 1e-4 {
        format!("{}", value.round() as i64)
    } else {
        format!("{value:.1}")
    }
}
