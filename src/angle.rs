use std::f64::consts::PI;

pub fn to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

pub fn to_degrees(radians: f64) -> f64 {
    radians * 180.0 / PI
}

/// Wraps any whole-degree angle into `[0, 359]`.
pub fn normalize_degrees(degrees: i32) -> i32 {
    degrees.rem_euclid(360)
}

pub fn format_degrees(degrees: i32) -> String {
    format!("{}°", degrees)
}

pub fn format_radians(degrees: i32) -> String {
    format!("{:.2} рад", to_radians(degrees as f64))
}
