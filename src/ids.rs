//! Client-side id generation
//!
//! Rows are created in the UI before the backend sees them, so ids are
//! minted here: the current time in base 36 followed by random digits.

/// Current time in epoch millis
pub fn now_millis() -> i64 {
    js_sys::Date::now() as i64
}

pub fn generate_id() -> String {
    let random = (js_sys::Math::random() * 36f64.powi(5)) as u64;
    format!("{}{:0>5}", to_base36(now_millis().max(0) as u64), to_base36(random))
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_700_000_000_000), "loyw3v28");
    }
}
