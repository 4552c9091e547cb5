//! Share tracking codes.

use chrono::{DateTime, Utc};
use rand::Rng;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RANDOM_LEN: usize = 6;
const USER_PREFIX_LEN: usize = 8;

/// Render `value` in lowercase base 36.
pub fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

fn random_suffix<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..RANDOM_LEN)
        .map(|_| char::from(BASE36[rng.gen_range(0..BASE36.len())]))
        .collect()
}

/// Build a share code: `usr_{uid prefix}_{time}{random}` for signed-in
/// sharers, `anon_{time}{random}` otherwise.
pub fn generate_share_code_with<R: Rng + ?Sized>(
    user_id: Option<&str>,
    now: DateTime<Utc>,
    rng: &mut R,
) -> String {
    let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    let stamp = format!("{}{}", to_base36(millis), random_suffix(rng));
    match user_id {
        Some(uid) => {
            let prefix: String = uid.chars().take(USER_PREFIX_LEN).collect();
            format!("usr_{prefix}_{stamp}")
        }
        None => format!("anon_{stamp}"),
    }
}

/// [`generate_share_code_with`] using the thread RNG.
pub fn generate_share_code(user_id: Option<&str>, now: DateTime<Utc>) -> String {
    generate_share_code_with(user_id, now, &mut rand::thread_rng())
}
