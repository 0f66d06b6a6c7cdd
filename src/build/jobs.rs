//! Parallelism request resolution
//!
//! `-j` accepts a symbolic request (`all`, `half`, `except1`,
//! `halfexcept1`) or a number. It is turned into a worker count for the
//! native build tool; act itself never runs anything in parallel.

/// Fallback used when a request cannot be understood
pub const FALLBACK_REQUEST: &str = "halfexcept1";

/// Number of CPU cores available to the build
pub fn available_cores() -> usize {
    num_cpus::get().max(1)
}

/// Resolve a job request against `cores`. Always at least 1 and never more
/// than `cores`.
pub fn resolve(request: &str, cores: usize) -> usize {
    if cores <= 1 {
        return 1;
    }

    match request.trim() {
        "except1" => cores - 1,
        "half" => cores / 2,
        "halfexcept1" => {
            if cores <= 3 {
                1
            } else {
                cores / 2 - 1
            }
        }
        "all" => cores,
        other => match other.parse::<i64>() {
            Ok(requested) => requested.clamp(1, cores as i64) as usize,
            // integer too large for i64: clamped like any other number
            Err(_) if is_integer(other) => {
                if other.starts_with('-') {
                    1
                } else {
                    cores
                }
            }
            Err(_) => {
                tracing::warn!(
                    "Option '-j {}' is invalid. Using '-j {}'.",
                    other,
                    FALLBACK_REQUEST
                );
                resolve(FALLBACK_REQUEST, cores)
            }
        },
    }
}

fn is_integer(token: &str) -> bool {
    let digits = token.strip_prefix(['-', '+']).unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
