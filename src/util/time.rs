/// Get the current time in seconds since the UNIX epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn current_time_secs() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

/// Get the current time in seconds since page load
#[cfg(target_arch = "wasm32")]
pub fn current_time_secs() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|perf| perf.now() / 1000.0)
        .unwrap_or(0.0)
}

/// Seed derived from the clock, for runs without a fixed seed
pub fn clock_seed() -> u64 {
    let secs = current_time_secs();
    secs.to_bits() ^ ((secs.fract() * 1.0e9) as u64).rotate_left(32)
}

/// Seconds elapsed since `start`, never negative
pub fn elapsed_since(start: f64, now: f64) -> f64 {
    (now - start).max(0.0)
}
