//! Environment configuration loading from .env files
//!
//! Loads polling and light-effect timings from `.env` or environment
//! variables. Malformed values fall back to the defaults.

use std::env;
use std::time::Duration;

use once_cell::sync::Lazy;

// Automatically load .env when config module is accessed
static DOTENV_INIT: Lazy<()> = Lazy::new(|| {
    let _ = dotenv::dotenv();
});

/// Ensure environment is loaded
#[inline]
fn ensure_loaded() {
    let _ = &*DOTENV_INIT;
}

fn env_ms(key: &str, default: u64) -> u64 {
    ensure_loaded();
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Intervalo entre leituras nos helpers `wait_until_*`
/// Default: 10 ms
pub fn poll_interval_ms() -> u64 {
    env_ms("BRICK_POLL_INTERVAL_MS", 10)
}

/// Janela máxima entre pressionar e soltar para contar como toque
/// Default: 500 ms
pub fn bump_window_ms() -> u64 {
    env_ms("BRICK_BUMP_WINDOW_MS", 500)
}

/// Tempo aceso no efeito de pisca
/// Default: 500 ms
pub fn flash_on_ms() -> u64 {
    env_ms("BRICK_FLASH_ON_MS", 500)
}

/// Tempo apagado no efeito de pisca
/// Default: 500 ms
pub fn flash_off_ms() -> u64 {
    env_ms("BRICK_FLASH_OFF_MS", 500)
}

/// Tempo aceso em cada batida do pulso
/// Default: 100 ms
pub fn pulse_on_ms() -> u64 {
    env_ms("BRICK_PULSE_ON_MS", 100)
}

/// Pausa curta entre as duas batidas do pulso
/// Default: 200 ms
pub fn pulse_short_ms() -> u64 {
    env_ms("BRICK_PULSE_SHORT_MS", 200)
}

/// Pausa longa após a segunda batida do pulso
/// Default: 800 ms
pub fn pulse_long_ms() -> u64 {
    env_ms("BRICK_PULSE_LONG_MS", 800)
}

/// Cached values
pub static POLL_INTERVAL: Lazy<Duration> = Lazy::new(|| Duration::from_millis(poll_interval_ms()));
pub static BUMP_WINDOW_MS: Lazy<u64> = Lazy::new(bump_window_ms);
