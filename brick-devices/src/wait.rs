//! Polling e cronômetro
//!
//! Todos os helpers `wait_until_*` leem o dispositivo através de closures
//! `FnMut() -> DeviceResult<T>`, de modo que funcionam com qualquer driver.

use std::time::Duration;

use tracing::{debug, trace};

use crate::compare::Comparison;
use crate::config;
use crate::error::{DeviceError, DeviceResult};
use crate::traits::{Clock, SystemClock};

// ═══════════════════════════════════════════════════════════════════════════════
// POLLER
// ═══════════════════════════════════════════════════════════════════════════════

/// Executor de esperas com intervalo fixo e prazo opcional
#[derive(Debug, Clone)]
pub struct Poller<C: Clock = SystemClock> {
    clock: C,
    interval: Duration,
    timeout: Option<Duration>,
}

impl Poller<SystemClock> {
    /// Poller sobre o relógio do sistema, intervalo de `BRICK_POLL_INTERVAL_MS`
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }
}

impl Default for Poller<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Poller<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            interval: *config::POLL_INTERVAL,
            timeout: None,
        }
    }

    /// Define o intervalo entre leituras
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Define o prazo total de cada espera
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn poll_interval(&self) -> Duration {
        self.interval
    }

    fn deadline(&self) -> Option<u64> {
        self.timeout
            .map(|t| self.clock.now_ms().saturating_add(t.as_millis() as u64))
    }

    fn poll<F>(&self, mut cond: F, deadline: Option<u64>) -> DeviceResult<()>
    where
        F: FnMut() -> DeviceResult<bool>,
    {
        loop {
            if cond()? {
                return Ok(());
            }
            if let (Some(deadline), Some(timeout)) = (deadline, self.timeout) {
                if self.clock.now_ms() >= deadline {
                    let ms = timeout.as_millis() as u64;
                    debug!(timeout_ms = ms, "wait condition timed out");
                    return Err(DeviceError::Timeout(ms));
                }
            }
            self.clock.sleep(self.interval);
        }
    }

    /// Espera até `cond` retornar `true`
    pub fn wait_until<F>(&self, cond: F) -> DeviceResult<()>
    where
        F: FnMut() -> DeviceResult<bool>,
    {
        self.poll(cond, self.deadline())
    }

    /// Espera enquanto `cond` retornar `true`
    pub fn wait_while<F>(&self, mut cond: F) -> DeviceResult<()>
    where
        F: FnMut() -> DeviceResult<bool>,
    {
        self.poll(|| cond().map(|held| !held), self.deadline())
    }

    /// Espera até `read() <OP> target`
    pub fn wait_until_compare<T, F>(&self, mut read: F, op: Comparison, target: T) -> DeviceResult<()>
    where
        T: PartialOrd,
        F: FnMut() -> DeviceResult<T>,
    {
        self.poll(|| Ok(op.evaluate(&read()?, &target)), self.deadline())
    }

    /// Espera um toque: pressionar e soltar em até `window_ms`.
    ///
    /// Se o botão ficar pressionado por mais tempo, a espera recomeça.
    /// O prazo do poller vale para o toque inteiro.
    pub fn wait_until_bumped<F>(&self, mut pressed: F, window_ms: u64) -> DeviceResult<()>
    where
        F: FnMut() -> DeviceResult<bool>,
    {
        let deadline = self.deadline();
        loop {
            self.poll(&mut pressed, deadline)?;
            let pressed_at = self.clock.now_ms();
            self.poll(|| pressed().map(|p| !p), deadline)?;
            let held = self.clock.now_ms().saturating_sub(pressed_at);
            if held <= window_ms {
                return Ok(());
            }
            trace!(held_ms = held, window_ms, "press held too long, not a bump");
        }
    }

    /// [`Poller::wait_until_bumped`] com a janela de `BRICK_BUMP_WINDOW_MS`
    pub fn wait_until_bumped_default<F>(&self, pressed: F) -> DeviceResult<()>
    where
        F: FnMut() -> DeviceResult<bool>,
    {
        self.wait_until_bumped(pressed, *config::BUMP_WINDOW_MS)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// STOPWATCH
// ═══════════════════════════════════════════════════════════════════════════════

/// Cronômetro pausável; começa rodando
#[derive(Debug, Clone)]
pub struct StopWatch<C: Clock = SystemClock> {
    clock: C,
    accumulated: u64,
    running_since: Option<u64>,
}

impl StopWatch<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }
}

impl Default for StopWatch<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> StopWatch<C> {
    pub fn with_clock(clock: C) -> Self {
        let now = clock.now_ms();
        Self {
            clock,
            accumulated: 0,
            running_since: Some(now),
        }
    }

    /// Tempo acumulado em ms
    pub fn elapsed_ms(&self) -> u64 {
        let running = self
            .running_since
            .map(|since| self.clock.now_ms().saturating_sub(since))
            .unwrap_or(0);
        self.accumulated + running
    }

    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    pub fn pause(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.accumulated += self.clock.now_ms().saturating_sub(since);
        }
    }

    pub fn resume(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(self.clock.now_ms());
        }
    }

    /// Zera o tempo sem mudar o estado (rodando/pausado)
    pub fn reset(&mut self) {
        self.accumulated = 0;
        if self.running_since.is_some() {
            self.running_since = Some(self.clock.now_ms());
        }
    }

    /// Retoma e bloqueia até o cronômetro marcar `ms`
    pub fn wait_until_time_passes(&mut self, ms: u64) {
        self.resume();
        let interval = *config::POLL_INTERVAL;
        while self.elapsed_ms() < ms {
            self.clock.sleep(interval);
        }
    }
}
