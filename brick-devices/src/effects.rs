//! Efeitos de luz em segundo plano e bipes assíncronos
//!
//! Um [`EffectHandle`] possui no máximo um efeito rodando. Iniciar outro
//! efeito sinaliza e aguarda o anterior antes de criar a nova thread, e a
//! luz termina sempre apagada.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

use crate::color::Color;
use crate::config;
use crate::error::{DeviceError, DeviceResult};
use crate::traits::{Light, Speaker};

/// Fatia máxima de sono, para o efeito reagir rápido ao `stop`
const STOP_CHECK_SLICE: Duration = Duration::from_millis(10);

/// Luz compartilhada entre o programa e a thread do efeito
pub type SharedLight = Arc<Mutex<dyn Light>>;

/// Padrão de luz repetido até ser parado
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Aceso `on_ms`, apagado `off_ms`
    Flash { color: Color, on_ms: u64, off_ms: u64 },
    /// Duas batidas curtas: aceso, `short_ms`, aceso, `long_ms`
    Pulse {
        color: Color,
        on_ms: u64,
        short_ms: u64,
        long_ms: u64,
    },
}

impl Effect {
    /// Pisca com tempos de `BRICK_FLASH_*`
    pub fn flash(color: Color) -> Self {
        Effect::Flash {
            color,
            on_ms: config::flash_on_ms(),
            off_ms: config::flash_off_ms(),
        }
    }

    /// Pulso com tempos de `BRICK_PULSE_*`
    pub fn pulse(color: Color) -> Self {
        Effect::Pulse {
            color,
            on_ms: config::pulse_on_ms(),
            short_ms: config::pulse_short_ms(),
            long_ms: config::pulse_long_ms(),
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Effect::Flash { color, .. } | Effect::Pulse { color, .. } => *color,
        }
    }

    /// Um ciclo do efeito como passos `(cor, duração)`
    pub fn steps(&self) -> Vec<(Option<Color>, u64)> {
        match *self {
            Effect::Flash { color, on_ms, off_ms } => vec![(Some(color), on_ms), (None, off_ms)],
            Effect::Pulse {
                color,
                on_ms,
                short_ms,
                long_ms,
            } => vec![
                (Some(color), on_ms),
                (None, short_ms),
                (Some(color), on_ms),
                (None, long_ms),
            ],
        }
    }
}

struct RunningEffect {
    effect: Effect,
    stop: Arc<AtomicBool>,
    thread: JoinHandle<DeviceResult<()>>,
}

/// Dono do efeito de luz em execução
#[derive(Default)]
pub struct EffectHandle {
    running: Option<RunningEffect>,
}

impl EffectHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Efeito em execução, se houver
    pub fn current(&self) -> Option<Effect> {
        self.running.as_ref().map(|r| r.effect)
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Para o efeito atual e inicia `effect` em `light`
    pub fn start(&mut self, light: SharedLight, effect: Effect) -> DeviceResult<()> {
        self.stop()?;

        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        debug!(?effect, "starting light effect");
        let thread = thread::spawn(move || run_effect(&light, effect, &flag));

        self.running = Some(RunningEffect {
            effect,
            stop,
            thread,
        });
        Ok(())
    }

    /// Sinaliza e aguarda o efeito; não faz nada se não houver efeito
    pub fn stop(&mut self) -> DeviceResult<()> {
        let Some(running) = self.running.take() else {
            return Ok(());
        };
        running.stop.store(true, Ordering::SeqCst);
        match running.thread.join() {
            Ok(result) => {
                debug!(effect = ?running.effect, "light effect stopped");
                result
            }
            Err(_) => Err(DeviceError::EffectFailed(format!(
                "{:?} thread panicked",
                running.effect
            ))),
        }
    }
}

impl Drop for EffectHandle {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            warn!(%err, "light effect ended with error");
        }
    }
}

fn set_light(light: &SharedLight, color: Option<Color>) -> DeviceResult<()> {
    let mut guard = light.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.set(color)
}

/// Dorme `ms` em fatias; `false` se o efeito foi parado no meio
fn sleep_unless_stopped(ms: u64, stop: &AtomicBool) -> bool {
    let mut remaining = Duration::from_millis(ms);
    while !remaining.is_zero() {
        if stop.load(Ordering::SeqCst) {
            return false;
        }
        let slice = remaining.min(STOP_CHECK_SLICE);
        thread::sleep(slice);
        remaining -= slice;
    }
    !stop.load(Ordering::SeqCst)
}

/// Roda o ciclo até `stop`; a luz é apagada mesmo se o ciclo falhar.
///
/// O primeiro erro é o retornado.
fn run_effect(light: &SharedLight, effect: Effect, stop: &AtomicBool) -> DeviceResult<()> {
    let cycled = run_cycles(light, &effect.steps(), stop);
    let cleared = set_light(light, None);
    if let Err(err) = &cycled {
        warn!(%err, ?effect, "light effect interrupted");
    }
    cycled.and(cleared)
}

fn run_cycles(
    light: &SharedLight,
    steps: &[(Option<Color>, u64)],
    stop: &AtomicBool,
) -> DeviceResult<()> {
    while !stop.load(Ordering::SeqCst) {
        for &(color, ms) in steps {
            set_light(light, color)?;
            if !sleep_unless_stopped(ms, stop) {
                return Ok(());
            }
        }
    }
    Ok(())
}

/// Toca um bipe numa thread própria
pub fn beep_async<S>(
    speaker: Arc<Mutex<S>>,
    frequency: u32,
    duration_ms: u64,
    volume: u8,
) -> JoinHandle<DeviceResult<()>>
where
    S: Speaker + ?Sized + 'static,
{
    thread::spawn(move || {
        let mut guard = speaker.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.beep(frequency, duration_ms, volume)
    })
}

/// Toca `count` bipes numa thread própria
pub fn beeps_async<S>(speaker: Arc<Mutex<S>>, count: u32) -> JoinHandle<DeviceResult<()>>
where
    S: Speaker + ?Sized + 'static,
{
    thread::spawn(move || {
        let mut guard = speaker.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.beeps(count)
    })
}
