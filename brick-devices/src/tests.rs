//! Integration tests for brick-devices

use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use brick_gears::{GearError, GearTrain};

use crate::*;

const EPS: f64 = 1e-9;

// ═══════════════════════════════════════════════════════════════════════════
// MOCKS
// ═══════════════════════════════════════════════════════════════════════════

/// Relógio simulado: `sleep` só avança o tempo
#[derive(Default)]
struct MockClock(AtomicU64);

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    fn sleep(&self, duration: Duration) {
        self.0.fetch_add(duration.as_millis() as u64, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Run(f64),
    RunTime(f64, u64),
    RunAngle(f64, f64),
    RunTarget(f64, f64),
    RunUntilStalled(f64, u8),
}

#[derive(Default)]
struct MockMotor {
    angle: f64,
    speeds: Vec<f64>,
    reads: Cell<usize>,
    commands: Vec<Command>,
}

impl MockMotor {
    fn with_speeds(speeds: Vec<f64>) -> Self {
        Self {
            speeds,
            ..Default::default()
        }
    }
}

impl MotorDriver for MockMotor {
    fn angle(&self) -> DeviceResult<f64> {
        Ok(self.angle)
    }

    fn speed(&self) -> DeviceResult<f64> {
        let i = self.reads.get();
        self.reads.set(i + 1);
        Ok(self
            .speeds
            .get(i)
            .or(self.speeds.last())
            .copied()
            .unwrap_or(0.0))
    }

    fn run(&mut self, speed: f64) -> DeviceResult<()> {
        self.commands.push(Command::Run(speed));
        Ok(())
    }

    fn run_time(&mut self, speed: f64, time_ms: u64, _stop: Stop, _wait: bool) -> DeviceResult<()> {
        self.commands.push(Command::RunTime(speed, time_ms));
        Ok(())
    }

    fn run_angle(&mut self, speed: f64, angle: f64, _stop: Stop, _wait: bool) -> DeviceResult<()> {
        self.commands.push(Command::RunAngle(speed, angle));
        Ok(())
    }

    fn run_target(&mut self, speed: f64, target: f64, _stop: Stop, _wait: bool) -> DeviceResult<()> {
        self.commands.push(Command::RunTarget(speed, target));
        Ok(())
    }

    fn run_until_stalled(&mut self, speed: f64, _stop: Stop, duty_limit: u8) -> DeviceResult<f64> {
        self.commands.push(Command::RunUntilStalled(speed, duty_limit));
        Ok(self.angle)
    }
}

#[derive(Default)]
struct MockLight {
    history: Vec<Option<Color>>,
    fail: bool,
    /// Número da chamada (1-based) que falha uma única vez
    fail_on_call: Option<usize>,
    calls: usize,
}

impl Light for MockLight {
    fn set(&mut self, color: Option<Color>) -> DeviceResult<()> {
        self.calls += 1;
        if self.fail {
            return Err(DeviceError::Driver("light unplugged".into()));
        }
        if self.fail_on_call == Some(self.calls) {
            return Err(DeviceError::Driver("glitch".into()));
        }
        self.history.push(color);
        Ok(())
    }
}

#[derive(Default)]
struct MockSpeaker {
    beeps: Vec<(u32, u64, u8)>,
}

impl Speaker for MockSpeaker {
    fn beep(&mut self, frequency: u32, duration_ms: u64, volume: u8) -> DeviceResult<()> {
        self.beeps.push((frequency, duration_ms, volume));
        Ok(())
    }
}

fn geared(motor: MockMotor) -> GearedMotor<MockMotor> {
    GearedMotor::new(motor)
        .with_gears(GearTrain::Flat(vec![12.0, 36.0]))
        .unwrap()
}

fn last_command(motor: &GearedMotor<MockMotor>) -> Command {
    motor.driver().commands.last().cloned().unwrap()
}

fn mock_poller() -> Poller<Arc<MockClock>> {
    Poller::with_clock(Arc::new(MockClock::default())).interval(Duration::from_millis(10))
}

// ═══════════════════════════════════════════════════════════════════════════
// GEARED MOTOR
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_output_run_divides_by_ratio() {
    let mut motor = geared(MockMotor::default());
    motor.output_run(100.0, None).unwrap();
    match last_command(&motor) {
        Command::Run(speed) => assert!((speed - 300.0).abs() < EPS),
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_output_percent_run_uses_rpm() {
    // 50% de 240 RPM = 720 °/s na saída → 2160 °/s no motor
    let mut motor = geared(MockMotor::default());
    motor.output_percent_run(50.0, None).unwrap();
    match last_command(&motor) {
        Command::Run(speed) => assert!((speed - 2160.0).abs() < EPS),
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_percent_run_ignores_gears() {
    let mut motor = geared(MockMotor::default()).with_rpm(160.0).unwrap();
    motor.percent_run(100.0).unwrap();
    assert_eq!(last_command(&motor), Command::Run(960.0));
}

#[test]
fn test_percent_run_clamps_to_range() {
    let mut motor = GearedMotor::new(MockMotor::default())
        .with_range(brick_speed::PercentRange::forward_only());
    motor.percent_run(-50.0).unwrap();
    assert_eq!(last_command(&motor), Command::Run(0.0));
}

#[test]
fn test_output_readings_multiply_by_ratio() {
    let motor = geared(MockMotor {
        angle: 360.0,
        speeds: vec![90.0],
        ..Default::default()
    });
    assert!((motor.output_angle(None).unwrap() - 120.0).abs() < EPS);
    assert!((motor.output_speed(None).unwrap() - 30.0).abs() < EPS);
    assert_eq!(motor.output_angle(Some(0)).unwrap(), 360.0);
}

#[test]
fn test_output_run_angle_and_target() {
    let mut motor = geared(MockMotor::default());
    motor
        .output_run_angle(100.0, 90.0, Stop::Hold, true, None)
        .unwrap();
    match last_command(&motor) {
        Command::RunAngle(speed, angle) => {
            assert!((speed - 300.0).abs() < EPS);
            assert!((angle - 270.0).abs() < EPS);
        }
        other => panic!("unexpected command {other:?}"),
    }

    motor
        .output_run_target(100.0, 30.0, Stop::Brake, false, None)
        .unwrap();
    match last_command(&motor) {
        Command::RunTarget(_, target) => assert!((target - 90.0).abs() < EPS),
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_output_run_time_and_stall() {
    let mut motor = geared(MockMotor {
        angle: 42.0,
        ..Default::default()
    });
    motor
        .output_run_time(10.0, 1500, Stop::Coast, true, None)
        .unwrap();
    match last_command(&motor) {
        Command::RunTime(speed, ms) => {
            assert!((speed - 30.0).abs() < EPS);
            assert_eq!(ms, 1500);
        }
        other => panic!("unexpected command {other:?}"),
    }

    let stalled_at = motor
        .output_percent_run_until_stalled(25.0, Stop::Hold, 60, None)
        .unwrap();
    assert_eq!(stalled_at, 42.0);
    match last_command(&motor) {
        // 25% de 240 RPM = 360 °/s na saída → 1080 °/s no motor
        Command::RunUntilStalled(speed, duty) => {
            assert!((speed - 1080.0).abs() < EPS);
            assert_eq!(duty, 60);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_compound_depth_reaches_motor() {
    let mut motor = GearedMotor::new(MockMotor::default())
        .with_gears(GearTrain::parse("12:36/20:16:40").unwrap())
        .unwrap();
    // Até o 2º engrenamento: 5/12
    motor.output_run(50.0, Some(2)).unwrap();
    match last_command(&motor) {
        Command::Run(speed) => assert!((speed - 120.0).abs() < EPS),
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_no_gears_is_identity() {
    let mut motor = GearedMotor::new(MockMotor::default());
    assert_eq!(motor.ratio(None).unwrap(), 1.0);
    motor.output_run(123.0, Some(3)).unwrap();
    assert_eq!(last_command(&motor), Command::Run(123.0));
}

#[test]
fn test_invalid_configuration_rejected() {
    let err = GearedMotor::new(MockMotor::default())
        .with_gears(GearTrain::Flat(vec![12.0, 0.0]))
        .err()
        .unwrap();
    assert!(matches!(err, DeviceError::Gear(GearError::InvalidTeeth { index: 1, .. })));

    let err = GearedMotor::new(MockMotor::default())
        .with_rpm(-1.0)
        .err()
        .unwrap();
    assert!(matches!(err, DeviceError::Speed(_)));
}

// ═══════════════════════════════════════════════════════════════════════════
// POLLING
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_wait_until_stopped() {
    let motor = GearedMotor::new(MockMotor::with_speeds(vec![300.0, 120.0, 0.0]));
    let poller = mock_poller();
    motor.wait_until_stopped(&poller).unwrap();
    assert_eq!(poller.clock().now_ms(), 20);
}

#[test]
fn test_wait_until_started_and_speed() {
    let motor = GearedMotor::new(MockMotor::with_speeds(vec![0.0, 0.0, 50.0, 200.0, 400.0]));
    let poller = mock_poller();
    motor.wait_until_started(&poller).unwrap();
    motor
        .wait_until_speed(&poller, Comparison::GreaterOrEqual, 400.0)
        .unwrap();
    assert_eq!(motor.driver().reads.get(), 5);
}

#[test]
fn test_wait_until_speed_timeout() {
    let motor = GearedMotor::new(MockMotor::with_speeds(vec![10.0]));
    let poller = mock_poller().timeout(Duration::from_millis(100));
    assert_eq!(
        motor.wait_until_speed(&poller, Comparison::Greater, 500.0),
        Err(DeviceError::Timeout(100))
    );
}

#[test]
fn test_wait_until_bumped_ignores_long_hold() {
    let clock = Arc::new(MockClock::default());
    let poller = Poller::with_clock(Arc::clone(&clock)).interval(Duration::from_millis(10));
    // 1º toque segurado 700 ms (não conta), 2º toque de 200 ms
    let pressed = || {
        let t = clock.now_ms();
        Ok((100..800).contains(&t) || (1000..1200).contains(&t))
    };
    poller.wait_until_bumped(pressed, 500).unwrap();
    assert_eq!(clock.now_ms(), 1200);
}

#[test]
fn test_wait_until_bumped_times_out() {
    let poller = mock_poller().timeout(Duration::from_millis(300));
    assert_eq!(
        poller.wait_until_bumped(|| Ok(true), 500),
        Err(DeviceError::Timeout(300))
    );
}

#[test]
fn test_wait_until_button_bumped() {
    let clock = Arc::new(MockClock::default());
    let poller = Poller::with_clock(Arc::clone(&clock)).interval(Duration::from_millis(10));
    let buttons = || {
        let t = clock.now_ms();
        Ok(if (50..150).contains(&t) {
            vec!["left_up", "beacon"]
        } else {
            vec!["left_up"]
        })
    };
    poller.wait_until_button_bumped(buttons, &"beacon", 500).unwrap();
    assert_eq!(clock.now_ms(), 150);
}

#[test]
fn test_wait_until_color() {
    let readings = [None, Some(Color::White), Some(Color::Black), Some(Color::Black), None];
    let next = Cell::new(0);
    let read = || {
        let i = next.get();
        next.set(i + 1);
        Ok(readings[i.min(readings.len() - 1)])
    };
    let poller = mock_poller();

    poller
        .wait_until_color_is(read, &ColorMatch::from(vec![Color::Black, Color::Brown]))
        .unwrap();
    assert_eq!(next.get(), 3);

    poller
        .wait_until_color_not(read, &Color::Black.into())
        .unwrap();
    assert_eq!(next.get(), 5);
}

#[test]
fn test_wait_until_compare_parsed_operator() {
    let values = [10.0, 20.0, 35.0];
    let next = Cell::new(0);
    let op: Comparison = ">".parse().unwrap();
    mock_poller()
        .wait_until_compare(
            || {
                let i = next.get();
                next.set(i + 1);
                Ok(values[i])
            },
            op,
            30.0,
        )
        .unwrap();
    assert_eq!(next.get(), 3);
}

#[test]
fn test_stopwatch_wait_until_time_passes() {
    let clock = Arc::new(MockClock::default());
    let mut watch = StopWatch::with_clock(Arc::clone(&clock));
    watch.pause();
    watch.wait_until_time_passes(250);
    assert!(watch.is_running());
    assert!(watch.elapsed_ms() >= 250);
}

// ═══════════════════════════════════════════════════════════════════════════
// EFFECTS
// ═══════════════════════════════════════════════════════════════════════════

fn fast_flash(color: Color) -> Effect {
    Effect::Flash {
        color,
        on_ms: 5,
        off_ms: 5,
    }
}

#[test]
fn test_effect_runs_and_stops_dark() {
    let light = Arc::new(Mutex::new(MockLight::default()));
    let mut handle = EffectHandle::new();

    handle.start(light.clone(), fast_flash(Color::Red)).unwrap();
    assert!(handle.is_running());
    std::thread::sleep(Duration::from_millis(40));
    handle.stop().unwrap();
    assert!(!handle.is_running());

    let guard = light.lock().unwrap();
    let history = &guard.history;
    assert!(history.contains(&Some(Color::Red)));
    assert_eq!(history.last(), Some(&None));
}

#[test]
fn test_effect_start_replaces_running() {
    let light = Arc::new(Mutex::new(MockLight::default()));
    let mut handle = EffectHandle::new();

    handle.start(light.clone(), fast_flash(Color::Red)).unwrap();
    std::thread::sleep(Duration::from_millis(20));
    let pulse = Effect::Pulse {
        color: Color::Green,
        on_ms: 5,
        short_ms: 5,
        long_ms: 5,
    };
    handle.start(light.clone(), pulse).unwrap();
    assert_eq!(handle.current(), Some(pulse));
    std::thread::sleep(Duration::from_millis(20));
    handle.stop().unwrap();

    // O pisca terminou (luz apagada) antes do primeiro verde
    let guard = light.lock().unwrap();
    let history = &guard.history;
    let first_green = history
        .iter()
        .position(|c| *c == Some(Color::Green))
        .unwrap();
    assert_eq!(history[first_green - 1], None);
    assert!(history[first_green..].iter().all(|c| *c != Some(Color::Red)));
}

#[test]
fn test_effect_dropped_turns_light_off() {
    let light = Arc::new(Mutex::new(MockLight::default()));
    {
        let mut handle = EffectHandle::new();
        handle.start(light.clone(), fast_flash(Color::Orange)).unwrap();
        std::thread::sleep(Duration::from_millis(10));
    }
    assert_eq!(light.lock().unwrap().history.last(), Some(&None));
}

#[test]
fn test_effect_light_error_surfaces_on_stop() {
    let light = Arc::new(Mutex::new(MockLight {
        fail: true,
        ..Default::default()
    }));
    let mut handle = EffectHandle::new();
    handle.start(light, fast_flash(Color::Blue)).unwrap();
    std::thread::sleep(Duration::from_millis(10));
    assert_eq!(
        handle.stop(),
        Err(DeviceError::Driver("light unplugged".into()))
    );
}

#[test]
fn test_effect_failure_still_turns_light_off() {
    let light = Arc::new(Mutex::new(MockLight {
        fail_on_call: Some(2),
        ..Default::default()
    }));
    let mut handle = EffectHandle::new();
    let pulse = Effect::Pulse {
        color: Color::Red,
        on_ms: 5,
        short_ms: 5,
        long_ms: 5,
    };
    handle.start(light.clone(), pulse).unwrap();
    std::thread::sleep(Duration::from_millis(30));

    assert_eq!(handle.stop(), Err(DeviceError::Driver("glitch".into())));
    let guard = light.lock().unwrap();
    assert_eq!(guard.calls, 3);
    assert_eq!(guard.history, vec![Some(Color::Red), None]);
}

#[test]
fn test_beep_async() {
    let speaker = Arc::new(Mutex::new(MockSpeaker::default()));
    beep_async(speaker.clone(), 880, 50, 40).join().unwrap().unwrap();
    beeps_async(speaker.clone(), 2).join().unwrap().unwrap();
    assert_eq!(
        speaker.lock().unwrap().beeps,
        vec![(880, 50, 40), (500, 100, 30), (500, 100, 30)]
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// SERDE
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_value_types_serialize() {
    assert_eq!(serde_json::to_string(&Color::Red).unwrap(), "\"Red\"");
    assert_eq!(
        serde_json::to_string(&Comparison::GreaterOrEqual).unwrap(),
        "\"GreaterOrEqual\""
    );

    let wanted: ColorMatch = serde_json::from_str(r#"{"AnyOf":["Red","Blue"]}"#).unwrap();
    assert_eq!(wanted, ColorMatch::AnyOf(vec![Color::Red, Color::Blue]));

    let reading: BeaconReading = serde_json::from_str(r#"{"distance":12.0,"angle":null}"#).unwrap();
    assert_eq!(reading, BeaconReading::new(Some(12.0), None));
}
