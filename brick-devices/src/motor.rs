//! Motor com trem de engrenagens acoplado
//!
//! Os métodos `output_*` falam no referencial da engrenagem de saída
//! (até `depth` engrenamentos); os `percent_*` recebem percentuais e
//! convertem para °/s com o RPM do motor.

use brick_gears::GearTrain;
use brick_speed::constants::MEDIUM_MOTOR_RPM;
use brick_speed::{speed_angular, PercentRange, SpeedError};
use tracing::debug;

use crate::compare::Comparison;
use crate::error::DeviceResult;
use crate::traits::{Clock, MotorDriver, Stop};
use crate::wait::Poller;

/// Driver de motor + engrenagens + RPM nominal
#[derive(Debug, Clone)]
pub struct GearedMotor<M: MotorDriver> {
    driver: M,
    gears: Option<GearTrain>,
    rpm: f64,
    range: PercentRange,
}

impl<M: MotorDriver> GearedMotor<M> {
    /// Motor sem engrenagens, RPM de motor médio
    pub fn new(driver: M) -> Self {
        Self {
            driver,
            gears: None,
            rpm: MEDIUM_MOTOR_RPM,
            range: PercentRange::default(),
        }
    }

    /// Acopla um trem de engrenagens (validado)
    pub fn with_gears(mut self, gears: GearTrain) -> DeviceResult<Self> {
        gears.validate()?;
        self.gears = Some(gears);
        Ok(self)
    }

    pub fn with_rpm(mut self, rpm: f64) -> DeviceResult<Self> {
        if !rpm.is_finite() || rpm <= 0.0 {
            return Err(SpeedError::InvalidRpm(rpm).into());
        }
        self.rpm = rpm;
        Ok(self)
    }

    pub fn with_range(mut self, range: PercentRange) -> Self {
        self.range = range;
        self
    }

    pub fn driver(&self) -> &M {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut M {
        &mut self.driver
    }

    pub fn into_inner(self) -> M {
        self.driver
    }

    pub fn gears(&self) -> Option<&GearTrain> {
        self.gears.as_ref()
    }

    pub fn rpm(&self) -> f64 {
        self.rpm
    }

    /// Relação até `depth`; sem engrenagens é 1
    pub fn ratio(&self, depth: Option<usize>) -> DeviceResult<f64> {
        match &self.gears {
            Some(gears) => Ok(gears.ratio(depth)?),
            None => Ok(1.0),
        }
    }

    fn percent_speed(&self, percent: f64) -> f64 {
        speed_angular(Some(percent), self.rpm, self.range.min, self.range.max)
    }

    /// Velocidade no motor para uma velocidade na saída
    fn motor_speed(&self, output_speed: f64, depth: Option<usize>) -> DeviceResult<f64> {
        Ok(output_speed / self.ratio(depth)?)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // LEITURAS
    // ═══════════════════════════════════════════════════════════════════════

    /// Ângulo da engrenagem de saída
    pub fn output_angle(&self, depth: Option<usize>) -> DeviceResult<f64> {
        Ok(self.driver.angle()? * self.ratio(depth)?)
    }

    /// Velocidade da engrenagem de saída (°/s)
    pub fn output_speed(&self, depth: Option<usize>) -> DeviceResult<f64> {
        Ok(self.driver.speed()? * self.ratio(depth)?)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // RUN
    // ═══════════════════════════════════════════════════════════════════════

    pub fn output_run(&mut self, speed: f64, depth: Option<usize>) -> DeviceResult<()> {
        let motor_speed = self.motor_speed(speed, depth)?;
        debug!(speed, motor_speed, ?depth, "output_run");
        self.driver.run(motor_speed)
    }

    pub fn output_percent_run(&mut self, percent: f64, depth: Option<usize>) -> DeviceResult<()> {
        self.output_run(self.percent_speed(percent), depth)
    }

    pub fn percent_run(&mut self, percent: f64) -> DeviceResult<()> {
        let speed = self.percent_speed(percent);
        self.driver.run(speed)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // RUN TIME
    // ═══════════════════════════════════════════════════════════════════════

    pub fn output_run_time(
        &mut self,
        speed: f64,
        time_ms: u64,
        stop: Stop,
        wait: bool,
        depth: Option<usize>,
    ) -> DeviceResult<()> {
        let motor_speed = self.motor_speed(speed, depth)?;
        self.driver.run_time(motor_speed, time_ms, stop, wait)
    }

    pub fn output_percent_run_time(
        &mut self,
        percent: f64,
        time_ms: u64,
        stop: Stop,
        wait: bool,
        depth: Option<usize>,
    ) -> DeviceResult<()> {
        self.output_run_time(self.percent_speed(percent), time_ms, stop, wait, depth)
    }

    pub fn percent_run_time(
        &mut self,
        percent: f64,
        time_ms: u64,
        stop: Stop,
        wait: bool,
    ) -> DeviceResult<()> {
        let speed = self.percent_speed(percent);
        self.driver.run_time(speed, time_ms, stop, wait)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // RUN ANGLE / TARGET
    // ═══════════════════════════════════════════════════════════════════════

    /// Gira a saída `rotation_angle` graus
    pub fn output_run_angle(
        &mut self,
        speed: f64,
        rotation_angle: f64,
        stop: Stop,
        wait: bool,
        depth: Option<usize>,
    ) -> DeviceResult<()> {
        let ratio = self.ratio(depth)?;
        self.driver
            .run_angle(speed / ratio, rotation_angle / ratio, stop, wait)
    }

    pub fn output_percent_run_angle(
        &mut self,
        percent: f64,
        rotation_angle: f64,
        stop: Stop,
        wait: bool,
        depth: Option<usize>,
    ) -> DeviceResult<()> {
        self.output_run_angle(self.percent_speed(percent), rotation_angle, stop, wait, depth)
    }

    pub fn percent_run_angle(
        &mut self,
        percent: f64,
        rotation_angle: f64,
        stop: Stop,
        wait: bool,
    ) -> DeviceResult<()> {
        let speed = self.percent_speed(percent);
        self.driver.run_angle(speed, rotation_angle, stop, wait)
    }

    /// Leva a saída ao ângulo absoluto `target_angle`
    pub fn output_run_target(
        &mut self,
        speed: f64,
        target_angle: f64,
        stop: Stop,
        wait: bool,
        depth: Option<usize>,
    ) -> DeviceResult<()> {
        let ratio = self.ratio(depth)?;
        self.driver
            .run_target(speed / ratio, target_angle / ratio, stop, wait)
    }

    pub fn output_percent_run_target(
        &mut self,
        percent: f64,
        target_angle: f64,
        stop: Stop,
        wait: bool,
        depth: Option<usize>,
    ) -> DeviceResult<()> {
        self.output_run_target(self.percent_speed(percent), target_angle, stop, wait, depth)
    }

    pub fn percent_run_target(
        &mut self,
        percent: f64,
        target_angle: f64,
        stop: Stop,
        wait: bool,
    ) -> DeviceResult<()> {
        let speed = self.percent_speed(percent);
        self.driver.run_target(speed, target_angle, stop, wait)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // RUN UNTIL STALLED
    // ═══════════════════════════════════════════════════════════════════════

    /// Gira até travar; retorna o ângulo do motor no travamento
    pub fn output_run_until_stalled(
        &mut self,
        speed: f64,
        stop: Stop,
        duty_limit: u8,
        depth: Option<usize>,
    ) -> DeviceResult<f64> {
        let motor_speed = self.motor_speed(speed, depth)?;
        self.driver.run_until_stalled(motor_speed, stop, duty_limit)
    }

    pub fn output_percent_run_until_stalled(
        &mut self,
        percent: f64,
        stop: Stop,
        duty_limit: u8,
        depth: Option<usize>,
    ) -> DeviceResult<f64> {
        self.output_run_until_stalled(self.percent_speed(percent), stop, duty_limit, depth)
    }

    pub fn percent_run_until_stalled(
        &mut self,
        percent: f64,
        stop: Stop,
        duty_limit: u8,
    ) -> DeviceResult<f64> {
        let speed = self.percent_speed(percent);
        self.driver.run_until_stalled(speed, stop, duty_limit)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // ESPERAS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn wait_until_stopped<C: Clock>(&self, poller: &Poller<C>) -> DeviceResult<()> {
        poller.wait_until(|| Ok(self.driver.speed()? == 0.0))
    }

    pub fn wait_until_started<C: Clock>(&self, poller: &Poller<C>) -> DeviceResult<()> {
        poller.wait_until(|| Ok(self.driver.speed()? != 0.0))
    }

    /// Espera até `speed() <OP> speed` (velocidade do motor)
    pub fn wait_until_speed<C: Clock>(
        &self,
        poller: &Poller<C>,
        op: Comparison,
        speed: f64,
    ) -> DeviceResult<()> {
        poller.wait_until_compare(|| self.driver.speed(), op, speed)
    }
}
