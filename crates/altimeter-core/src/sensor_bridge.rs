//! Sensor bridge
//!
//! Connects a pressure sensor running on its own task (or thread) to the UI
//! loop. While the screen is visible the bridge is *registered*: the sensor
//! side samples at the requested rate and hands each reading over through a
//! latest-value [`Signal`]. When the screen is hidden the bridge is
//! unregistered, the pending reading is discarded and the sampling loop
//! parks until the next registration.

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embedded_hal_async::delay::DelayNs;
use log::{debug, info, warn};

use crate::sensors::{PressureReading, PressureSensor, SamplingRate, SensorError};

/// Bridge shared by the simulator's mock barometer and the firmware's
/// pressure task.
pub static PRESSURE_BRIDGE: SensorBridge = SensorBridge::new();

pub struct SensorBridge {
    registered: AtomicBool,
    rate: AtomicU8,
    latest: Signal<CriticalSectionRawMutex, PressureReading>,
    resumed: Signal<CriticalSectionRawMutex, ()>,
}

impl Default for SensorBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorBridge {
    pub const fn new() -> Self {
        Self {
            registered: AtomicBool::new(false),
            rate: AtomicU8::new(SamplingRate::Game as u8),
            latest: Signal::new(),
            resumed: Signal::new(),
        }
    }

    /// Start listening at `rate`. Wakes a parked sampling loop.
    ///
    /// Anything signalled before registration is discarded, including a
    /// reading that raced with the previous [`unregister`](Self::unregister).
    pub fn register(&self, rate: SamplingRate) {
        self.latest.reset();
        self.rate.store(rate as u8, Ordering::Relaxed);
        if !self.registered.swap(true, Ordering::AcqRel) {
            info!("Pressure listener registered ({} ms)", rate.interval_ms());
        }
        self.resumed.signal(());
    }

    /// Stop listening and drop any reading not yet consumed.
    pub fn unregister(&self) {
        if self.registered.swap(false, Ordering::AcqRel) {
            info!("Pressure listener unregistered");
        }
        self.latest.reset();
    }

    pub fn is_registered(&self) -> bool {
        self.registered.load(Ordering::Acquire)
    }

    pub fn rate(&self) -> SamplingRate {
        SamplingRate::from_u8(self.rate.load(Ordering::Relaxed))
    }

    /// Hand a reading to the UI side. Readings delivered while unregistered
    /// are dropped; returns whether the reading was accepted.
    pub fn deliver(&self, reading: PressureReading) -> bool {
        if !self.is_registered() {
            return false;
        }
        self.latest.signal(reading);
        true
    }

    /// The most recent reading since the last call, if any
    pub fn take_latest(&self) -> Option<PressureReading> {
        self.latest.try_take()
    }

    /// Resolves once the bridge is registered
    pub async fn wait_registered(&self) {
        while !self.is_registered() {
            self.resumed.wait().await;
        }
    }
}

/// Sample `sensor` into `bridge` for as long as the sensor is present.
///
/// The loop parks while the bridge is unregistered. Read failures are logged
/// and skipped; a sensor reporting [`SensorError::NotPresent`] ends the loop,
/// leaving the measured pressure at whatever it last was.
pub async fn run_sensor_loop<S, D>(sensor: &mut S, bridge: &SensorBridge, delay: &mut D)
where
    S: PressureSensor,
    D: DelayNs,
{
    loop {
        if !bridge.is_registered() {
            debug!("{}: waiting for listener", sensor.name());
            bridge.wait_registered().await;
            continue;
        }

        match sensor.read().await {
            Ok(reading) => {
                bridge.deliver(reading);
            }
            Err(e @ SensorError::NotPresent { .. }) => {
                warn!("{e}; pressure updates disabled");
                return;
            }
            Err(e) => warn!("{e}"),
        }

        let interval = bridge.rate().interval_ms();
        if interval > 0 {
            delay.delay_ms(interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use core::pin::pin;
    use core::task::{Context, Poll, Waker};

    fn block_on<F: Future>(future: F) -> F::Output {
        let mut future = pin!(future);
        let mut cx = Context::from_waker(Waker::noop());
        loop {
            if let Poll::Ready(output) = future.as_mut().poll(&mut cx) {
                return output;
            }
        }
    }

    fn reading(hpa: f32) -> PressureReading {
        PressureReading::new(hpa).unwrap()
    }

    struct NoDelay {
        total_ms: u32,
    }

    impl DelayNs for NoDelay {
        async fn delay_ns(&mut self, ns: u32) {
            self.total_ms += ns / 1_000_000;
        }
    }

    /// Yields the queued values, then a read error, then reports absence.
    struct ScriptedSensor {
        values: &'static [f32],
        next: usize,
        failed_once: bool,
    }

    impl PressureSensor for ScriptedSensor {
        fn name(&self) -> &'static str {
            "scripted"
        }

        async fn read(&mut self) -> Result<PressureReading, SensorError> {
            if let Some(&hpa) = self.values.get(self.next) {
                self.next += 1;
                return PressureReading::new(hpa);
            }
            if !self.failed_once {
                self.failed_once = true;
                return Err(SensorError::ReadFailed {
                    sensor: "scripted",
                    operation: "read",
                    details: "bus error",
                });
            }
            Err(SensorError::NotPresent { sensor: "scripted" })
        }
    }

    /// Counts its reads; reports absence after `limit` readings.
    struct CountingSensor<'a> {
        reads: &'a Cell<u32>,
        limit: u32,
    }

    impl PressureSensor for CountingSensor<'_> {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn read(&mut self) -> Result<PressureReading, SensorError> {
            if self.reads.get() >= self.limit {
                return Err(SensorError::NotPresent { sensor: "counting" });
            }
            self.reads.set(self.reads.get() + 1);
            PressureReading::new(1000.0 - self.reads.get() as f32)
        }
    }

    #[test]
    fn test_unregistered_bridge_drops_readings() {
        let bridge = SensorBridge::new();
        assert!(!bridge.is_registered());
        assert!(!bridge.deliver(reading(900.0)));
        assert_eq!(bridge.take_latest(), None);
    }

    #[test]
    fn test_latest_reading_wins() {
        let bridge = SensorBridge::new();
        bridge.register(SamplingRate::Game);
        assert!(bridge.deliver(reading(900.0)));
        assert!(bridge.deliver(reading(901.0)));
        assert_eq!(bridge.take_latest(), Some(reading(901.0)));
        assert_eq!(bridge.take_latest(), None);
    }

    #[test]
    fn test_unregister_discards_pending_reading() {
        let bridge = SensorBridge::new();
        bridge.register(SamplingRate::Ui);
        assert_eq!(bridge.rate(), SamplingRate::Ui);
        bridge.deliver(reading(950.0));
        bridge.unregister();
        assert!(!bridge.is_registered());
        assert_eq!(bridge.take_latest(), None);
    }

    #[test]
    fn test_wait_registered_returns_when_registered() {
        let bridge = SensorBridge::new();
        bridge.register(SamplingRate::Game);
        block_on(bridge.wait_registered());
        assert!(bridge.is_registered());
    }

    #[test]
    fn test_sensor_loop_stops_when_sensor_absent() {
        let bridge = SensorBridge::new();
        bridge.register(SamplingRate::Normal);
        let mut sensor = ScriptedSensor {
            values: &[1000.0, 990.0, 980.0],
            next: 0,
            failed_once: false,
        };
        let mut delay = NoDelay { total_ms: 0 };

        block_on(run_sensor_loop(&mut sensor, &bridge, &mut delay));

        assert_eq!(bridge.take_latest(), Some(reading(980.0)));
        // Three readings plus one failed read, each followed by a delay
        assert_eq!(delay.total_ms, 4 * 200);
    }

    #[test]
    fn test_register_discards_reading_raced_with_unregister() {
        let bridge = SensorBridge::new();
        bridge.register(SamplingRate::Game);
        bridge.unregister();
        // Sensor side passed the registration check just before unregister
        bridge.latest.signal(reading(990.0));

        bridge.register(SamplingRate::Game);
        assert_eq!(bridge.take_latest(), None);

        assert!(bridge.deliver(reading(995.0)));
        assert_eq!(bridge.take_latest(), Some(reading(995.0)));
    }

    #[test]
    fn test_sensor_loop_parks_until_registered() {
        let bridge = SensorBridge::new();
        let reads = Cell::new(0);
        let mut sensor = CountingSensor {
            reads: &reads,
            limit: 3,
        };
        let mut delay = NoDelay { total_ms: 0 };

        let mut sampling = pin!(run_sensor_loop(&mut sensor, &bridge, &mut delay));
        let mut cx = Context::from_waker(Waker::noop());

        for _ in 0..10 {
            assert!(sampling.as_mut().poll(&mut cx).is_pending());
        }
        assert_eq!(reads.get(), 0);
        assert_eq!(bridge.take_latest(), None);

        bridge.register(SamplingRate::Game);
        while sampling.as_mut().poll(&mut cx).is_pending() {}

        assert_eq!(reads.get(), 3);
        assert_eq!(bridge.take_latest(), Some(reading(997.0)));
    }
}
