//! Shared async I2C bus
//!
//! The altimeter board hangs the power controller, IO expander, touch
//! controller and barometer off a single I2C peripheral. Each driver gets its
//! own [`SharedI2c`] handle; a transaction holds the bus lock across its
//! awaits so transfers from different tasks never interleave.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embedded_hal_async::i2c::{ErrorType, I2c, Operation};

pub type I2cBus<T> = Mutex<CriticalSectionRawMutex, T>;

/// Handle to an I2C bus shared through an embassy [`Mutex`].
///
/// ```ignore
/// static I2C_BUS: StaticCell<I2cBus<I2c<'static, Async>>> = StaticCell::new();
/// let bus = I2C_BUS.init(Mutex::new(i2c));
///
/// let barometer = Bme280Sensor::new(SharedI2c::new(bus), Delay);
/// let touch = Ft6336u::new(SharedI2c::new(bus));
/// ```
pub struct SharedI2c<'a, T> {
    bus: &'a I2cBus<T>,
}

impl<'a, T> SharedI2c<'a, T> {
    #[inline]
    pub const fn new(bus: &'a I2cBus<T>) -> Self {
        Self { bus }
    }
}

impl<T> Clone for SharedI2c<'_, T> {
    fn clone(&self) -> Self {
        Self { bus: self.bus }
    }
}

impl<T: ErrorType> ErrorType for SharedI2c<'_, T> {
    type Error = T::Error;
}

impl<T: I2c> I2c for SharedI2c<'_, T> {
    #[inline]
    async fn read(&mut self, address: u8, read: &mut [u8]) -> Result<(), Self::Error> {
        self.bus.lock().await.read(address, read).await
    }

    #[inline]
    async fn write(&mut self, address: u8, write: &[u8]) -> Result<(), Self::Error> {
        self.bus.lock().await.write(address, write).await
    }

    #[inline]
    async fn write_read(
        &mut self,
        address: u8,
        write: &[u8],
        read: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.bus.lock().await.write_read(address, write, read).await
    }

    /// All operations run under one lock acquisition.
    #[inline]
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.bus.lock().await.transaction(address, operations).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::pin::pin;
    use core::task::{Context, Poll, Waker};
    use embedded_hal_async::i2c::ErrorKind;

    fn block_on<F: Future>(future: F) -> F::Output {
        let mut future = pin!(future);
        let mut cx = Context::from_waker(Waker::noop());
        loop {
            if let Poll::Ready(output) = future.as_mut().poll(&mut cx) {
                return output;
            }
        }
    }

    /// Register file at a single address; reads return bytes starting at the
    /// last written register.
    struct FakeBus {
        registers: [u8; 8],
        pointer: usize,
        writes: usize,
    }

    impl ErrorType for FakeBus {
        type Error = ErrorKind;
    }

    impl I2c for FakeBus {
        async fn transaction(
            &mut self,
            _address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            for op in operations {
                match op {
                    Operation::Write(bytes) => {
                        self.writes += 1;
                        self.pointer = *bytes.first().ok_or(ErrorKind::Other)? as usize;
                    }
                    Operation::Read(buf) => {
                        for (i, byte) in buf.iter_mut().enumerate() {
                            *byte = self.registers[(self.pointer + i) % self.registers.len()];
                        }
                    }
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_handles_share_one_bus() {
        let bus: I2cBus<FakeBus> = Mutex::new(FakeBus {
            registers: [0, 1, 2, 3, 4, 5, 6, 7],
            pointer: 0,
            writes: 0,
        });
        let mut first = SharedI2c::new(&bus);
        let mut second = first.clone();

        let mut buf = [0u8; 2];
        block_on(first.write_read(0x38, &[3], &mut buf)).unwrap();
        assert_eq!(buf, [3, 4]);

        block_on(second.write_read(0x38, &[6], &mut buf)).unwrap();
        assert_eq!(buf, [6, 7]);

        assert_eq!(block_on(bus.lock()).writes, 2);
    }
}
