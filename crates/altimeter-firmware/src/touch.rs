//! FT6336U capacitive touch controller
//!
//! Only the single-touch path the altimeter needs: chip identification and
//! the first touch point. The controller reports coordinates directly in
//! display pixels on the CoreS3.

use altimeter_core::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, TouchPoint};
use embedded_hal_async::i2c::I2c;
use thiserror_no_std::Error;

/// FT6336U I2C address
pub const I2C_ADDR: u8 = 0x38;

/// Touch detection status; the low nibble holds the number of touches
const ADDR_TD_STATUS: u8 = 0x02;

/// First byte of the touch point 1 block (XH, XL, YH, YL)
const ADDR_TOUCH1_XH: u8 = 0x03;

/// Chip ID register
const ADDR_CHIP_ID: u8 = 0xA3;

/// Event flag in the high bits of XH: 0 = press down, 1 = lift up, 2 = contact
const EVENT_LIFT_UP: u8 = 1;

#[derive(Debug, Error)]
pub enum TouchError<E> {
    #[error("I2C error: {0:?}")]
    I2c(E),
}

pub struct Ft6336u<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> Ft6336u<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    async fn read_byte(&mut self, addr: u8) -> Result<u8, TouchError<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(I2C_ADDR, &[addr], &mut buf)
            .await
            .map_err(TouchError::I2c)?;
        Ok(buf[0])
    }

    /// Chip ID (0x64 for FT6336U)
    pub async fn chip_id(&mut self) -> Result<u8, TouchError<I2C::Error>> {
        self.read_byte(ADDR_CHIP_ID).await
    }

    /// Current position of the first finger, or `None` when nothing touches
    /// the panel.
    pub async fn read_touch(&mut self) -> Result<Option<TouchPoint>, TouchError<I2C::Error>> {
        let touches = self.read_byte(ADDR_TD_STATUS).await? & 0x0F;
        if touches == 0 {
            return Ok(None);
        }

        let mut buf = [0u8; 4];
        self.i2c
            .write_read(I2C_ADDR, &[ADDR_TOUCH1_XH], &mut buf)
            .await
            .map_err(TouchError::I2c)?;

        Ok(decode_touch1(buf))
    }
}

fn decode_touch1(buf: [u8; 4]) -> Option<TouchPoint> {
    if buf[0] >> 6 == EVENT_LIFT_UP {
        return None;
    }
    let x = (((buf[0] & 0x0F) as u16) << 8) | buf[1] as u16;
    let y = (((buf[2] & 0x0F) as u16) << 8) | buf[3] as u16;
    Some(TouchPoint::new(
        x.min(DISPLAY_WIDTH_PX - 1),
        y.min(DISPLAY_HEIGHT_PX - 1),
    ))
}
