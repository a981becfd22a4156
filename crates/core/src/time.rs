/// Q32.32 fixed-point game-time duration in microseconds.
///
/// Storage: `u64` with 32 integer bits + 32 fractional bits.
/// Base unit: microseconds (1 second = 1,000,000 us).
/// Range: 0 to ~4294 seconds with sub-microsecond precision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Micros(u64);

impl Micros {
    const FRAC_BITS: u32 = 32;
    const MICROS_PER_SEC: u64 = 1_000_000;

    /// Create from whole seconds.
    pub const fn from_secs(secs: u32) -> Self {
        Self((secs as u64 * Self::MICROS_PER_SEC) << Self::FRAC_BITS)
    }

    /// Create from whole milliseconds.
    pub const fn from_millis(millis: u32) -> Self {
        Self((millis as u64 * 1_000) << Self::FRAC_BITS)
    }

    /// Create from whole microseconds.
    pub const fn from_micros(micros: u32) -> Self {
        Self((micros as u64) << Self::FRAC_BITS)
    }

    /// Convert to tick count at the given tick rate.
    ///
    /// Formula: ticks = (micros * tick_hz) / MICROS_PER_SEC, computed with
    /// a 128-bit intermediate so fractional microseconds survive the scale.
    pub const fn to_ticks(self, tick_hz: u32) -> u64 {
        let numer = self.0 as u128 * tick_hz as u128;
        let denom = Self::MICROS_PER_SEC << Self::FRAC_BITS;
        (numer / denom as u128) as u64
    }

    /// Returns the raw Q32.32 value.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl core::ops::Add for Micros {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl core::ops::Sub for Micros {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl core::ops::Mul<u32> for Micros {
    type Output = Self;
    fn mul(self, rhs: u32) -> Self {
        Self(self.0 * rhs as u64)
    }
}

impl core::ops::Div<u32> for Micros {
    type Output = Self;
    fn div(self, rhs: u32) -> Self {
        Self(self.0 / rhs as u64)
    }
}

/// Wall-clock pacing multiplier selected by the player (1x / 2x / 3x).
///
/// Scales only how fast real time maps onto ticks; game-time semantics are
/// identical at every setting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpeedMultiplier {
    #[default]
    Normal,
    Double,
    Triple,
}

impl SpeedMultiplier {
    /// Integer factor the tick period is divided by.
    pub const fn factor(self) -> u32 {
        match self {
            SpeedMultiplier::Normal => 1,
            SpeedMultiplier::Double => 2,
            SpeedMultiplier::Triple => 3,
        }
    }

    /// Decode the player-action index (0 -> 1x, 1 -> 2x, 2 -> 3x).
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(SpeedMultiplier::Normal),
            1 => Some(SpeedMultiplier::Double),
            2 => Some(SpeedMultiplier::Triple),
            _ => None,
        }
    }

    /// Wall-clock duration of one tick at this setting.
    pub fn tick_period(self, tick_hz: u32) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / (tick_hz as f64 * self.factor() as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn micros_from_secs() {
        let m = Micros::from_secs(1);
        assert_eq!(m.raw(), 1_000_000 << 32);
    }

    #[test]
    fn micros_from_millis() {
        let m = Micros::from_millis(500);
        assert_eq!(m.raw(), 500_000 << 32);
    }

    #[test]
    fn micros_to_ticks() {
        // 1 second at 400 Hz = 400 ticks
        let m = Micros::from_secs(1);
        assert_eq!(m.to_ticks(400), 400);

        // The movement cadence: 22.5 ms at 400 Hz = exactly 9 ticks
        let m = Micros::from_micros(22_500);
        assert_eq!(m.to_ticks(400), 9);

        // 500 ms at 400 Hz = 200 ticks
        let m = Micros::from_millis(500);
        assert_eq!(m.to_ticks(400), 200);
    }

    #[test]
    fn micros_arithmetic() {
        let a = Micros::from_secs(5);
        let b = Micros::from_secs(3);

        assert_eq!((a + b).to_ticks(400), 3200);
        assert_eq!((a - b).to_ticks(400), 800);
        assert_eq!((a * 2).to_ticks(400), 4000);
        assert_eq!((a / 5).to_ticks(400), 400);
    }

    #[test]
    fn speed_multiplier_factors() {
        assert_eq!(SpeedMultiplier::Normal.factor(), 1);
        assert_eq!(SpeedMultiplier::Double.factor(), 2);
        assert_eq!(SpeedMultiplier::Triple.factor(), 3);
    }

    #[test]
    fn speed_multiplier_from_index() {
        assert_eq!(SpeedMultiplier::from_index(0), Some(SpeedMultiplier::Normal));
        assert_eq!(SpeedMultiplier::from_index(2), Some(SpeedMultiplier::Triple));
        assert_eq!(SpeedMultiplier::from_index(3), None);
    }

    #[test]
    fn tick_period_scales_down_with_multiplier() {
        let normal = SpeedMultiplier::Normal.tick_period(400);
        let triple = SpeedMultiplier::Triple.tick_period(400);
        assert_eq!(normal.as_nanos(), triple.as_nanos() * 3);
    }
}
