use std::cmp::PartialEq;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

use bytemuck::TransparentWrapper;

/// Anything that can stand in for an 8-bit machine word.
pub trait U8Equivalent: Copy + Clone {
    fn to_u8(self) -> u8;
    fn from_u8(value: u8) -> Self;
}

/// An 8-bit machine word. Arithmetic wraps at 256.
#[derive(Copy, Clone, Default, TransparentWrapper)]
#[repr(transparent)]
pub struct Reg8(pub u8);

impl From<u8> for Reg8 {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl From<Reg8> for u8 {
    fn from(value: Reg8) -> Self {
        value.0
    }
}

impl U8Equivalent for Reg8 {
    fn to_u8(self) -> u8 {
        self.0
    }
    fn from_u8(value: u8) -> Self {
        Self(value)
    }
}

impl U8Equivalent for u8 {
    fn to_u8(self) -> u8 {
        self
    }
    fn from_u8(value: u8) -> Self {
        value
    }
}

impl<T: U8Equivalent> Add<T> for Reg8 {
    type Output = Reg8;
    fn add(self, other: T) -> Self::Output {
        Reg8(self.0.wrapping_add(other.to_u8()))
    }
}

impl<T: U8Equivalent> AddAssign<T> for Reg8 {
    fn add_assign(&mut self, other: T) {
        *self = *self + other;
    }
}

impl<T: U8Equivalent> Sub<T> for Reg8 {
    type Output = Reg8;
    fn sub(self, other: T) -> Self::Output {
        Reg8(self.0.wrapping_sub(other.to_u8()))
    }
}

impl<T: U8Equivalent> SubAssign<T> for Reg8 {
    fn sub_assign(&mut self, other: T) {
        *self = *self - other;
    }
}

impl<T: U8Equivalent> Mul<T> for Reg8 {
    type Output = Reg8;
    fn mul(self, other: T) -> Self::Output {
        Reg8(self.0.wrapping_mul(other.to_u8()))
    }
}

impl<T: U8Equivalent> MulAssign<T> for Reg8 {
    fn mul_assign(&mut self, other: T) {
        *self = *self * other;
    }
}

impl<T: U8Equivalent> PartialEq<T> for Reg8 {
    fn eq(&self, other: &T) -> bool {
        self.0 == other.to_u8()
    }
}

impl Eq for Reg8 {}

impl fmt::Debug for Reg8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reg8({:#04X})", self.0)
    }
}

impl fmt::Display for Reg8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::UpperHex for Reg8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_wraps() {
        assert_eq!(Reg8(250) + 10u8, 4u8);
        assert_eq!(Reg8(3) - Reg8(5), 254u8);
        assert_eq!(Reg8(16) * 17u8, 16u8);
    }

    #[test]
    fn wrapper_is_transparent() {
        let mut raw = [1u8, 2, 3];
        let regs: &mut [Reg8] = Reg8::wrap_slice_mut(&mut raw[..]);
        regs[1] += 1u8;
        assert_eq!(raw, [1, 3, 3]);
    }

    #[test]
    fn formats_as_hex() {
        assert_eq!(format!("{:02X}", Reg8(0xA)), "0A");
        assert_eq!(Reg8(72).to_string(), "72");
    }
}
