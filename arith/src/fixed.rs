//! Binary fixed-point numbers and the elementary functions zeta needs.
//!
//! A [`Fixed`] is a raw `BigInt` mantissa; its value is `mantissa / 2^bits`
//! where `bits` belongs to the [`FixedContext`] that produced it. Values from
//! different contexts must never be mixed. Addition and negation do not need
//! the scale and are plain operator impls; everything else goes through the
//! context.

use num_bigint::{BigInt, Sign};
use num_complex::Complex64;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};
use std::ops::{Add, Neg, Sub};

use crate::ArithError;

/// Extra bits used while computing π and ln 2.
const CONSTANT_GUARD_BITS: u32 = 16;

/// Largest left shift `exp` will perform before reporting overflow.
const MAX_EXP_SHIFT: u64 = 1 << 20;

/// A real fixed-point value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fixed(BigInt);

impl Fixed {
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn halve(&self) -> Self {
        Self(&self.0 >> 1usize)
    }

    /// Divide by a positive integer, truncating toward zero.
    pub fn div_int(&self, n: u64) -> Self {
        Self(&self.0 / BigInt::from(n))
    }

    pub fn mul_int(&self, n: i64) -> Self {
        Self(&self.0 * BigInt::from(n))
    }
}

impl Add for Fixed {
    type Output = Fixed;
    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 + rhs.0)
    }
}

impl Add<&Fixed> for Fixed {
    type Output = Fixed;
    fn add(self, rhs: &Fixed) -> Fixed {
        Fixed(self.0 + &rhs.0)
    }
}

impl Add for &Fixed {
    type Output = Fixed;
    fn add(self, rhs: &Fixed) -> Fixed {
        Fixed(&self.0 + &rhs.0)
    }
}

impl Sub for Fixed {
    type Output = Fixed;
    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 - rhs.0)
    }
}

impl Sub for &Fixed {
    type Output = Fixed;
    fn sub(self, rhs: &Fixed) -> Fixed {
        Fixed(&self.0 - &rhs.0)
    }
}

impl Neg for Fixed {
    type Output = Fixed;
    fn neg(self) -> Fixed {
        Fixed(-self.0)
    }
}

/// A complex fixed-point value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CFixed {
    pub re: Fixed,
    pub im: Fixed,
}

impl CFixed {
    pub fn new(re: Fixed, im: Fixed) -> Self {
        Self { re, im }
    }

    pub fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }

    pub fn halve(&self) -> Self {
        Self::new(self.re.halve(), self.im.halve())
    }

    pub fn div_int(&self, n: u64) -> Self {
        Self::new(self.re.div_int(n), self.im.div_int(n))
    }

    pub fn mul_int(&self, n: i64) -> Self {
        Self::new(self.re.mul_int(n), self.im.mul_int(n))
    }
}

impl Add for &CFixed {
    type Output = CFixed;
    fn add(self, rhs: &CFixed) -> CFixed {
        CFixed::new(&self.re + &rhs.re, &self.im + &rhs.im)
    }
}

impl Add<&CFixed> for CFixed {
    type Output = CFixed;
    fn add(self, rhs: &CFixed) -> CFixed {
        CFixed::new(self.re + &rhs.re, self.im + &rhs.im)
    }
}

impl Sub for &CFixed {
    type Output = CFixed;
    fn sub(self, rhs: &CFixed) -> CFixed {
        CFixed::new(&self.re - &rhs.re, &self.im - &rhs.im)
    }
}

/// Shift right, truncating toward zero so series terms always reach zero.
fn shr_trunc(value: BigInt, bits: u32) -> BigInt {
    if value.sign() == Sign::Minus {
        -((-value) >> bits as usize)
    } else {
        value >> bits as usize
    }
}

/// `atan(1/x)` scaled by `2^bits`.
fn atan_inv(x: u32, bits: u32) -> BigInt {
    series_inv(x, bits, true)
}

/// `atanh(1/x)` scaled by `2^bits`.
fn atanh_inv(x: u32, bits: u32) -> BigInt {
    series_inv(x, bits, false)
}

fn series_inv(x: u32, bits: u32, alternating: bool) -> BigInt {
    let x2 = BigInt::from(u64::from(x) * u64::from(x));
    let mut power = (BigInt::from(1) << bits as usize) / BigInt::from(x);
    let mut sum = BigInt::zero();
    let mut k: u64 = 0;
    while !power.is_zero() {
        let term = &power / BigInt::from(2 * k + 1);
        if alternating && k % 2 == 1 {
            sum -= term;
        } else {
            sum += term;
        }
        power /= &x2;
        k += 1;
    }
    sum
}

/// Scale of a fixed-point computation plus the constants derived at that scale.
#[derive(Clone, Debug)]
pub struct FixedContext {
    bits: u32,
    one: Fixed,
    pi: Fixed,
    ln2: Fixed,
}

impl FixedContext {
    pub fn new(bits: u32) -> Self {
        let extended = bits + CONSTANT_GUARD_BITS;
        let pi = atan_inv(5, extended) * BigInt::from(16) - atan_inv(239, extended) * BigInt::from(4);
        let ln2 = atanh_inv(3, extended) * BigInt::from(2);
        Self {
            bits,
            one: Fixed(BigInt::from(1) << bits as usize),
            pi: Fixed(pi >> CONSTANT_GUARD_BITS as usize),
            ln2: Fixed(ln2 >> CONSTANT_GUARD_BITS as usize),
        }
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn one(&self) -> Fixed {
        self.one.clone()
    }

    pub fn pi(&self) -> &Fixed {
        &self.pi
    }

    pub fn ln2(&self) -> &Fixed {
        &self.ln2
    }

    pub fn from_int(&self, n: i64) -> Fixed {
        Fixed(BigInt::from(n) << self.bits as usize)
    }

    /// Exact conversion of a finite double (bits below the scale are dropped).
    pub fn from_f64(&self, x: f64) -> Result<Fixed, ArithError> {
        if !x.is_finite() {
            return Err(ArithError::NonFiniteInput(x.to_string()));
        }
        let (mantissa, exponent, sign) = num_traits::Float::integer_decode(x);
        let shift = i64::from(self.bits) + i64::from(exponent);
        let magnitude = BigInt::from(mantissa);
        let magnitude = if shift >= 0 {
            magnitude << shift as usize
        } else {
            magnitude >> shift.unsigned_abs() as usize
        };
        Ok(Fixed(if sign < 0 { -magnitude } else { magnitude }))
    }

    pub fn from_ratio(&self, r: &BigRational) -> Fixed {
        Fixed((r.numer() << self.bits as usize) / r.denom())
    }

    /// Round to the nearest representable double (up to truncation of the low bits).
    pub fn to_f64(&self, x: &Fixed) -> f64 {
        let magnitude = x.0.magnitude();
        if magnitude.is_zero() {
            return 0.0;
        }
        let len = magnitude.bits();
        let shift = len.saturating_sub(64);
        let top = (magnitude >> shift as usize).to_f64().unwrap_or(0.0);
        let exponent = shift as i64 - i64::from(self.bits);
        let half = (exponent / 2) as i32;
        let rest = (exponent - i64::from(half)) as i32;
        let value = top * 2f64.powi(half) * 2f64.powi(rest);
        if x.0.sign() == Sign::Minus {
            -value
        } else {
            value
        }
    }

    pub fn mul(&self, a: &Fixed, b: &Fixed) -> Fixed {
        Fixed(shr_trunc(&a.0 * &b.0, self.bits))
    }

    pub fn div(&self, a: &Fixed, b: &Fixed) -> Result<Fixed, ArithError> {
        if b.is_zero() {
            return Err(ArithError::DivisionByZero);
        }
        Ok(Fixed((&a.0 << self.bits as usize) / &b.0))
    }

    /// `e^x`, reduced by multiples of ln 2 before the Taylor series.
    pub fn exp(&self, x: &Fixed) -> Result<Fixed, ArithError> {
        let quotient = self.div(x, &self.ln2)?;
        let k: BigInt = (quotient.0 + (&self.one.0 >> 1usize)) >> self.bits as usize;
        let shift = k
            .to_i64()
            .ok_or_else(|| ArithError::Overflow(format!("exp shift {k}")))?;
        let r = x - &Fixed(&k * &self.ln2.0);

        let mut sum = self.one();
        let mut term = self.one();
        let mut j: u64 = 1;
        loop {
            term = self.mul(&term, &r).div_int(j);
            if term.is_zero() {
                break;
            }
            sum = sum + &term;
            j += 1;
        }

        if shift >= 0 {
            if shift as u64 > MAX_EXP_SHIFT {
                return Err(ArithError::Overflow(format!("exp shift {shift}")));
            }
            Ok(Fixed(sum.0 << shift as usize))
        } else {
            Ok(Fixed(sum.0 >> shift.unsigned_abs() as usize))
        }
    }

    /// Natural logarithm of a positive integer.
    pub fn ln_u64(&self, n: u64) -> Result<Fixed, ArithError> {
        if n == 0 {
            return Err(ArithError::Domain("ln"));
        }
        // n = 2^e · m with m in [1, 2)
        let e = 63 - n.leading_zeros();
        let m = Fixed((BigInt::from(n) << self.bits as usize) >> e as usize);
        let z = self.div(&(&m - &self.one), &(&m + &self.one))?;
        let z2 = self.mul(&z, &z);

        let mut sum = Fixed::default();
        let mut term = z;
        let mut k: u64 = 0;
        while !term.is_zero() {
            sum = sum + term.div_int(2 * k + 1);
            term = self.mul(&term, &z2);
            k += 1;
        }
        Ok(Fixed(&self.ln2.0 * BigInt::from(e)) + Fixed(sum.0 << 1usize))
    }

    /// `(sin x, cos x)` with reduction modulo 2π and quadrant folding.
    pub fn sin_cos(&self, x: &Fixed) -> (Fixed, Fixed) {
        let two_pi = &self.pi.0 << 1usize;
        let half_pi = &self.pi.0 >> 1usize;
        let quarter_pi = &self.pi.0 >> 2usize;

        let turns = x.0.div_floor(&two_pi);
        let r = &x.0 - &turns * &two_pi;
        let quadrant = (&r + &quarter_pi).div_floor(&half_pi);
        let r = Fixed(&r - &quadrant * &half_pi);
        let quadrant = (quadrant % BigInt::from(4)).to_u32().unwrap_or(0);

        let r2 = self.mul(&r, &r);

        let mut sin = r.clone();
        let mut term = r;
        let mut j: u64 = 1;
        loop {
            term = -self.mul(&term, &r2).div_int((2 * j) * (2 * j + 1));
            if term.is_zero() {
                break;
            }
            sin = sin + &term;
            j += 1;
        }

        let mut cos = self.one();
        let mut term = self.one();
        let mut j: u64 = 1;
        loop {
            term = -self.mul(&term, &r2).div_int((2 * j - 1) * (2 * j));
            if term.is_zero() {
                break;
            }
            cos = cos + &term;
            j += 1;
        }

        match quadrant {
            0 => (sin, cos),
            1 => (cos, -sin),
            2 => (-sin, -cos),
            _ => (-cos, sin),
        }
    }

    pub fn complex_from(&self, z: Complex64) -> Result<CFixed, ArithError> {
        Ok(CFixed::new(self.from_f64(z.re)?, self.from_f64(z.im)?))
    }

    pub fn complex_to_c64(&self, z: &CFixed) -> Complex64 {
        Complex64::new(self.to_f64(&z.re), self.to_f64(&z.im))
    }

    pub fn cmul(&self, a: &CFixed, b: &CFixed) -> CFixed {
        let re = &a.re.0 * &b.re.0 - &a.im.0 * &b.im.0;
        let im = &a.re.0 * &b.im.0 + &a.im.0 * &b.re.0;
        CFixed::new(Fixed(shr_trunc(re, self.bits)), Fixed(shr_trunc(im, self.bits)))
    }

    /// Real times complex.
    pub fn scale(&self, k: &Fixed, z: &CFixed) -> CFixed {
        CFixed::new(self.mul(k, &z.re), self.mul(k, &z.im))
    }

    pub fn cdiv(&self, a: &CFixed, b: &CFixed) -> Result<CFixed, ArithError> {
        // Products stay at scale 2^(2·bits) until the final division.
        let den = &b.re.0 * &b.re.0 + &b.im.0 * &b.im.0;
        if den.is_zero() {
            return Err(ArithError::DivisionByZero);
        }
        let re = &a.re.0 * &b.re.0 + &a.im.0 * &b.im.0;
        let im = &a.im.0 * &b.re.0 - &a.re.0 * &b.im.0;
        Ok(CFixed::new(
            Fixed((re << self.bits as usize) / &den),
            Fixed((im << self.bits as usize) / &den),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{LN_2, PI};

    fn ctx() -> FixedContext {
        FixedContext::new(128)
    }

    #[test]
    fn constants_match_doubles() {
        let c = ctx();
        assert!((c.to_f64(c.pi()) - PI).abs() < 1e-15);
        assert!((c.to_f64(c.ln2()) - LN_2).abs() < 1e-15);
    }

    #[test]
    fn f64_round_trip_is_exact() {
        let c = ctx();
        for x in [0.0, 1.0, -2.5, 14.134725141734694, 1e-20, -3.0e7] {
            assert_eq!(c.to_f64(&c.from_f64(x).unwrap()), x);
        }
    }

    #[test]
    fn rejects_non_finite() {
        assert!(ctx().from_f64(f64::NAN).is_err());
        assert!(ctx().from_f64(f64::INFINITY).is_err());
    }

    #[test]
    fn exp_and_ln_are_consistent() {
        let c = ctx();
        for n in [1u64, 2, 3, 10, 97, 1_000_003] {
            let ln = c.ln_u64(n).unwrap();
            assert!((c.to_f64(&ln) - (n as f64).ln()).abs() < 1e-14);
            let back = c.exp(&ln).unwrap();
            assert!((c.to_f64(&back) / n as f64 - 1.0).abs() < 1e-15);
        }
        assert!(c.ln_u64(0).is_err());
    }

    #[test]
    fn exp_of_negative_argument() {
        let c = ctx();
        let x = c.from_f64(-7.25).unwrap();
        let got = c.to_f64(&c.exp(&x).unwrap());
        assert!((got / (-7.25f64).exp() - 1.0).abs() < 1e-14);
    }

    #[test]
    fn sin_cos_across_quadrants() {
        let c = ctx();
        for x in [0.0, 0.5, 1.7, 3.0, -2.2, 4.9, 100.0, 123_456.789] {
            let (s, co) = c.sin_cos(&c.from_f64(x).unwrap());
            assert!((c.to_f64(&s) - f64::sin(x)).abs() < 1e-10, "sin {x}");
            assert!((c.to_f64(&co) - f64::cos(x)).abs() < 1e-10, "cos {x}");
        }
    }

    #[test]
    fn complex_division_inverts_multiplication() {
        let c = ctx();
        let a = c.complex_from(Complex64::new(1.5, -2.0)).unwrap();
        let b = c.complex_from(Complex64::new(-0.25, 3.0)).unwrap();
        let q = c.cdiv(&c.cmul(&a, &b), &b).unwrap();
        let q = c.complex_to_c64(&q);
        assert!((q - Complex64::new(1.5, -2.0)).norm() < 1e-15);
        assert_eq!(c.cdiv(&a, &CFixed::default()), Err(ArithError::DivisionByZero));
    }
}
