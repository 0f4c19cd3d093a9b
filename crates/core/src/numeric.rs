//! High-precision numeric engine
//!
//! Every quality-domain value is a [`Scalar`] created by an [`Engine`], and
//! every engine carries one immutable [`Precision`] chosen at startup. There is
//! no process-wide precision setting: two engines built with different
//! precisions can coexist without affecting each other.
//!
//! The engine is a thin layer over `astro-float`. It fixes the precision and
//! rounding mode for all operations, owns the constants cache needed by the
//! transcendental functions, and turns NaN or infinite results into
//! [`QualityError::Domain`].

use core::fmt;

use astro_float::{BigFloat, Consts, Radix, RoundingMode};

use crate::error::{QualityError, Result};
use crate::params::GUARD_BITS;

/// log2(10) as a fraction, for converting decimal digits to bits
const LOG2_10_NUM: u128 = 332_192_809_489;
const LOG2_10_DEN: u128 = 100_000_000_000;

/// Working precision of an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Precision {
    digits: usize,
    bits: usize,
}

impl Precision {
    /// Precision holding at least `digits` significant decimal digits
    ///
    /// The binary precision is `ceil(digits * log2(10))` plus a few guard bits.
    pub fn from_digits(digits: usize) -> Self {
        let digits = digits.max(1);
        let bits = (digits as u128 * LOG2_10_NUM).div_ceil(LOG2_10_DEN) as usize + GUARD_BITS;
        Self { digits, bits }
    }

    /// Significant decimal digits used when rendering values
    pub fn digits(&self) -> usize {
        self.digits
    }

    /// Binary precision of every value the engine creates
    pub fn bits(&self) -> usize {
        self.bits
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::from_digits(crate::params::DEFAULT_PRECISION_DIGITS)
    }
}

/// A real number carried at an engine's working precision
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub struct Scalar(BigFloat);

impl Scalar {
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Strictly greater than zero
    pub fn is_positive(&self) -> bool {
        !self.0.is_zero() && self.0.is_positive()
    }
}

/// Arithmetic at a fixed precision
pub struct Engine {
    precision: Precision,
    rm: RoundingMode,
    consts: Consts,
}

impl Engine {
    /// Create an engine working at `precision`
    pub fn new(precision: Precision) -> Result<Self> {
        let consts = Consts::new().map_err(|e| QualityError::Engine(format!("{:?}", e)))?;
        Ok(Self {
            precision,
            rm: RoundingMode::ToEven,
            consts,
        })
    }

    #[inline]
    fn p(&self) -> usize {
        self.precision.bits
    }

    fn checked(op: &'static str, x: BigFloat) -> Result<Scalar> {
        if x.is_nan() {
            return Err(QualityError::Domain {
                op,
                reason: "result is not a number".to_string(),
            });
        }
        if x.is_inf() {
            return Err(QualityError::Domain {
                op,
                reason: "result is infinite".to_string(),
            });
        }
        Ok(Scalar(x))
    }

    /// Round a result computed with guard bits down to the working precision
    ///
    /// Transcendental functions are evaluated at `p + GUARD_BITS` without
    /// rounding: correctly rounding an exactly representable result (`4^0.5`)
    /// never terminates in `astro-float`.
    fn round_guarded(&self, op: &'static str, mut x: BigFloat) -> Result<Scalar> {
        if !x.is_nan() && !x.is_inf() {
            x.set_precision(self.p(), self.rm)
                .map_err(|e| QualityError::Engine(format!("{:?}", e)))?;
        }
        Self::checked(op, x)
    }

    pub fn from_u64(&self, value: u64) -> Scalar {
        Scalar(BigFloat::from_u64(value, self.p()))
    }

    pub fn zero(&self) -> Scalar {
        self.from_u64(0)
    }

    pub fn one(&self) -> Scalar {
        self.from_u64(1)
    }

    /// `2^exp`, exact at any precision
    pub fn two_pow(&self, exp: u32) -> Scalar {
        let two = BigFloat::from_u8(2, self.p());
        Scalar(BigFloat::powi(&two, exp as usize, self.p(), self.rm))
    }

    /// `10^exp`
    pub fn ten_pow(&self, exp: usize) -> Scalar {
        let ten = BigFloat::from_u8(10, self.p());
        Scalar(BigFloat::powi(&ten, exp, self.p(), self.rm))
    }

    pub fn add(&self, x: &Scalar, y: &Scalar) -> Result<Scalar> {
        Self::checked("add", BigFloat::add(&x.0, &y.0, self.p(), self.rm))
    }

    pub fn sub(&self, x: &Scalar, y: &Scalar) -> Result<Scalar> {
        Self::checked("sub", BigFloat::sub(&x.0, &y.0, self.p(), self.rm))
    }

    pub fn mul(&self, x: &Scalar, y: &Scalar) -> Result<Scalar> {
        Self::checked("mul", BigFloat::mul(&x.0, &y.0, self.p(), self.rm))
    }

    pub fn div(&self, x: &Scalar, y: &Scalar) -> Result<Scalar> {
        if y.is_zero() {
            return Err(QualityError::Domain {
                op: "div",
                reason: "division by zero".to_string(),
            });
        }
        Self::checked("div", BigFloat::div(&x.0, &y.0, self.p(), self.rm))
    }

    /// `1 / x`
    pub fn recip(&self, x: &Scalar) -> Result<Scalar> {
        if x.is_zero() {
            return Err(QualityError::Domain {
                op: "recip",
                reason: "reciprocal of zero".to_string(),
            });
        }
        Self::checked("recip", BigFloat::reciprocal(&x.0, self.p(), self.rm))
    }

    pub fn neg(&self, x: &Scalar) -> Scalar {
        Scalar(BigFloat::neg(&x.0))
    }

    pub fn abs(&self, x: &Scalar) -> Scalar {
        Scalar(BigFloat::abs(&x.0))
    }

    /// `x^y` for real `x > 0`
    pub fn pow(&mut self, x: &Scalar, y: &Scalar) -> Result<Scalar> {
        if !x.is_positive() {
            return Err(QualityError::Domain {
                op: "pow",
                reason: "base must be positive".to_string(),
            });
        }
        let p = self.p() + GUARD_BITS;
        let r = BigFloat::pow(&x.0, &y.0, p, RoundingMode::None, &mut self.consts);
        self.round_guarded("pow", r)
    }

    /// Base-2 logarithm of `x > 0`
    pub fn log2(&mut self, x: &Scalar) -> Result<Scalar> {
        if !x.is_positive() {
            return Err(QualityError::Domain {
                op: "log2",
                reason: "argument must be positive".to_string(),
            });
        }
        let p = self.p() + GUARD_BITS;
        let r = BigFloat::log2(&x.0, p, RoundingMode::None, &mut self.consts);
        self.round_guarded("log2", r)
    }

    /// Parse `0x`-prefixed hex text as a base-16 integer at the working precision
    ///
    /// Exact whenever the integer fits in the binary precision.
    pub fn parse_hex(&mut self, text: &str) -> Result<Scalar> {
        let invalid = || QualityError::InvalidHex(text.to_string());
        let digits = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .filter(|d| !d.is_empty() && d.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(invalid)?;

        let p = self.p();
        let value = BigFloat::parse(
            &digits.to_ascii_lowercase(),
            Radix::Hex,
            p,
            self.rm,
            &mut self.consts,
        );
        if value.is_nan() || value.is_inf() {
            return Err(invalid());
        }
        Ok(Scalar(value))
    }

    /// `|x - y| / max(|x|, |y|)`, zero when both are zero
    pub fn relative_difference(&self, x: &Scalar, y: &Scalar) -> Result<Scalar> {
        let diff = self.abs(&self.sub(x, y)?);
        if diff.is_zero() {
            return Ok(self.zero());
        }
        let (ax, ay) = (self.abs(x), self.abs(y));
        let scale = if ax > ay { ax } else { ay };
        self.div(&diff, &scale)
    }

    /// Whether `x` and `y` agree to `digits` significant decimal digits
    pub fn agree_to(&self, x: &Scalar, y: &Scalar, digits: usize) -> Result<bool> {
        let tolerance = self.recip(&self.ten_pow(digits))?;
        Ok(self.relative_difference(x, y)? <= tolerance)
    }

    /// Decimal rendering with the precision's significant digits
    pub fn format(&mut self, x: &Scalar) -> Result<String> {
        let text = BigFloat::format(&x.0, Radix::Dec, self.rm, &mut self.consts)
            .map_err(|e| QualityError::Engine(format!("{:?}", e)))?;
        Ok(render_general(&text, self.precision.digits))
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("precision", &self.precision)
            .finish_non_exhaustive()
    }
}

/// Re-render decimal text in `%g` style with at most `digits` significant digits
///
/// Fixed notation is used while the decimal exponent lies in `[-4, digits)`,
/// scientific notation otherwise. Trailing zeros are dropped. Text that is not
/// a plain decimal number (`inf`, `NaN`) is returned unchanged.
pub(crate) fn render_general(text: &str, digits: usize) -> String {
    let digits = digits.max(1);
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (mantissa, exp) = match body.find(['e', 'E']) {
        Some(i) => (&body[..i], body[i + 1..].parse::<i64>()),
        None => (body, Ok(0)),
    };
    let Ok(exp) = exp else {
        return text.to_string();
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return text.to_string();
    }
    if !int_part
        .bytes()
        .chain(frac_part.bytes())
        .all(|b| b.is_ascii_digit())
    {
        return text.to_string();
    }

    let mut all: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes())
        .map(|b| b - b'0')
        .collect();
    // value = 0.d1 d2 d3 ... * 10^point
    let mut point = int_part.len() as i64 + exp;

    let lead = all.iter().take_while(|&&d| d == 0).count();
    if lead == all.len() {
        return "0".to_string();
    }
    all.drain(..lead);
    point -= lead as i64;

    if all.len() > digits {
        let round_up = all[digits] >= 5;
        all.truncate(digits);
        if round_up {
            let mut carry = true;
            for d in all.iter_mut().rev() {
                if *d == 9 {
                    *d = 0;
                } else {
                    *d += 1;
                    carry = false;
                    break;
                }
            }
            if carry {
                all.insert(0, 1);
                all.truncate(digits);
                point += 1;
            }
        }
    }
    while all.last() == Some(&0) {
        all.pop();
    }

    let chars: String = all.iter().map(|d| char::from(b'0' + d)).collect();
    let sci = point - 1;
    let mut out = String::with_capacity(chars.len() + 8);
    if negative {
        out.push('-');
    }

    if sci < -4 || sci >= digits as i64 {
        out.push_str(&chars[..1]);
        if chars.len() > 1 {
            out.push('.');
            out.push_str(&chars[1..]);
        }
        let sign = if sci < 0 { '-' } else { '+' };
        out.push_str(&format!("e{}{:02}", sign, sci.unsigned_abs()));
    } else if sci >= 0 {
        let int_len = sci as usize + 1;
        if chars.len() <= int_len {
            out.push_str(&chars);
            out.extend(core::iter::repeat_n('0', int_len - chars.len()));
        } else {
            out.push_str(&chars[..int_len]);
            out.push('.');
            out.push_str(&chars[int_len..]);
        }
    } else {
        out.push_str("0.");
        out.extend(core::iter::repeat_n('0', (-sci - 1) as usize));
        out.push_str(&chars);
    }
    out
}
