//! The exact value type: a sum of monomials with rational coefficients.

use crate::{monomial::Monomial, primitive::{exact_sqrt, int, rational_gcd}};
use rug::{ops::Pow, Integer, Rational};
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    ops::{Add, AddAssign, Neg, Sub},
};

/// The maximum exponent that a value with more than one term can be raised to. Expanding larger
/// powers of sums grows the number of terms too quickly to be useful.
const MAX_EXPANDED_POWER: i32 = 64;

/// The maximum number of terms a power of a multi-term value may expand to.
const MAX_EXPANDED_TERMS: u128 = 4096;

/// The maximum number of term-by-term multiplications in a single product.
const MAX_PRODUCT_PAIRS: usize = 1 << 16;

/// The maximum estimated size, in bits, of a coefficient produced by a product or power.
const MAX_COEFFICIENT_BITS: u64 = 1 << 16;

/// Returns the number of bits a coefficient contributes to the size of its products. Units
/// contribute nothing, since multiplying by them never grows a coefficient.
fn coefficient_bits(coeff: &Rational) -> u64 {
    let bits = |n: &Integer| match n.significant_bits() {
        0 | 1 => 0,
        bits => u64::from(bits),
    };
    bits(coeff.numer()) + bits(coeff.denom())
}

/// Returns true if expanding a sum of `terms` terms to the power `exp` produces at most
/// [`MAX_EXPANDED_TERMS`] terms. The expansion has at most `binomial(terms + exp - 1, exp)`
/// terms.
fn expansion_fits(terms: usize, exp: u32) -> bool {
    let terms = terms as u128;
    let mut count = 1u128;
    for k in 1..=u128::from(exp) {
        count = count * (terms - 1 + k) / k;
        if count > MAX_EXPANDED_TERMS {
            return false;
        }
    }
    true
}

/// An exact value: a finite sum of [`Monomial`]s, each with a non-zero [`Rational`]
/// coefficient, such as `3`, `-1/2`, `pi`, or `a^2 + 2*a*b + b^2`.
///
/// Zero is the empty sum. The terms are stored in a sorted map keyed by monomial, so two values
/// that are mathematically equal as polynomials are also structurally equal, and compare and hash
/// the same.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Value {
    terms: BTreeMap<Monomial, Rational>,
}

impl Value {
    /// Returns the value `0`.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Returns the value `1`.
    pub fn one() -> Self {
        Self::from(1)
    }

    /// Returns a value consisting of the given symbol.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::from_term(Rational::from(1), Monomial::symbol(name))
    }

    /// Returns the value `coeff * monomial`.
    pub fn from_term(coeff: Rational, monomial: Monomial) -> Self {
        let mut value = Self::zero();
        value.add_term(monomial, coeff);
        value
    }

    /// Returns true if the value is zero.
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns true if the value is one.
    pub fn is_one(&self) -> bool {
        self.as_rational().map_or(false, |r| r == 1)
    }

    /// Returns true if the value contains no symbols.
    pub fn is_constant(&self) -> bool {
        self.terms.keys().all(Monomial::is_one)
    }

    /// Returns the number of terms in the value. Zero has no terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if the value is zero.
    pub fn is_empty(&self) -> bool {
        self.is_zero()
    }

    /// If the value contains no symbols, returns it as a [`Rational`].
    pub fn as_rational(&self) -> Option<Rational> {
        match self.terms.len() {
            0 => Some(Rational::new()),
            1 => {
                let (monomial, coeff) = self.terms.iter().next()?;
                monomial.is_one().then(|| coeff.clone())
            },
            _ => None,
        }
    }

    /// If the value is an integer, returns it as an [`i32`], if it fits.
    pub fn as_i32(&self) -> Option<i32> {
        let rational = self.as_rational()?;
        if *rational.denom() != 1 {
            return None;
        }
        rational.numer().to_i32()
    }

    /// If the value is a single term, returns its coefficient and monomial.
    pub fn as_term(&self) -> Option<(&Rational, &Monomial)> {
        if self.terms.len() != 1 {
            return None;
        }
        self.terms.iter().next().map(|(monomial, coeff)| (coeff, monomial))
    }

    /// If the value is a single monomial with coefficient one, such as `x^2*y`, returns the
    /// monomial.
    pub fn as_monomial(&self) -> Option<&Monomial> {
        self.as_term().and_then(|(coeff, monomial)| (*coeff == 1).then_some(monomial))
    }

    /// If the value is a rational multiple of the given symbol, such as `3/2*pi`, returns the
    /// multiple. Zero is considered a multiple of every symbol.
    pub fn as_multiple_of(&self, symbol: &str) -> Option<Rational> {
        if self.is_zero() {
            return Some(Rational::new());
        }
        let (coeff, monomial) = self.as_term()?;
        (monomial == &Monomial::symbol(symbol)).then(|| coeff.clone())
    }

    /// Returns an iterator over the terms of the value, as `(monomial, coefficient)` pairs, in
    /// the canonical storage order.
    pub fn terms(&self) -> impl Iterator<Item = (&Monomial, &Rational)> {
        self.terms.iter()
    }

    /// Returns the set of symbols that appear in the value.
    pub fn symbols(&self) -> BTreeSet<&str> {
        self.terms.keys()
            .flat_map(|monomial| monomial.factors().map(|(name, _)| name))
            .collect()
    }

    /// Returns true if the single-term value has a negative coefficient. Multi-term values are
    /// never considered negative.
    pub fn is_negative_term(&self) -> bool {
        self.as_term().map_or(false, |(coeff, _)| coeff.cmp0().is_lt())
    }

    /// Returns the rational content of the value: the positive greatest common divisor of all
    /// coefficients. The content of zero is zero.
    pub fn content(&self) -> Rational {
        self.terms.values()
            .fold(Rational::new(), |acc, coeff| rational_gcd(&acc, coeff))
    }

    /// Returns the largest monomial with non-negative powers that divides every term.
    pub fn monomial_content(&self) -> Monomial {
        let mut iter = self.terms.keys();
        let Some(first) = iter.next() else {
            return Monomial::one();
        };
        iter.fold(first.gcd(first), |acc, monomial| acc.gcd(monomial))
    }

    /// Adds `coeff * monomial` to this value, removing the term if its coefficient cancels.
    fn add_term(&mut self, monomial: Monomial, coeff: Rational) {
        if coeff.cmp0().is_eq() {
            return;
        }
        match self.terms.get_mut(&monomial) {
            Some(existing) => {
                *existing += coeff;
                if existing.cmp0().is_eq() {
                    self.terms.remove(&monomial);
                }
            },
            None => {
                self.terms.insert(monomial, coeff);
            },
        }
    }

    /// Multiplies every term by the given rational.
    pub fn scale(&self, factor: &Rational) -> Self {
        if factor.cmp0().is_eq() {
            return Self::zero();
        }
        Self {
            terms: self.terms.iter()
                .map(|(monomial, coeff)| (monomial.clone(), Rational::from(coeff * factor)))
                .collect(),
        }
    }

    /// Returns the estimated size in bits of the largest coefficient.
    fn max_coefficient_bits(&self) -> u64 {
        self.terms.values().map(coefficient_bits).max().unwrap_or(0)
    }

    /// Multiplies two values, expanding the product.
    ///
    /// Returns [`None`] if a power overflows, or if the product would be too large: too many
    /// pairs of terms to multiply, or coefficients that grow past a fixed size.
    pub fn checked_mul(&self, rhs: &Self) -> Option<Self> {
        let (lhs_bits, rhs_bits) = (self.max_coefficient_bits(), rhs.max_coefficient_bits());
        if self.len().saturating_mul(rhs.len()) > MAX_PRODUCT_PAIRS
            || lhs_bits.min(rhs_bits) > 0 && lhs_bits + rhs_bits > MAX_COEFFICIENT_BITS
        {
            return None;
        }

        let mut product = Self::zero();
        for (lhs_monomial, lhs_coeff) in &self.terms {
            for (rhs_monomial, rhs_coeff) in &rhs.terms {
                let (monomial, negate) = lhs_monomial.checked_mul(rhs_monomial)?;
                let coeff = Rational::from(lhs_coeff * rhs_coeff);
                product.add_term(monomial, if negate { -coeff } else { coeff });
            }
        }
        Some(product)
    }

    /// Returns the reciprocal of the value. This is only defined for non-zero values with a
    /// single term whose powers can be negated; otherwise, [`None`] is returned.
    pub fn checked_recip(&self) -> Option<Self> {
        let (coeff, monomial) = self.as_term()?;
        let (monomial, negate) = monomial.checked_recip()?;
        let coeff = Rational::from(coeff.recip_ref());
        Some(Self::from_term(if negate { -coeff } else { coeff }, monomial))
    }

    /// Divides this value by another, if the division is exact.
    ///
    /// The division is exact if:
    ///
    /// - `rhs` is a non-zero constant,
    /// - `rhs` is a single term, and dividing by it leaves no symbol with a negative power that
    /// was not already negative in `self`, or
    /// - `self` is a constant multiple of `rhs`, such as `(2a + 2b) / (a + b) = 2`.
    ///
    /// Returns [`None`] otherwise, including when `rhs` is zero.
    pub fn checked_div(&self, rhs: &Self) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }

        if let Some(divisor) = rhs.as_rational() {
            return Some(self.scale(&Rational::from(divisor.recip_ref())));
        }

        if rhs.len() == 1 {
            let quotient = self.checked_mul(&rhs.checked_recip()?)?;
            let introduces_negative = quotient.terms.keys()
                .flat_map(Monomial::factors)
                .any(|(name, power)| power < 0 && self.terms.keys().all(|m| m.power_of(name) >= 0));
            return (!introduces_negative).then_some(quotient);
        }

        // constant multiple: compare the ratio of the first terms against every other term
        if self.terms.len() != rhs.terms.len() {
            return None;
        }
        let mut pairs = self.terms.iter().zip(rhs.terms.iter());
        let ((lhs_monomial, lhs_coeff), (rhs_monomial, rhs_coeff)) = pairs.next()?;
        if lhs_monomial != rhs_monomial {
            return None;
        }
        let ratio = Rational::from(lhs_coeff / rhs_coeff);
        for ((lhs_monomial, lhs_coeff), (rhs_monomial, rhs_coeff)) in pairs {
            if lhs_monomial != rhs_monomial || *lhs_coeff != Rational::from(rhs_coeff * &ratio) {
                return None;
            }
        }
        Some(Self::from(ratio))
    }

    /// Raises the value to an integer power.
    ///
    /// Returns [`None`] for `0^0`, for negative powers of values that have no reciprocal, and for
    /// powers whose result would be too large: a power of a symbol that overflows, a coefficient
    /// that grows past a fixed size, or an expansion with too many terms.
    pub fn pow(&self, exp: i32) -> Option<Self> {
        if exp == 0 {
            return (!self.is_zero()).then(Self::one);
        }
        if exp < 0 {
            return self.checked_recip()?.pow(exp.checked_neg()?);
        }
        if self.is_zero() {
            return Some(Self::zero());
        }

        if exp > 1 && self.max_coefficient_bits().saturating_mul(exp as u64) > MAX_COEFFICIENT_BITS {
            return None;
        }

        if let Some((coeff, monomial)) = self.as_term() {
            let (monomial, negate) = monomial.checked_pow(exp)?;
            let coeff = Rational::from(coeff.pow(exp as u32));
            return Some(Self::from_term(if negate { -coeff } else { coeff }, monomial));
        }

        if exp > MAX_EXPANDED_POWER || !expansion_fits(self.len(), exp as u32) {
            return None;
        }

        // exponentiation by squaring
        let mut result = Self::one();
        let mut base = self.clone();
        let mut exp = exp as u32;
        while exp > 0 {
            if exp & 1 == 1 {
                result = result.checked_mul(&base)?;
            }
            exp >>= 1;
            if exp > 0 {
                base = base.checked_mul(&base)?;
            }
        }
        Some(result)
    }

    /// Returns the exact square root of the value, if it is a non-negative rational whose
    /// numerator and denominator are both perfect squares.
    pub fn sqrt(&self) -> Option<Self> {
        let rational = self.as_rational()?;
        let numer = exact_sqrt(rational.numer())?;
        let denom = exact_sqrt(rational.denom())?;
        Some(Self::from(Rational::from((numer, denom))))
    }

    /// Returns the absolute value of a constant value.
    pub fn abs(&self) -> Option<Self> {
        self.as_rational().map(|r| Self::from(r.abs()))
    }
}

/// Writes a single term with the given coefficient magnitude.
fn write_term(f: &mut fmt::Formatter<'_>, coeff: &Rational, monomial: &Monomial) -> fmt::Result {
    if monomial.is_one() {
        write!(f, "{}", coeff)
    } else if *coeff == 1 {
        write!(f, "{}", monomial)
    } else {
        write!(f, "{}*{}", coeff, monomial)
    }
}

/// Terms are written in order of decreasing degree, with the constant term last, e.g.
/// `a^2 + 2*a*b + b^2 - 1`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut terms = self.terms.iter().collect::<Vec<_>>();
        terms.sort_by(|(lhs, _), (rhs, _)| {
            lhs.is_one().cmp(&rhs.is_one()).then_with(|| lhs.graded_cmp(rhs))
        });

        for (idx, (monomial, coeff)) in terms.into_iter().enumerate() {
            let negative = coeff.cmp0().is_lt();
            match (idx, negative) {
                (0, true) => write!(f, "-")?,
                (0, false) => (),
                (_, true) => write!(f, " - ")?,
                (_, false) => write!(f, " + ")?,
            }
            write_term(f, &Rational::from(coeff.abs_ref()), monomial)?;
        }
        Ok(())
    }
}

impl From<Rational> for Value {
    fn from(rational: Rational) -> Self {
        Self::from_term(rational, Monomial::one())
    }
}

impl From<Integer> for Value {
    fn from(integer: Integer) -> Self {
        Self::from(Rational::from(integer))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::from(int(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::from(int(n))
    }
}

impl Add<&Value> for &Value {
    type Output = Value;

    fn add(self, rhs: &Value) -> Value {
        let mut sum = self.clone();
        sum += rhs;
        sum
    }
}

impl Add for Value {
    type Output = Value;

    fn add(mut self, rhs: Value) -> Value {
        self += &rhs;
        self
    }
}

impl AddAssign<&Value> for Value {
    fn add_assign(&mut self, rhs: &Value) {
        for (monomial, coeff) in &rhs.terms {
            self.add_term(monomial.clone(), coeff.clone());
        }
    }
}

impl Sub<&Value> for &Value {
    type Output = Value;

    fn sub(self, rhs: &Value) -> Value {
        self + &-rhs
    }
}

impl Sub for Value {
    type Output = Value;

    fn sub(self, rhs: Value) -> Value {
        &self - &rhs
    }
}

impl Neg for &Value {
    type Output = Value;

    fn neg(self) -> Value {
        Value {
            terms: self.terms.iter()
                .map(|(monomial, coeff)| (monomial.clone(), Rational::from(-coeff)))
                .collect(),
        }
    }
}

impl Neg for Value {
    type Output = Value;

    fn neg(mut self) -> Value {
        for coeff in self.terms.values_mut() {
            *coeff = Rational::from(-&*coeff);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::primitive::rational;
    use pretty_assertions::assert_eq;
    use super::*;

    fn sym(name: &str) -> Value {
        Value::symbol(name)
    }

    fn mul(lhs: &Value, rhs: &Value) -> Value {
        lhs.checked_mul(rhs).unwrap()
    }

    fn times(n: i32, value: &Value) -> Value {
        value.scale(&Rational::from(n))
    }

    #[test]
    fn add_cancels_terms() {
        let a = sym("a") + sym("b");
        let b = sym("a") - sym("b");
        assert_eq!(&a + &b, times(2, &sym("a")));
        assert!((&a - &a).is_zero());
    }

    #[test]
    fn multiply_expands() {
        let sum = sym("a") + sym("b");
        let diff = sym("a") - sym("b");
        let expected = mul(&sym("a"), &sym("a")) - mul(&sym("b"), &sym("b"));
        assert_eq!(mul(&sum, &diff), expected);
    }

    #[test]
    fn imaginary_products() {
        let i = sym("i");
        assert_eq!(mul(&i, &i), Value::from(-1));
        assert_eq!(i.checked_recip().unwrap(), -sym("i"));
    }

    #[test]
    fn reciprocal_requires_single_term() {
        assert_eq!(Value::from(4).checked_recip(), Some(Value::from(rational(1, 4))));
        assert_eq!(Value::zero().checked_recip(), None);
        assert_eq!((sym("a") + sym("b")).checked_recip(), None);
    }

    #[test]
    fn exact_division() {
        let two_a_b = times(2, &mul(&sym("a"), &sym("b")));
        assert_eq!(two_a_b.checked_div(&sym("a")), Some(times(2, &sym("b"))));
        assert_eq!(sym("a").checked_div(&sym("b")), None);
        assert_eq!(
            sym("a").checked_div(&Value::from(2)),
            Some(sym("a").scale(&rational(1, 2))),
        );

        let sum = sym("a") + sym("b");
        let twice = times(2, &sum);
        assert_eq!(twice.checked_div(&sum), Some(Value::from(2)));
        assert_eq!((sym("a") + Value::from(1)).checked_div(&sum), None);
        assert_eq!(sum.checked_div(&Value::zero()), None);
    }

    #[test]
    fn powers() {
        let sum = sym("a") + sym("b");
        assert_eq!(
            sum.pow(2).unwrap(),
            mul(&sym("a"), &sym("a")) + times(2, &mul(&sym("a"), &sym("b"))) + mul(&sym("b"), &sym("b")),
        );
        assert_eq!(Value::from(2).pow(-3), Some(Value::from(rational(1, 8))));
        assert_eq!(Value::zero().pow(3), Some(Value::zero()));
        assert_eq!(Value::zero().pow(0), None);
        assert_eq!(Value::zero().pow(-1), None);
        assert_eq!(sum.pow(-1), None);
    }

    #[test]
    fn overflowing_products() {
        let big = sym("x").pow(2_000_000_000).unwrap();
        assert_eq!(big.checked_mul(&big), None);

        let lowest = sym("x").pow(-i32::MAX).unwrap().checked_mul(&sym("x").pow(-1).unwrap()).unwrap();
        assert_eq!(lowest.checked_recip(), None);
        assert_eq!(Value::one().checked_div(&lowest), None);
    }

    #[test]
    fn oversized_results() {
        assert_eq!(Value::from(2).pow(i32::MAX), None);
        assert_eq!(Value::from(2).pow(1000), Some(Value::from(Integer::from(1) << 1000u32)));
        assert_eq!(Value::one().pow(i32::MAX), Some(Value::one()));

        let eight = "abcdefgh".chars()
            .map(|c| sym(&c.to_string()))
            .fold(Value::zero(), |acc, term| acc + term);
        assert_eq!(eight.pow(64), None);
        assert_eq!(eight.pow(2).map(|square| square.len()), Some(36));
    }

    #[test]
    fn square_roots() {
        assert_eq!(Value::from(rational(9, 4)).sqrt(), Some(Value::from(rational(3, 2))));
        assert_eq!(Value::from(2).sqrt(), None);
        assert_eq!(Value::from(-4).sqrt(), None);
        assert_eq!(sym("x").sqrt(), None);
    }

    #[test]
    fn content() {
        let value = times(4, &sym("x")) + times(6, &sym("y"));
        assert_eq!(value.content(), rational(2, 1));
        let value = mul(&sym("x"), &sym("y")) + mul(&sym("x"), &sym("x"));
        assert_eq!(value.monomial_content(), Monomial::symbol("x"));
    }

    #[test]
    fn display() {
        let a = sym("a");
        let b = sym("b");
        let value = mul(&a, &a) + times(2, &mul(&a, &b)) + mul(&b, &b) - Value::one();
        assert_eq!(value.to_string(), "a^2 + 2*a*b + b^2 - 1");
        assert_eq!(sym("x").scale(&rational(3, 2)).to_string(), "3/2*x");
        assert_eq!(sym("x").checked_recip().unwrap().to_string(), "x^-1");
        assert_eq!((times(-1, &sym("y")) + Value::from(2)).to_string(), "-y + 2");
        assert_eq!(Value::zero().to_string(), "0");
    }

    #[test]
    fn multiples_of_pi() {
        let value = sym("pi").scale(&rational(3, 2));
        assert_eq!(value.as_multiple_of("pi"), Some(rational(3, 2)));
        assert_eq!(Value::zero().as_multiple_of("pi"), Some(rational(0, 1)));
        assert_eq!(sym("x").as_multiple_of("pi"), None);
    }
}
