//! Products of symbols raised to integer powers.

use std::{cmp::Ordering, collections::{BTreeMap, BTreeSet}, fmt};

/// The name of the imaginary unit. Powers of this symbol are reduced using `i^2 = -1`.
pub const IMAGINARY: &str = "i";

/// A product of named symbols, each raised to a non-zero integer power, such as `x^2*y` or
/// `pi`. The empty product is the monomial `1`.
///
/// Symbols are kept in a sorted map, so two monomials with the same factors are structurally
/// identical regardless of the order the factors were multiplied in.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Monomial(BTreeMap<String, i32>);

impl Monomial {
    /// Returns the monomial `1`.
    pub fn one() -> Self {
        Self::default()
    }

    /// Returns the monomial consisting of a single symbol raised to the first power.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self(BTreeMap::from([(name.into(), 1)]))
    }

    /// Returns true if this is the monomial `1`.
    pub fn is_one(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the power of the given symbol in this monomial, or zero if it does not appear.
    pub fn power_of(&self, symbol: &str) -> i32 {
        self.0.get(symbol).copied().unwrap_or(0)
    }

    /// Returns an iterator over the symbols and their powers, in sorted order.
    pub fn factors(&self) -> impl Iterator<Item = (&str, i32)> {
        self.0.iter().map(|(name, power)| (name.as_str(), *power))
    }

    /// Returns the total degree of the monomial, i.e. the sum of all powers.
    pub fn degree(&self) -> i64 {
        self.0.values().map(|&power| power as i64).sum()
    }

    /// Returns true if any symbol is raised to a negative power.
    pub fn has_negative_power(&self) -> bool {
        self.0.values().any(|&power| power < 0)
    }

    /// Multiplies two monomials. The returned flag is true if the product picked up a factor of
    /// `-1` from reducing powers of [`IMAGINARY`].
    ///
    /// Returns [`None`] if a power overflows.
    pub fn checked_mul(&self, rhs: &Self) -> Option<(Self, bool)> {
        let mut factors = self.0.clone();
        for (name, power) in &rhs.0 {
            let entry = factors.entry(name.clone()).or_insert(0);
            *entry = entry.checked_add(*power)?;
        }
        Some(Self(factors).reduce())
    }

    /// Returns the reciprocal of the monomial. The returned flag is true if the reciprocal picked
    /// up a factor of `-1` (`1/i = -i`).
    ///
    /// Returns [`None`] if a power is [`i32::MIN`], whose negation does not fit.
    pub fn checked_recip(&self) -> Option<(Self, bool)> {
        let factors = self.0.iter()
            .map(|(name, power)| Some((name.clone(), power.checked_neg()?)))
            .collect::<Option<_>>()?;
        Some(Self(factors).reduce())
    }

    /// Raises the monomial to the given power. The returned flag is true if the result picked up
    /// a factor of `-1` from reducing powers of [`IMAGINARY`].
    ///
    /// Returns [`None`] if a power overflows.
    pub fn checked_pow(&self, exp: i32) -> Option<(Self, bool)> {
        let mut factors = BTreeMap::new();
        for (name, power) in &self.0 {
            factors.insert(name.clone(), power.checked_mul(exp)?);
        }
        Some(Self(factors).reduce())
    }

    /// Returns the largest monomial with non-negative powers that divides both monomials, i.e.
    /// the minimum positive power of each shared symbol.
    pub fn gcd(&self, rhs: &Self) -> Self {
        let factors = self.0.iter()
            .filter(|(name, _)| name.as_str() != IMAGINARY)
            .filter_map(|(name, &power)| {
                let shared = power.min(rhs.power_of(name));
                (shared > 0).then(|| (name.clone(), shared))
            })
            .collect();
        Self(factors)
    }

    /// Compares monomials in graded lexicographic order, with the monomial of higher degree
    /// ordered first. Ties are broken by the power of each symbol in alphabetical order, higher
    /// power first, so `a^2 < a*b < b^2`.
    pub fn graded_cmp(&self, rhs: &Self) -> Ordering {
        rhs.degree().cmp(&self.degree()).then_with(|| {
            self.0.keys()
                .chain(rhs.0.keys())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .map(|name| rhs.power_of(name).cmp(&self.power_of(name)))
                .find(|ord| ord.is_ne())
                .unwrap_or(Ordering::Equal)
        })
    }

    /// Drops symbols with zero power and reduces the power of [`IMAGINARY`] modulo 4.
    fn reduce(mut self) -> (Self, bool) {
        self.0.retain(|_, power| *power != 0);

        let mut negate = false;
        if let Some(power) = self.0.get(IMAGINARY).copied() {
            match power.rem_euclid(4) {
                0 => { self.0.remove(IMAGINARY); },
                1 => { self.0.insert(IMAGINARY.to_string(), 1); },
                2 => {
                    self.0.remove(IMAGINARY);
                    negate = true;
                },
                _ => {
                    self.0.insert(IMAGINARY.to_string(), 1);
                    negate = true;
                },
            }
        }

        (self, negate)
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_one() {
            return write!(f, "1");
        }

        let mut iter = self.0.iter();
        let write_factor = |f: &mut fmt::Formatter<'_>, (name, power): (&String, &i32)| {
            if *power == 1 {
                write!(f, "{}", name)
            } else {
                write!(f, "{}^{}", name, power)
            }
        };

        if let Some(first) = iter.next() {
            write_factor(f, first)?;
            for factor in iter {
                write!(f, "*")?;
                write_factor(f, factor)?;
            }
        }
        Ok(())
    }
}
