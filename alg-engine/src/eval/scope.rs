use std::collections::{BTreeMap, HashMap};

/// Supplies values for the symbols of an expression during evaluation.
///
/// Symbols not found in the scope fall back to the constants of the numeric type (see
/// [`Numeric::constant`](super::Numeric::constant)).
pub trait Scope<N> {
    /// Returns the value bound to the symbol.
    fn get(&self, name: &str) -> Option<N>;
}

impl<N: Clone> Scope<N> for HashMap<String, N> {
    fn get(&self, name: &str) -> Option<N> {
        HashMap::get(self, name).cloned()
    }
}

impl<N: Clone> Scope<N> for HashMap<&str, N> {
    fn get(&self, name: &str) -> Option<N> {
        HashMap::get(self, name).cloned()
    }
}

impl<N: Clone> Scope<N> for BTreeMap<String, N> {
    fn get(&self, name: &str) -> Option<N> {
        BTreeMap::get(self, name).cloned()
    }
}

impl<N: Clone> Scope<N> for [(&str, N)] {
    fn get(&self, name: &str) -> Option<N> {
        self.iter()
            .find(|(symbol, _)| *symbol == name)
            .map(|(_, value)| value.clone())
    }
}

impl<N: Clone, const LEN: usize> Scope<N> for [(&str, N); LEN] {
    fn get(&self, name: &str) -> Option<N> {
        Scope::get(&self[..], name)
    }
}

impl<N, S: Scope<N> + ?Sized> Scope<N> for &S {
    fn get(&self, name: &str) -> Option<N> {
        (**self).get(name)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn lookup() {
        let map: HashMap<String, f64> = [("a".to_string(), 1.0)].into_iter().collect();
        assert_eq!(Scope::get(&map, "a"), Some(1.0));
        assert_eq!(Scope::get(&map, "b"), None);

        let pairs = [("a", 1.0), ("b", 2.0)];
        assert_eq!(Scope::get(&pairs, "b"), Some(2.0));
        assert_eq!(Scope::get(&pairs[..], "c"), None);

        let empty: BTreeMap<String, f64> = BTreeMap::new();
        assert_eq!(Scope::get(&empty, "a"), None);
    }
}
