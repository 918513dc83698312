//! Static catalog of supported currency pairs

use serde::{Serialize, Serializer};

/// Pair identifier to label, in the order the catalog is served.
pub const AVAILABLE_CURRENCIES: &[(&str, &str)] = &[
    ("USD-BRL", "Dólar Americano/Real Brasileiro"),
    ("EUR-BRL", "Euro/Real Brasileiro"),
    ("GBP-BRL", "Libra Esterlina/Real Brasileiro"),
    ("ARS-BRL", "Peso Argentino/Real Brasileiro"),
    ("CAD-BRL", "Dólar Canadense/Real Brasileiro"),
    ("AUD-BRL", "Dólar Australiano/Real Brasileiro"),
    ("JPY-BRL", "Iene Japonês/Real Brasileiro"),
    ("CHF-BRL", "Franco Suíço/Real Brasileiro"),
    ("CNY-BRL", "Yuan Chinês/Real Brasileiro"),
    ("BTC-BRL", "Bitcoin/Real Brasileiro"),
    ("ETH-BRL", "Ethereum/Real Brasileiro"),
    ("LTC-BRL", "Litecoin/Real Brasileiro"),
    ("XRP-BRL", "XRP/Real Brasileiro"),
    ("DOGE-BRL", "Dogecoin/Real Brasileiro"),
    ("EUR-USD", "Euro/Dólar Americano"),
    ("GBP-USD", "Libra Esterlina/Dólar Americano"),
    ("USD-JPY", "Dólar Americano/Iene Japonês"),
    ("USD-CHF", "Dólar Americano/Franco Suíço"),
    ("USD-CAD", "Dólar Americano/Dólar Canadense"),
];

/// Serializes the catalog as a JSON object, keeping declaration order.
#[derive(Debug, Clone, Copy)]
pub struct Catalog(&'static [(&'static str, &'static str)]);

impl Catalog {
    pub fn available() -> Self {
        Catalog(AVAILABLE_CURRENCIES)
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_entries() {
        assert_eq!(AVAILABLE_CURRENCIES.len(), 19);
        assert_eq!(AVAILABLE_CURRENCIES[0], ("USD-BRL", "Dólar Americano/Real Brasileiro"));
        assert!(AVAILABLE_CURRENCIES.contains(&("DOGE-BRL", "Dogecoin/Real Brasileiro")));
        assert!(!AVAILABLE_CURRENCIES.iter().any(|(p, _)| *p == "usd-brl"));

        let unique: HashSet<_> = AVAILABLE_CURRENCIES.iter().map(|(p, _)| p).collect();
        assert_eq!(unique.len(), AVAILABLE_CURRENCIES.len());
    }

    #[test]
    fn test_catalog_serializes_in_order() {
        let json = serde_json::to_string(&Catalog::available()).unwrap();
        let usd = json.find("\"USD-BRL\"").unwrap();
        let cad = json.find("\"USD-CAD\"").unwrap();
        assert!(usd < cad);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 19);
        assert_eq!(value["BTC-BRL"], "Bitcoin/Real Brasileiro");
    }
}
