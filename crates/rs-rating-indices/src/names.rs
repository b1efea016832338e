//! Display names of market indices.

/// A market index known by its Yahoo symbol and common abbreviations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexName {
    /// Yahoo Finance symbol, e.g. `^GSPC`.
    pub symbol: &'static str,
    /// Common abbreviations, e.g. `SPX`.
    pub aliases: &'static [&'static str],
    /// Display name.
    pub name: &'static str,
}

const INDICES: &[IndexName] = &[
    IndexName { symbol: "^GSPC", aliases: &["SPX"], name: "S&P 500" },
    IndexName { symbol: "^DJI", aliases: &["DJIA"], name: "Dow Jones Industrial Average" },
    IndexName { symbol: "^IXIC", aliases: &[], name: "NASDAQ" },
    IndexName { symbol: "^NDX", aliases: &["NDX"], name: "NASDAQ 100" },
    IndexName { symbol: "^RUI", aliases: &["RUI"], name: "Russell 1000" },
    IndexName { symbol: "^RUT", aliases: &["RUT"], name: "Russell 2000" },
    IndexName { symbol: "^SOX", aliases: &["SOX"], name: "PHLX Semiconductor Sector" },
    IndexName { symbol: "^NYA", aliases: &["NYA"], name: "NYSE Composite" },
    IndexName { symbol: "^MID", aliases: &["MID"], name: "S&P MidCap 400" },
    IndexName { symbol: "^W5000", aliases: &[], name: "Wilshire 5000" },
    IndexName { symbol: "^FTSE", aliases: &[], name: "FTSE 100" },
    IndexName { symbol: "^GDAXI", aliases: &[], name: "DAX" },
    IndexName { symbol: "^FCHI", aliases: &[], name: "CAC 40" },
    IndexName { symbol: "^N225", aliases: &[], name: "Nikkei 225" },
    IndexName { symbol: "^HSI", aliases: &[], name: "Hang Seng" },
    IndexName { symbol: "^TWII", aliases: &[], name: "TAIEX" },
    IndexName { symbol: "^GSPTSE", aliases: &[], name: "S&P/TSX Composite" },
    IndexName { symbol: "^STOXX50E", aliases: &[], name: "Euro Stoxx 50" },
];

/// All indices with a display name.
#[must_use]
pub const fn known_indices() -> &'static [IndexName] {
    INDICES
}

fn lookup(symbol: &str) -> Option<&'static IndexName> {
    INDICES
        .iter()
        .find(|i| i.symbol == symbol || i.aliases.contains(&symbol))
}

/// The display name of an index symbol or abbreviation, or `"Unknown"`.
///
/// # Examples
///
/// ```
/// use rs_rating_indices::get_name;
///
/// assert_eq!(get_name("SPX"), "S&P 500");
/// assert_eq!(get_name("^SOX"), "PHLX Semiconductor Sector");
/// assert_eq!(get_name("^XYZ"), "Unknown");
/// ```
#[must_use]
pub fn get_name(symbol: &str) -> &'static str {
    lookup(symbol).map_or("Unknown", |i| i.name)
}

/// The Yahoo symbol of an index from its display name, ignoring case.
#[must_use]
pub fn ticker_from_name(name: &str) -> Option<&'static str> {
    let name = name.trim();
    INDICES
        .iter()
        .find(|i| i.name.eq_ignore_ascii_case(name))
        .map(|i| i.symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_name() {
        assert_eq!(get_name("^GSPC"), "S&P 500");
        assert_eq!(get_name("^DJI"), "Dow Jones Industrial Average");
        assert_eq!(get_name("^IXIC"), "NASDAQ");
        assert_eq!(get_name("^NDX"), "NASDAQ 100");
        assert_eq!(get_name("^RUT"), "Russell 2000");
        assert_eq!(get_name("MID"), "S&P MidCap 400");
        assert_eq!(get_name("^TWII"), "TAIEX");
        assert_eq!(get_name("^UNKNOWN"), "Unknown");
    }

    #[test]
    fn test_ticker_from_name() {
        assert_eq!(ticker_from_name("s&p 500"), Some("^GSPC"));
        assert_eq!(ticker_from_name("  Nasdaq 100 "), Some("^NDX"));
        assert_eq!(ticker_from_name("Euro Stoxx 50"), Some("^STOXX50E"));
        assert_eq!(ticker_from_name("Unknown"), None);
    }

    #[test]
    fn test_names_round_trip() {
        for index in known_indices() {
            assert_eq!(get_name(index.symbol), index.name);
            assert_eq!(ticker_from_name(index.name), Some(index.symbol));
        }
    }
}
