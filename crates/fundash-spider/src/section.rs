use std::fmt;

/// One of the three spreadsheets published per company.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Metrics,
    BalanceSheet,
    IncomeStatement,
}

impl Section {
    /// Order in which a dashboard run resolves the sections.
    pub const RESOLVE_ORDER: [Section; 3] = [
        Section::Metrics,
        Section::IncomeStatement,
        Section::BalanceSheet,
    ];

    /// Value of the `section` query parameter; spaces are kept.
    pub fn param(&self) -> &'static str {
        match self {
            Section::Metrics => "Metrics",
            Section::BalanceSheet => "Balance Sheet",
            Section::IncomeStatement => "Income Statement",
        }
    }

    /// Cache filename suffix: the parameter, lowercased, with spaces replaced by underscores.
    pub fn file_suffix(&self) -> String {
        self.param().to_lowercase().replace(' ', "_")
    }

    /// Spanish noun phrase naming the section's file, e.g. `"del balance"`.
    pub fn file_label_es(&self) -> &'static str {
        match self {
            Section::Metrics => "de métricas",
            Section::BalanceSheet => "del balance",
            Section::IncomeStatement => "del estado de resultados",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SymbolError {
    #[error("empty symbol")]
    Empty,

    #[error("invalid symbol: {0}")]
    Invalid(String),
}

/// A ticker symbol, as typed by the user.
///
/// Only trimmed; the remote decides whether it exists. Anything that could step outside the
/// data directory once embedded in a cache path, or change the request URL beyond its path
/// segment, is refused.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(raw: &str) -> Result<Self, SymbolError> {
        let symbol = raw.trim();
        if symbol.is_empty() {
            return Err(SymbolError::Empty);
        }
        if symbol.contains(['/', '\\', '?', '#']) || symbol.contains("..") {
            return Err(SymbolError::Invalid(symbol.to_string()));
        }
        Ok(Self(symbol.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_keep_spaces() {
        assert_eq!(Section::Metrics.param(), "Metrics");
        assert_eq!(Section::BalanceSheet.param(), "Balance Sheet");
        assert_eq!(Section::IncomeStatement.param(), "Income Statement");
    }

    #[test]
    fn suffixes_use_underscores() {
        assert_eq!(Section::Metrics.file_suffix(), "metrics");
        assert_eq!(Section::BalanceSheet.file_suffix(), "balance_sheet");
        assert_eq!(Section::IncomeStatement.file_suffix(), "income_statement");
    }

    #[test]
    fn resolve_order() {
        assert_eq!(
            Section::RESOLVE_ORDER,
            [
                Section::Metrics,
                Section::IncomeStatement,
                Section::BalanceSheet
            ]
        );
    }

    #[test]
    fn symbols() {
        assert_eq!(Symbol::new("  AAPL ").unwrap().as_str(), "AAPL");
        assert_eq!(Symbol::new("BRK.B").unwrap().as_str(), "BRK.B");
        assert_eq!(Symbol::new("   "), Err(SymbolError::Empty));
        assert!(matches!(
            Symbol::new("../etc"),
            Err(SymbolError::Invalid(_))
        ));
        assert!(matches!(Symbol::new("a/b"), Err(SymbolError::Invalid(_))));
        assert!(matches!(Symbol::new("A?x"), Err(SymbolError::Invalid(_))));
        assert!(matches!(Symbol::new("A#B"), Err(SymbolError::Invalid(_))));
    }
}
