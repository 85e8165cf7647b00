//! Coin symbol table
//!
//! An ordered symbol → display-name mapping. The order matters: it is the
//! alternation order of the symbol-matching pattern, so when two keys could
//! match at the same position the earlier one wins.

use crate::error::{NewsError, Result};
use regex::Regex;

/// Built-in table of tickers the agent recognises
pub const DEFAULT_COINS: &[(&str, &str)] = &[
    ("BTC", "Bitcoin"),
    ("ETH", "Ethereum"),
    ("USDT", "Tether"),
    ("BNB", "BNB"),
    ("SOL", "Solana"),
    ("USDC", "USD Coin"),
    ("XRP", "XRP"),
    ("STETH", "Lido Staked Ether"),
    ("DOGE", "Dogecoin"),
    ("TON", "Toncoin"),
    ("ADA", "Cardano"),
    ("TRX", "TRON"),
    ("AVAX", "Avalanche"),
    ("SHIB", "Shiba Inu"),
    ("WBTC", "Wrapped Bitcoin"),
    ("DOT", "Polkadot"),
    ("LINK", "Chainlink"),
    ("BCH", "Bitcoin Cash"),
    ("NEAR", "NEAR Protocol"),
    ("MATIC", "Polygon"),
    ("LTC", "Litecoin"),
    ("ICP", "Internet Computer"),
    ("LEO", "UNUS SED LEO"),
    ("DAI", "Dai"),
    ("UNI", "Uniswap"),
    ("PEPE", "Pepe"),
    ("ETC", "Ethereum Classic"),
    ("APT", "Aptos"),
    ("XMR", "Monero"),
    ("XLM", "Stellar"),
    ("ATOM", "Cosmos"),
    ("OKB", "OKB"),
    ("FIL", "Filecoin"),
    ("HBAR", "Hedera"),
    ("ARB", "Arbitrum"),
    ("VET", "VeChain"),
    ("OP", "Optimism"),
    ("IMX", "Immutable"),
    ("MKR", "Maker"),
    ("INJ", "Injective"),
    ("SUI", "Sui"),
    ("AAVE", "Aave"),
    ("ALGO", "Algorand"),
    ("MORPHEUS", "Morpheus"),
    ("MOR", "Morpheus"),
];

/// Ordered symbol → display-name table with a precompiled matcher
#[derive(Debug, Clone)]
pub struct CoinTable {
    entries: Vec<(String, String)>,
    pattern: Option<Regex>,
}

impl CoinTable {
    /// Build a table; symbols are normalised to uppercase
    pub fn new<S, N>(entries: impl IntoIterator<Item = (S, N)>) -> Result<Self>
    where
        S: Into<String>,
        N: Into<String>,
    {
        let entries: Vec<(String, String)> = entries
            .into_iter()
            .map(|(symbol, name)| (symbol.into().trim().to_uppercase(), name.into()))
            .collect();

        if let Some((_, name)) = entries.iter().find(|(symbol, _)| symbol.is_empty()) {
            return Err(NewsError::Config(format!(
                "empty symbol in coin table (name: {name:?})"
            )));
        }

        let pattern = build_pattern(&entries)
            .map_err(|e| NewsError::Config(format!("invalid coin pattern: {e}")))?;

        Ok(Self { entries, pattern })
    }

    /// Look up the display name of a symbol (case-insensitive)
    pub fn name_of(&self, symbol: &str) -> Option<&str> {
        let symbol = symbol.to_uppercase();
        self.entries
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|(_, name)| name.as_str())
    }

    /// Display name of a symbol, falling back to the symbol itself
    pub fn display_name(&self, symbol: &str) -> String {
        self.name_of(symbol)
            .map_or_else(|| symbol.to_string(), str::to_string)
    }

    /// Find every whole-word symbol mention in `text`
    ///
    /// Matching is done on the uppercased text. Results are in order of
    /// occurrence and keep duplicates.
    pub fn extract_symbols(&self, text: &str) -> Vec<String> {
        let Some(pattern) = &self.pattern else {
            return Vec::new();
        };
        let upper = text.to_uppercase();
        pattern
            .find_iter(&upper)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Symbols in table order
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(s, _)| s.as_str())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CoinTable {
    fn default() -> Self {
        let entries = DEFAULT_COINS
            .iter()
            .map(|(symbol, name)| ((*symbol).to_string(), (*name).to_string()))
            .collect::<Vec<_>>();
        // Built-in symbols are plain ASCII words and always compile
        let pattern = build_pattern(&entries).ok().flatten();
        Self { entries, pattern }
    }
}

/// `\b(K1|K2|...)\b`, or `None` for an empty table
fn build_pattern(entries: &[(String, String)]) -> std::result::Result<Option<Regex>, regex::Error> {
    if entries.is_empty() {
        return Ok(None);
    }
    let alternation = entries
        .iter()
        .map(|(symbol, _)| regex::escape(symbol))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b({alternation})\b")).map(Some)
}
