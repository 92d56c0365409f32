//! Asset pair names
//!
//! The exchange names pairs by concatenating two currency codes, each of
//! which may carry a one letter class prefix (`X` crypto, `Z` fiat), e.g.
//! `XETHZEUR`. The short form drops those prefixes: `ETHEUR`.

use crate::error::{SdkError, SdkResult};

const CLASS_PREFIXES: [u8; 2] = [b'X', b'Z'];

/// Base and quote codes of a pair with class prefixes removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairSplit {
    pub base: String,
    pub quote: String,
    /// The split was a fixed 4/3 guess for a 7 letter name without prefix
    pub guessed: bool,
}

impl PairSplit {
    fn new(base: &str, quote: &str, guessed: bool) -> Self {
        Self {
            base: base.to_string(),
            quote: quote.to_string(),
            guessed,
        }
    }

    pub fn short(&self) -> String {
        format!("{}{}", self.base, self.quote)
    }
}

fn is_class_prefix(byte: u8) -> bool {
    CLASS_PREFIXES.contains(&byte)
}

/// Split a pair name into its short base and quote codes.
///
/// Names of 6, 7 or 8 ASCII letters are supported:
/// - 8: `[X|Z]BBB[X|Z]QQQ`, prefixes stripped where present
/// - 6: `BBBQQQ`
/// - 7: `BBB[X|Z]QQQ`, then `[X|Z]BBBQQQ`, otherwise a 4/3 split
pub fn base_quote_short_from_asset_pair(pair: &str) -> SdkResult<PairSplit> {
    let upper = pair.to_ascii_uppercase();
    if !upper.is_ascii() {
        return Err(SdkError::UnsupportedPair(pair.to_string()));
    }
    let bytes = upper.as_bytes();

    let split = match bytes.len() {
        8 => {
            let base = if is_class_prefix(bytes[0]) {
                &upper[1..4]
            } else {
                &upper[..4]
            };
            let quote = if is_class_prefix(bytes[4]) {
                &upper[5..]
            } else {
                &upper[4..]
            };
            PairSplit::new(base, quote, false)
        }
        6 => PairSplit::new(&upper[..3], &upper[3..], false),
        7 if is_class_prefix(bytes[3]) => PairSplit::new(&upper[..3], &upper[4..], false),
        7 if is_class_prefix(bytes[0]) => PairSplit::new(&upper[1..4], &upper[4..], false),
        7 => PairSplit::new(&upper[..4], &upper[4..], true),
        _ => return Err(SdkError::UnsupportedPair(pair.to_string())),
    };

    Ok(split)
}

/// Short display form of a pair, `XETHZEUR` -> `ETHEUR`.
///
/// Names that cannot be decomposed are returned upper-cased.
pub fn asset_pair_short(pair: &str) -> String {
    match base_quote_short_from_asset_pair(pair) {
        Ok(split) => split.short(),
        Err(_) => pair.to_ascii_uppercase(),
    }
}

/// Drop the class prefix of a 4 letter asset code, `XXBT` -> `XBT`
pub fn strip_asset_prefix(asset: &str) -> &str {
    let bytes = asset.as_bytes();
    if bytes.len() == 4 && is_class_prefix(bytes[0]) {
        &asset[1..]
    } else {
        asset
    }
}

/// True if `pair` names the same market as `filter`, in long or short form
pub fn pair_matches(pair: &str, filter: &str) -> bool {
    pair == filter || pair == asset_pair_short(filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(pair: &str) -> (String, String) {
        let s = base_quote_short_from_asset_pair(pair).unwrap();
        (s.base, s.quote)
    }

    #[test]
    fn test_eight_letter_pairs() {
        assert_eq!(split("XETHZEUR"), ("ETH".to_string(), "EUR".to_string()));
        assert_eq!(split("XXBTZUSD"), ("XBT".to_string(), "USD".to_string()));
        assert_eq!(split("xethzeur"), ("ETH".to_string(), "EUR".to_string()));
    }

    #[test]
    fn test_six_letter_pairs() {
        assert_eq!(split("BCHUSD"), ("BCH".to_string(), "USD".to_string()));
    }

    #[test]
    fn test_seven_letter_pairs() {
        // class letter in the middle
        assert_eq!(split("BCHXEUR"), ("BCH".to_string(), "EUR".to_string()));
        // class letter in front
        assert_eq!(split("XETHEUR"), ("ETH".to_string(), "EUR".to_string()));

        let dash = base_quote_short_from_asset_pair("DASHXBT").unwrap();
        assert_eq!(dash.base, "DASH");
        assert_eq!(dash.quote, "XBT");
        assert!(dash.guessed);
    }

    #[test]
    fn test_unsupported_lengths() {
        assert!(matches!(
            base_quote_short_from_asset_pair("ETH"),
            Err(SdkError::UnsupportedPair(_))
        ));
        assert!(matches!(
            base_quote_short_from_asset_pair("XXBTZUSD.d"),
            Err(SdkError::UnsupportedPair(_))
        ));
    }

    #[test]
    fn test_asset_pair_short() {
        assert_eq!(asset_pair_short("XETHZEUR"), "ETHEUR");
        assert_eq!(asset_pair_short("DASHEUR"), "DASHEUR");
        assert_eq!(asset_pair_short("DASHXBT"), "DASHXBT");
        assert_eq!(asset_pair_short("all"), "ALL");
    }

    #[test]
    fn test_strip_asset_prefix() {
        assert_eq!(strip_asset_prefix("XXBT"), "XBT");
        assert_eq!(strip_asset_prefix("ZEUR"), "EUR");
        assert_eq!(strip_asset_prefix("DASH"), "DASH");
        assert_eq!(strip_asset_prefix("USDT"), "USDT");
        assert_eq!(strip_asset_prefix("XBT"), "XBT");
    }

    #[test]
    fn test_pair_matches() {
        assert!(pair_matches("ETHEUR", "XETHZEUR"));
        assert!(pair_matches("XETHZEUR", "XETHZEUR"));
        assert!(!pair_matches("XBTEUR", "XETHZEUR"));
    }
}
