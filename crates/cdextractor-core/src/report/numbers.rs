use regex::Regex;
use std::sync::LazyLock;

static DECIMAL_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-?[0-9]+\.[0-9]+(?:\([0-9]+\))?").expect("decimal token pattern is valid")
});

/// Decimal tokens of `line` in order, as written (`3.256(12)`, `-0.41`).
///
/// Integers and tokens with an unterminated uncertainty are not decimals in
/// this sense; the latter contribute only their leading number.
pub fn extract_decimal_tokens(line: &str) -> Vec<&str> {
    DECIMAL_TOKEN
        .find_iter(line)
        .map(|found| found.as_str())
        .collect()
}

/// Numeric value of a token with any `(..)` uncertainty suffix cut off.
pub fn leading_value(token: &str) -> Option<f64> {
    let numeric = match token.find('(') {
        Some(open) => &token[..open],
        None => token,
    };
    numeric.trim().parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::{extract_decimal_tokens, leading_value};

    #[test]
    fn tokens_keep_their_uncertainty_suffix() {
        let tokens = extract_decimal_tokens("Cg(1) -> Cg(2)  3.256(12)  -1.234  12.3(4)");
        assert_eq!(tokens, vec!["3.256(12)", "-1.234", "12.3(4)"]);
    }

    #[test]
    fn integers_and_labels_are_not_tokens() {
        let tokens = extract_decimal_tokens("Cg(1)  [1]  Res(12)  N1  --  7");
        assert!(tokens.is_empty());
    }

    #[test]
    fn unterminated_uncertainty_yields_only_the_number() {
        let tokens = extract_decimal_tokens("2.50(3 4.75");
        assert_eq!(tokens, vec!["2.50", "4.75"]);
    }

    #[test]
    fn leading_value_ignores_uncertainty_digits() {
        assert_eq!(leading_value("3.256(12)"), Some(3.256));
        assert_eq!(leading_value("-0.5"), Some(-0.5));
        assert_eq!(leading_value("4.0(99)"), Some(4.0));
        assert_eq!(leading_value("(12)"), None);
    }
}
