/// Render a non-negative price for display: 4 fractional digits below 1000,
/// thousands separators with exactly 2 fractional digits at or above it.
pub fn format_price(value: f64) -> String {
    if value >= 1000.0 {
        let fixed = format!("{:.2}", value);
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        format!("{}.{}", group_thousands(int_part), frac_part)
    } else {
        format!("{:.4}", value)
    }
}

/// Render a percent change with an explicit sign and 2 fractional digits.
pub fn format_change_percent(value: f64) -> String {
    format!("{:+.2}%", value)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let first_group = digits.len() % 3;

    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - first_group) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    grouped
}

/// Convert a raw integer quantity to a decimal string in the natural unit,
/// trimming trailing fractional zeros ("1.2345", "1", "0").
pub fn format_units(raw: u128, decimals: u32) -> String {
    let base = 10u128.pow(decimals);
    let whole = raw / base;
    let frac = raw % base;

    if frac == 0 {
        return whole.to_string();
    }

    let frac_digits = format!("{:0width$}", frac, width = decimals as usize);
    format!("{}.{}", whole, frac_digits.trim_end_matches('0'))
}

/// Format an address for display (truncated): "0x1234...abcd".
pub fn truncate_address(address: &str) -> String {
    if address.len() <= 10 {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}

/// Base asset of an exchange pair symbol: "BTCUSDT" -> "BTC".
pub fn base_asset(pair: &str) -> &str {
    for quote in ["USDT", "USDC", "BUSD", "USD"] {
        if let Some(base) = pair.strip_suffix(quote) {
            if !base.is_empty() {
                return base;
            }
        }
    }
    pair
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_below_thousand_gets_four_digits() {
        assert_eq!(format_price(0.0234), "0.0234");
        assert_eq!(format_price(0.023_400_1), "0.0234");
        assert_eq!(format_price(178.92), "178.9200");
        assert_eq!(format_price(999.9999), "999.9999");
    }

    #[test]
    fn price_at_or_above_thousand_gets_grouped_two_digits() {
        assert_eq!(format_price(67432.5), "67,432.50");
        assert_eq!(format_price(1000.0), "1,000.00");
        assert_eq!(format_price(3456.78), "3,456.78");
        assert_eq!(format_price(1_234_567.891), "1,234,567.89");
    }

    #[test]
    fn change_percent_carries_explicit_sign() {
        assert_eq!(format_change_percent(2.449), "+2.45%");
        assert_eq!(format_change_percent(-0.873), "-0.87%");
        assert_eq!(format_change_percent(0.0), "+0.00%");
    }

    #[test]
    fn units_trim_trailing_zeros() {
        assert_eq!(format_units(1_000_000_000_000_000_000, 18), "1");
        assert_eq!(format_units(1_234_500_000_000_000_000, 18), "1.2345");
        assert_eq!(format_units(0, 18), "0");
        assert_eq!(format_units(1, 18), "0.000000000000000001");
        assert_eq!(format_units(1_500, 2), "15");
    }

    #[test]
    fn address_truncation() {
        assert_eq!(
            truncate_address("0x52908400098527886e0f7030069857d2e4169ee7"),
            "0x5290...9ee7"
        );
        assert_eq!(truncate_address("0xabc"), "0xabc");
    }

    #[test]
    fn base_asset_strips_quote() {
        assert_eq!(base_asset("BTCUSDT"), "BTC");
        assert_eq!(base_asset("ANKRUSDT"), "ANKR");
        assert_eq!(base_asset("WEIRD"), "WEIRD");
        assert_eq!(base_asset("USDT"), "USDT");
    }
}
