/// Indian digit grouping: last three digits, then pairs. 1234567 -> 12,34,567
fn group_indian(int_part: &str) -> String {
    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i == 3 || (i > 3 && (i - 3) % 2 == 0) {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    with_commas.chars().rev().collect()
}

/// Format a float as a rupee amount with Indian grouping: ₹1,23,456.78
pub fn money(val: f64) -> String {
    let negative = val < 0.0;
    let cents = format!("{:.2}", val.abs());
    let parts: Vec<&str> = cents.split('.').collect();
    let int_part = group_indian(parts[0]);
    let dec_part = parts[1];

    if negative {
        format!("-₹{int_part}.{dec_part}")
    } else {
        format!("₹{int_part}.{dec_part}")
    }
}

/// Group a count the same way, no symbol or decimals.
pub fn number(val: i64) -> String {
    let negative = val < 0;
    let grouped = group_indian(&val.abs().to_string());
    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(1250.50), "₹1,250.50");
        assert_eq!(money(-500.00), "-₹500.00");
        assert_eq!(money(0.0), "₹0.00");
        assert_eq!(money(123456.78), "₹1,23,456.78");
        assert_eq!(money(12345678.9), "₹1,23,45,678.90");
        assert_eq!(money(42.10), "₹42.10");
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(number(0), "0");
        assert_eq!(number(999), "999");
        assert_eq!(number(1000), "1,000");
        assert_eq!(number(100000), "1,00,000");
        assert_eq!(number(-2500000), "-25,00,000");
    }
}
