/// Format a float as a currency amount with thousands separators: $1,234.56
pub fn money(val: f64, symbol: &str) -> String {
    let cents = format!("{:.2}", val.abs());
    // -0.004 rounds to 0.00 and should not print as negative
    let negative = val < 0.0 && cents != "0.00";
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if negative {
        format!("-{symbol}{with_commas}.{dec_part}")
    } else {
        format!("{symbol}{with_commas}.{dec_part}")
    }
}

/// One-decimal percentage: 12.3%
pub fn pct(val: f64) -> String {
    let rounded = format!("{:.1}", val);
    if rounded == "-0.0" {
        "0.0%".to_string()
    } else {
        format!("{rounded}%")
    }
}

/// Hours with at most one decimal: 12.5h, 40h
pub fn hours(val: f64) -> String {
    if val.fract() == 0.0 {
        format!("{val:.0}h")
    } else {
        format!("{val:.1}h")
    }
}
