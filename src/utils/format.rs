//! Display strings for the summary cards.

/// 紐幣金額，不含小數，千分位逗號，例如 `$31,340`、`-$1,200`
pub fn format_nzd(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}", sign, grouped)
}

pub fn format_sroi_ratio(sroi: f64) -> String {
    format!("{:.2} : 1", sroi)
}

/// 帶正負號的點數變化，例如 `+16 pts`
pub fn format_point_change(delta: f64) -> String {
    let rounded = delta.round();
    if rounded == 0.0 {
        "0 pts".to_string()
    } else if rounded > 0.0 {
        format!("+{:.0} pts", rounded)
    } else {
        format!("{:.0} pts", rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_nzd() {
        assert_eq!(format_nzd(31340.000000000007), "$31,340");
        assert_eq!(format_nzd(25000.0), "$25,000");
        assert_eq!(format_nzd(350.0), "$350");
        assert_eq!(format_nzd(1234567.4), "$1,234,567");
        assert_eq!(format_nzd(-1200.0), "-$1,200");
        assert_eq!(format_nzd(0.2), "$0");
    }

    #[test]
    fn test_format_sroi_ratio() {
        assert_eq!(format_sroi_ratio(1.2536), "1.25 : 1");
        assert_eq!(format_sroi_ratio(1.456363), "1.46 : 1");
    }

    #[test]
    fn test_format_point_change() {
        assert_eq!(format_point_change(16.0), "+16 pts");
        assert_eq!(format_point_change(0.18 * 100.0), "+18 pts");
        assert_eq!(format_point_change(-4.2), "-4 pts");
        assert_eq!(format_point_change(0.3), "0 pts");
    }
}
