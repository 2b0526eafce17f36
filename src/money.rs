//! # Financial Aggregation
//!
//! Pure functions over a service-line sequence. Both the printed summary
//! block and any on-screen summary must call these; a single source of
//! truth guarantees the displayed total always matches the printed one.
//!
//! Totals are not clamped: a discount exceeding its value produces a
//! negative line total, and the net total carries the sign through.

use crate::model::ServiceLine;

/// Sum of `value` over all service lines.
pub fn subtotal(services: &[ServiceLine]) -> f64 {
    services.iter().map(|s| s.value).sum()
}

/// Sum of `discount` over all service lines.
pub fn discount_total(services: &[ServiceLine]) -> f64 {
    services.iter().map(|s| s.discount).sum()
}

/// `subtotal - discount_total`. May be negative.
pub fn net_total(services: &[ServiceLine]) -> f64 {
    subtotal(services) - discount_total(services)
}

/// `value - discount` for one line. May be negative.
pub fn line_total(line: &ServiceLine) -> f64 {
    line.value - line.discount
}

/// Format an amount the pt-BR way: `.` thousands separator, `,` decimal
/// separator, always two decimal places, leading `-` when negative.
pub fn format_amount(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let integer = cents / 100;
    let fraction = cents % 100;

    let digits = integer.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}{},{:02}", sign, grouped, fraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn line(value: f64, discount: f64) -> ServiceLine {
        ServiceLine {
            id: String::new(),
            description: String::new(),
            value,
            discount,
        }
    }

    #[test]
    fn test_totals() {
        let services = vec![line(100.0, 10.0), line(250.5, 0.0)];
        assert_eq!(subtotal(&services), 350.5);
        assert_eq!(discount_total(&services), 10.0);
        assert_eq!(net_total(&services), 340.5);
    }

    #[test]
    fn test_empty_sequence_is_zero() {
        assert_eq!(subtotal(&[]), 0.0);
        assert_eq!(discount_total(&[]), 0.0);
        assert_eq!(net_total(&[]), 0.0);
    }

    #[test]
    fn test_net_total_identity() {
        let services = vec![line(10.0, 2.5), line(99.99, 33.33), line(0.0, 7.0)];
        assert_eq!(
            net_total(&services),
            subtotal(&services) - discount_total(&services)
        );
    }

    #[test]
    fn test_discount_over_value_goes_negative() {
        let services = vec![line(50.0, 80.0)];
        assert_eq!(net_total(&services), -30.0);
        assert_eq!(line_total(&services[0]), -30.0);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0,00");
        assert_eq!(format_amount(90.0), "90,00");
        assert_eq!(format_amount(100.0), "100,00");
        assert_eq!(format_amount(1234.5), "1.234,50");
        assert_eq!(format_amount(1234567.891), "1.234.567,89");
        assert_eq!(format_amount(-30.0), "-30,00");
        assert_eq!(format_amount(999.999), "1.000,00");
    }
}
