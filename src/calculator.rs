//! Cost breakdown across a window of mortgage amounts around the entered one.

use serde::Serialize;

/// Lowest step offset below the entered amount.
pub const OFFSET_MIN: i32 = -3;
/// Highest step offset above the entered amount.
pub const OFFSET_MAX: i32 = 6;
/// Distance between neighbouring rows, in dollars.
pub const STEP: f64 = 10_000.0;

/// One line of the results table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRow {
    pub mortgage_amount: f64,
    pub down_payment: f64,
    pub closing_cost: f64,
    pub buyer_agent_commission: f64,
    pub seller_agent_commission: f64,
    pub total: f64,
    pub is_current_amount: bool,
}

/// Parses the raw amount text. Blank, non-numeric, non-finite and
/// non-positive input all yield `None`.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let value: f64 = trimmed.parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Computes the cost rows for every offset in `OFFSET_MIN..=OFFSET_MAX`.
///
/// Returns an empty vector when `mortgage_amount` is not a positive number;
/// callers treat that as "nothing to show".
pub fn calculate(
    mortgage_amount: &str,
    down_payment_percentage: f64,
    closing_cost_percentage: f64,
    buyer_agent_commission_percentage: f64,
    seller_agent_commission_percentage: f64,
) -> Vec<ResultRow> {
    let Some(base) = parse_amount(mortgage_amount) else {
        return Vec::new();
    };

    (OFFSET_MIN..=OFFSET_MAX)
        .map(|offset| {
            let amount = base + f64::from(offset) * STEP;
            let down_payment = amount * (down_payment_percentage / 100.0);
            let closing_cost = amount * (closing_cost_percentage / 100.0);
            let buyer_agent_commission = amount * (buyer_agent_commission_percentage / 100.0);
            let seller_agent_commission = amount * (seller_agent_commission_percentage / 100.0);
            let total =
                down_payment + closing_cost + buyer_agent_commission + seller_agent_commission;

            ResultRow {
                mortgage_amount: amount,
                down_payment,
                closing_cost,
                buyer_agent_commission,
                seller_agent_commission,
                total,
                is_current_amount: amount == base,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn produces_one_row_per_offset_in_ascending_order() {
        let rows = calculate("300000", 5.0, 3.0, 3.0, 3.0);

        let amounts: Vec<f64> = rows.iter().map(|r| r.mortgage_amount).collect();
        assert_eq!(
            amounts,
            vec![
                270000.0, 280000.0, 290000.0, 300000.0, 310000.0, 320000.0, 330000.0, 340000.0,
                350000.0, 360000.0,
            ]
        );
    }

    #[test]
    fn entered_amount_row_matches_worked_example() {
        let rows = calculate("300000", 5.0, 3.0, 3.0, 3.0);
        let current = rows.iter().find(|r| r.is_current_amount).unwrap();

        assert_close(current.mortgage_amount, 300000.0);
        assert_close(current.down_payment, 15000.0);
        assert_close(current.closing_cost, 9000.0);
        assert_close(current.buyer_agent_commission, 9000.0);
        assert_close(current.seller_agent_commission, 9000.0);
        assert_close(current.total, 42000.0);
    }

    #[test]
    fn exactly_one_row_is_current() {
        let rows = calculate("123456.78", 4.5, 2.25, 2.5, 3.0);

        let current: Vec<&ResultRow> = rows.iter().filter(|r| r.is_current_amount).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].mortgage_amount, 123456.78);
        assert!(rows[3].is_current_amount);
    }

    #[test]
    fn total_is_sum_of_costs() {
        for row in calculate("987654.321", 7.3, 1.9, 2.7, 0.4) {
            let sum = row.down_payment
                + row.closing_cost
                + row.buyer_agent_commission
                + row.seller_agent_commission;
            assert_eq!(row.total, sum);
        }
    }

    #[test]
    fn small_amount_yields_negative_rows_below_zero() {
        let rows = calculate("5000", 5.0, 3.0, 3.0, 3.0);

        assert_eq!(rows.len(), 10);
        assert_close(rows[0].mortgage_amount, -25000.0);
        assert_close(rows[0].down_payment, -1250.0);
    }

    #[test]
    fn invalid_amounts_yield_no_rows() {
        for raw in ["", "   ", "-100", "0", "abc", "12abc", "inf", "NaN"] {
            assert!(
                calculate(raw, 5.0, 3.0, 3.0, 3.0).is_empty(),
                "{raw:?} should produce no rows"
            );
        }
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(parse_amount(" 250000 "), Some(250000.0));
    }

    #[test]
    fn zero_percentages_give_zero_costs() {
        for row in calculate("100000", 0.0, 0.0, 0.0, 0.0) {
            assert_eq!(row.total, 0.0);
        }
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let row = calculate("100000", 5.0, 3.0, 3.0, 3.0)[3];
        let json = serde_json::to_value(row).unwrap();

        assert_eq!(json["mortgageAmount"], 100000.0);
        assert_eq!(json["isCurrentAmount"], true);
        assert!(json.get("buyerAgentCommission").is_some());
    }
}
