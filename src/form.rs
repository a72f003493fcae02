//! The calculator's input record and its five fields.

use serde::{Deserialize, Serialize};

use crate::calculator::{calculate, ResultRow};
use crate::format::format_number;

/// The five inputs, in the order they appear on screen and in links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    MortgageAmount,
    DownPaymentPercentage,
    ClosingCostPercentage,
    BuyerAgentCommissionPercentage,
    SellerAgentCommissionPercentage,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::MortgageAmount,
        Field::DownPaymentPercentage,
        Field::ClosingCostPercentage,
        Field::BuyerAgentCommissionPercentage,
        Field::SellerAgentCommissionPercentage,
    ];

    /// Query parameter and storage key.
    pub fn key(self) -> &'static str {
        match self {
            Field::MortgageAmount => "mortgageAmount",
            Field::DownPaymentPercentage => "downPaymentPercentage",
            Field::ClosingCostPercentage => "closingCostPercentage",
            Field::BuyerAgentCommissionPercentage => "buyerAgentCommissionPercentage",
            Field::SellerAgentCommissionPercentage => "sellerAgentCommissionPercentage",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::MortgageAmount => "Mortgage Amount ($)",
            Field::DownPaymentPercentage => "Down Payment (%)",
            Field::ClosingCostPercentage => "Closing Cost (%)",
            Field::BuyerAgentCommissionPercentage => "Buyer's Agent Commission (%)",
            Field::SellerAgentCommissionPercentage => "Seller's Agent Commission (%)",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Field::MortgageAmount => 0,
            Field::DownPaymentPercentage => 1,
            Field::ClosingCostPercentage => 2,
            Field::BuyerAgentCommissionPercentage => 3,
            Field::SellerAgentCommissionPercentage => 4,
        }
    }

    pub fn next(self) -> Field {
        Field::ALL[(self.index() + 1) % Field::ALL.len()]
    }

    pub fn prev(self) -> Field {
        Field::ALL[(self.index() + Field::ALL.len() - 1) % Field::ALL.len()]
    }

    pub fn is_percentage(self) -> bool {
        self != Field::MortgageAmount
    }
}

/// Current form state. The amount stays as typed so partial input like
/// `"25"` or `""` survives editing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValues {
    pub mortgage_amount: String,
    pub down_payment_percentage: f64,
    pub closing_cost_percentage: f64,
    pub buyer_agent_commission_percentage: f64,
    pub seller_agent_commission_percentage: f64,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            mortgage_amount: String::new(),
            down_payment_percentage: 5.0,
            closing_cost_percentage: 3.0,
            buyer_agent_commission_percentage: 3.0,
            seller_agent_commission_percentage: 3.0,
        }
    }
}

impl FormValues {
    /// Numeric value of a percentage field; `None` for the amount.
    pub fn percentage(&self, field: Field) -> Option<f64> {
        match field {
            Field::MortgageAmount => None,
            Field::DownPaymentPercentage => Some(self.down_payment_percentage),
            Field::ClosingCostPercentage => Some(self.closing_cost_percentage),
            Field::BuyerAgentCommissionPercentage => Some(self.buyer_agent_commission_percentage),
            Field::SellerAgentCommissionPercentage => Some(self.seller_agent_commission_percentage),
        }
    }

    fn percentage_mut(&mut self, field: Field) -> Option<&mut f64> {
        match field {
            Field::MortgageAmount => None,
            Field::DownPaymentPercentage => Some(&mut self.down_payment_percentage),
            Field::ClosingCostPercentage => Some(&mut self.closing_cost_percentage),
            Field::BuyerAgentCommissionPercentage => {
                Some(&mut self.buyer_agent_commission_percentage)
            }
            Field::SellerAgentCommissionPercentage => {
                Some(&mut self.seller_agent_commission_percentage)
            }
        }
    }

    /// Applies raw input text to a field. Percentage text that does not
    /// coerce to a finite number leaves the field unchanged.
    pub fn set(&mut self, field: Field, raw: &str) {
        if field.is_percentage() {
            if let Some(value) = coerce_number(raw) {
                self.set_percentage(field, value);
            }
        } else {
            self.mortgage_amount = raw.to_string();
        }
    }

    /// Stores a percentage. Non-finite values and the amount field are
    /// ignored.
    pub fn set_percentage(&mut self, field: Field, value: f64) {
        if !value.is_finite() {
            return;
        }
        if let Some(slot) = self.percentage_mut(field) {
            *slot = value;
        }
    }

    /// Text form of a field, as shown in inputs and written to links.
    pub fn display(&self, field: Field) -> String {
        match self.percentage(field) {
            None => self.mortgage_amount.clone(),
            Some(value) => format_number(value),
        }
    }

    pub fn differs_from_default(&self, field: Field) -> bool {
        let defaults = FormValues::default();
        match field {
            Field::MortgageAmount => self.mortgage_amount != defaults.mortgage_amount,
            _ => self.percentage(field) != defaults.percentage(field),
        }
    }

    pub fn results(&self) -> Vec<ResultRow> {
        calculate(
            &self.mortgage_amount,
            self.down_payment_percentage,
            self.closing_cost_percentage,
            self.buyer_agent_commission_percentage,
            self.seller_agent_commission_percentage,
        )
    }
}

/// Number coercion for percentage text: blank means zero, anything else must
/// parse to a finite float.
pub fn coerce_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
