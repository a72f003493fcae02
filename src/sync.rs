//! Keeps the form values, the saved settings and the page address in step.
//!
//! On startup each field is taken from the address query if present, else
//! from storage, else from the defaults. After every change the full record
//! is saved and the address is rewritten to carry only non-default fields.
//! Storage and address failures are logged and otherwise ignored.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::calculator::ResultRow;
use crate::error::LocationError;
use crate::form::{coerce_number, Field, FormValues};
use crate::format::format_number;
use crate::location::History;
use crate::query::QueryParams;
use crate::storage::{Storage, STORAGE_KEY};

/// Picks the highest-priority value that is present.
pub fn merge<T>(from_url: Option<T>, from_storage: Option<T>, default: T) -> T {
    from_url.or(from_storage).unwrap_or(default)
}

/// Whatever was saved last time. Fields are kept loose so a hand-edited or
/// older record still contributes what it can.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StoredValues {
    mortgage_amount: Option<Value>,
    down_payment_percentage: Option<Value>,
    closing_cost_percentage: Option<Value>,
    buyer_agent_commission_percentage: Option<Value>,
    seller_agent_commission_percentage: Option<Value>,
}

impl StoredValues {
    fn raw(&self, field: Field) -> Option<&Value> {
        match field {
            Field::MortgageAmount => self.mortgage_amount.as_ref(),
            Field::DownPaymentPercentage => self.down_payment_percentage.as_ref(),
            Field::ClosingCostPercentage => self.closing_cost_percentage.as_ref(),
            Field::BuyerAgentCommissionPercentage => {
                self.buyer_agent_commission_percentage.as_ref()
            }
            Field::SellerAgentCommissionPercentage => {
                self.seller_agent_commission_percentage.as_ref()
            }
        }
    }

    /// Only a non-empty amount counts as saved.
    fn amount(&self) -> Option<String> {
        match self.raw(Field::MortgageAmount)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => n
                .as_f64()
                .filter(|v| *v != 0.0 && v.is_finite())
                .map(format_number),
            _ => None,
        }
    }

    fn percentage(&self, field: Field) -> Option<f64> {
        match self.raw(field)? {
            Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
            Value::String(s) => coerce_number(s),
            _ => None,
        }
    }
}

fn read_stored(storage: &impl Storage) -> StoredValues {
    let raw = match storage.get_item(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return StoredValues::default(),
        Err(error) => {
            warn!(%error, "could not read saved values; ignoring them");
            return StoredValues::default();
        }
    };
    match serde_json::from_str::<Value>(&raw) {
        Ok(value @ Value::Object(_)) => serde_json::from_value(value).unwrap_or_else(|error| {
            warn!(%error, "saved values have an unexpected shape; ignoring them");
            StoredValues::default()
        }),
        Ok(_) => StoredValues::default(),
        Err(error) => {
            warn!(%error, "saved values are not valid JSON; ignoring them");
            StoredValues::default()
        }
    }
}

fn read_query(history: &impl History) -> QueryParams {
    match history.location() {
        Ok(location) => location.query(),
        Err(error) => {
            warn!(%error, "address unavailable; ignoring link parameters");
            QueryParams::new()
        }
    }
}

/// Builds the startup values from the address, storage and defaults.
pub fn load_initial_values(storage: &impl Storage, history: &impl History) -> FormValues {
    let stored = read_stored(storage);
    let query = read_query(history);
    let defaults = FormValues::default();

    let mut values = FormValues {
        mortgage_amount: merge(
            query.get(Field::MortgageAmount.key()).map(str::to_string),
            stored.amount(),
            defaults.mortgage_amount.clone(),
        ),
        ..defaults.clone()
    };

    for field in Field::ALL.into_iter().filter(|f| f.is_percentage()) {
        let from_url = query.get(field.key()).and_then(coerce_number);
        let value = merge(
            from_url,
            stored.percentage(field),
            defaults.percentage(field).unwrap_or_default(),
        );
        values.set_percentage(field, value);
    }

    values
}

/// Query string (no leading `?`) holding the fields that differ from the
/// defaults, in field order.
pub fn query_for(values: &FormValues) -> String {
    let mut params = QueryParams::new();
    for field in Field::ALL {
        if values.differs_from_default(field) {
            params.set(field.key(), values.display(field));
        }
    }
    params.to_string()
}

/// Path-absolute URL for `values` under `pathname`.
pub fn url_for(pathname: &str, values: &FormValues) -> String {
    let query = query_for(values);
    if query.is_empty() {
        pathname.to_string()
    } else {
        format!("{pathname}?{query}")
    }
}

/// Sole owner of the form values. Every mutation goes through here so the
/// results, the saved record and the address never drift apart.
#[derive(Debug)]
pub struct StateSynchronizer<S, H> {
    storage: S,
    history: H,
    values: FormValues,
    results: Vec<ResultRow>,
}

impl<S: Storage, H: History> StateSynchronizer<S, H> {
    /// Loads the initial values and runs the first propagation.
    pub fn start(storage: S, history: H) -> Self {
        let values = load_initial_values(&storage, &history);
        info!(
            mortgage_amount = %values.mortgage_amount,
            down_payment = values.down_payment_percentage,
            closing_cost = values.closing_cost_percentage,
            buyer_agent = values.buyer_agent_commission_percentage,
            seller_agent = values.seller_agent_commission_percentage,
            "loaded form values"
        );

        let mut sync = Self {
            storage,
            history,
            values,
            results: Vec::new(),
        };
        sync.propagate();
        sync
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn results(&self) -> &[ResultRow] {
        &self.results
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// Applies raw input text to one field, then propagates.
    pub fn update(&mut self, field: Field, raw: &str) {
        self.values.set(field, raw);
        self.propagate();
    }

    /// Replaces the whole record, then propagates.
    pub fn replace_values(&mut self, values: FormValues) {
        self.values = values;
        self.propagate();
    }

    /// Full address of the current state, for sharing.
    pub fn share_url(&self) -> Result<String, LocationError> {
        self.history.location().map(|location| location.href())
    }

    /// Recomputes the rows and writes the values out to storage and the
    /// address.
    pub fn propagate(&mut self) {
        self.results = self.values.results();
        debug!(rows = self.results.len(), "results recomputed");

        self.persist();
        self.reflect_in_address();
    }

    fn persist(&mut self) {
        let outcome = serde_json::to_string(&self.values)
            .map_err(Into::into)
            .and_then(|json| self.storage.set_item(STORAGE_KEY, &json));
        if let Err(error) = outcome {
            warn!(%error, "could not save form values");
        }
    }

    fn reflect_in_address(&mut self) {
        // An empty amount leaves whatever link is showing.
        if self.values.mortgage_amount.is_empty() {
            return;
        }

        let pathname = match self.history.location() {
            Ok(location) => location.pathname().to_string(),
            Err(error) => {
                warn!(%error, "address unavailable; link not updated");
                return;
            }
        };
        let url = url_for(&pathname, &self.values);
        match self.history.replace_state(&url) {
            Ok(()) => debug!(%url, "address replaced"),
            Err(error) => warn!(%error, %url, "could not update address"),
        }
    }
}
