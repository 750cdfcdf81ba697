use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Id;

/// A user's investment as returned by the investments service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub user_id: Id,
    pub first_name: String,
    pub last_name: String,
    /// Kept as the upstream string; the report emits it verbatim.
    pub date: String,
    pub investment_total: Decimal,
    pub holdings: Vec<Holding>,
}

/// Fractional allocation of an investment's total into one company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    /// Company id, matched against [`super::Company::id`].
    pub id: Id,
    pub investment_percentage: Decimal,
}

impl Investment {
    pub fn new(
        user_id: impl Into<Id>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        date: impl Into<String>,
        investment_total: Decimal,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            date: date.into(),
            investment_total,
            holdings: Vec::new(),
        }
    }

    pub fn with_holding(mut self, company_id: impl Into<Id>, percentage: Decimal) -> Self {
        self.holdings.push(Holding {
            id: company_id.into(),
            investment_percentage: percentage,
        });
        self
    }
}
