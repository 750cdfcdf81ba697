//! Projection of a [`Row`] into the fixed report columns.
//!
//! Columns are an ordered table of named extraction rules. The report header
//! is the list of rule labels, so adding or reordering a column only touches
//! [`FIELDS`].

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::rows::Row;
use crate::models::{Company, Id};
use crate::{Error, Result};

/// Company names indexed by company id.
///
/// Lookups match on both the id text and its JSON kind, so a numeric holding
/// id never resolves to a string company id.
#[derive(Debug, Default)]
pub struct CompanyDirectory<'a> {
    names: HashMap<&'a Id, &'a str>,
}

impl<'a> CompanyDirectory<'a> {
    /// Index companies by id. When an id repeats, the first entry wins.
    pub fn new(companies: &'a [Company]) -> Self {
        let mut names = HashMap::with_capacity(companies.len());
        for company in companies {
            names
                .entry(&company.id)
                .or_insert(company.name.as_str());
        }
        Self { names }
    }

    pub fn name_of(&self, company_id: &Id) -> Result<&'a str> {
        self.names
            .get(company_id)
            .copied()
            .ok_or_else(|| Error::CompanyNotFound(company_id.clone()))
    }
}

/// Pure rule producing one output column from a row.
pub type Extractor = fn(&Row<'_>, &CompanyDirectory<'_>) -> Result<String>;

/// A named report column.
#[derive(Clone, Copy)]
pub struct Field {
    pub label: &'static str,
    pub extract: Extractor,
}

pub const FIELDS: [Field; 6] = [
    Field {
        label: "User",
        extract: user_id,
    },
    Field {
        label: "First Name",
        extract: first_name,
    },
    Field {
        label: "Last Name",
        extract: last_name,
    },
    Field {
        label: "Date",
        extract: date,
    },
    Field {
        label: "Holding",
        extract: holding_name,
    },
    Field {
        label: "Value",
        extract: holding_value,
    },
];

fn user_id(row: &Row<'_>, _: &CompanyDirectory<'_>) -> Result<String> {
    Ok(row.investment.user_id.to_string())
}

fn first_name(row: &Row<'_>, _: &CompanyDirectory<'_>) -> Result<String> {
    Ok(row.investment.first_name.clone())
}

fn last_name(row: &Row<'_>, _: &CompanyDirectory<'_>) -> Result<String> {
    Ok(row.investment.last_name.clone())
}

fn date(row: &Row<'_>, _: &CompanyDirectory<'_>) -> Result<String> {
    Ok(row.investment.date.clone())
}

fn holding_name(row: &Row<'_>, companies: &CompanyDirectory<'_>) -> Result<String> {
    companies.name_of(&row.holding.id).map(str::to_string)
}

fn holding_value(row: &Row<'_>, _: &CompanyDirectory<'_>) -> Result<String> {
    compute_value(
        row.investment.investment_total,
        row.holding.investment_percentage,
    )
    .map(|value| value.to_string())
    .ok_or_else(|| Error::ValueOverflow {
        user_id: row.investment.user_id.clone(),
        company_id: row.holding.id.clone(),
    })
}

/// `total * percentage`, exact, with insignificant trailing zeros removed.
///
/// Returns `None` if the product does not fit in a [`Decimal`].
pub fn compute_value(total: Decimal, percentage: Decimal) -> Option<Decimal> {
    total.checked_mul(percentage).map(|value| value.normalize())
}

/// Column labels in output order.
pub fn header() -> Vec<&'static str> {
    FIELDS.iter().map(|field| field.label).collect()
}

/// One report line: the columns of [`FIELDS`] in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord(Vec<String>);

impl OutputRecord {
    pub fn new(fields: Vec<String>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &[String] {
        &self.0
    }
}

/// Apply every rule of [`FIELDS`] to `row`.
pub fn project(row: &Row<'_>, companies: &CompanyDirectory<'_>) -> Result<OutputRecord> {
    FIELDS
        .iter()
        .map(|field| (field.extract)(row, companies))
        .collect::<Result<Vec<_>>>()
        .map(OutputRecord)
}
