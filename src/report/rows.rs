use crate::models::{Holding, Investment};

/// One investment paired with exactly one of its holdings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Row<'a> {
    pub investment: &'a Investment,
    pub holding: &'a Holding,
}

/// Explode each investment into one row per holding.
///
/// Rows keep investment order, then holding order within each investment.
/// Investments without holdings contribute nothing.
pub fn expand_rows(investments: &[Investment]) -> Vec<Row<'_>> {
    investments
        .iter()
        .flat_map(|investment| {
            investment
                .holdings
                .iter()
                .map(move |holding| Row {
                    investment,
                    holding,
                })
        })
        .collect()
}
