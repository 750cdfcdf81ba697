use serde::{Deserialize, Serialize};

use super::Id;

/// Financial company reference record from the companies service.
///
/// Only the fields the report needs are decoded; anything else the service
/// returns is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: Id,
    pub name: String,
}

impl Company {
    pub fn new(id: impl Into<Id>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_ignores_extra_fields() {
        let json = r#"{
            "id": "1",
            "name": "The Big Investment Company",
            "address": "14 Square Place",
            "postcode": "SW18UU",
            "frn": "234165"
        }"#;

        let company: Company = serde_json::from_str(json).unwrap();
        assert_eq!(company, Company::new("1", "The Big Investment Company"));
    }
}
