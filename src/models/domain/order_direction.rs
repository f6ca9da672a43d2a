use async_graphql::Enum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Direction a sorting exercise expects the learner to arrange its values in.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize, Enum, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
}

impl OrderDirection {
    /// Whether `left` followed by `right` is correctly ordered. Ties never are.
    pub fn is_ordered(self, left: f64, right: f64) -> bool {
        match self {
            OrderDirection::Ascending => left < right,
            OrderDirection::Descending => left > right,
        }
    }
}
