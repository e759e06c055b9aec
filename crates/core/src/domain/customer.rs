use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerId(pub String);

/// Customer segment as the API names it. The `RETAIL`-style aliases are the
/// labels shown to operators and are accepted on input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerType {
    #[serde(rename = "B2C", alias = "RETAIL")]
    Retail,
    #[serde(rename = "B2B", alias = "WHOLESALE")]
    Wholesale,
    #[serde(rename = "ENTERPRISE_1", alias = "ENTERPRISE_TIER_1")]
    EnterpriseTier1,
    #[serde(rename = "ENTERPRISE_2", alias = "ENTERPRISE_TIER_2")]
    EnterpriseTier2,
}

impl CustomerType {
    pub const ALL: [CustomerType; 4] =
        [Self::Retail, Self::Wholesale, Self::EnterpriseTier1, Self::EnterpriseTier2];

    pub fn as_api_str(self) -> &'static str {
        match self {
            Self::Retail => "B2C",
            Self::Wholesale => "B2B",
            Self::EnterpriseTier1 => "ENTERPRISE_1",
            Self::EnterpriseTier2 => "ENTERPRISE_2",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Retail => "RETAIL",
            Self::Wholesale => "WHOLESALE",
            Self::EnterpriseTier1 => "ENTERPRISE_TIER_1",
            Self::EnterpriseTier2 => "ENTERPRISE_TIER_2",
        }
    }
}

impl std::fmt::Display for CustomerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error(
    "unknown customer type `{0}` (expected retail|wholesale|enterprise_tier_1|enterprise_tier_2)"
)]
pub struct UnknownCustomerType(pub String);

impl std::str::FromStr for CustomerType {
    type Err = UnknownCustomerType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_uppercase().replace('-', "_");
        match normalized.as_str() {
            "RETAIL" | "B2C" => Ok(Self::Retail),
            "WHOLESALE" | "B2B" => Ok(Self::Wholesale),
            "ENTERPRISE_TIER_1" | "ENTERPRISE_1" => Ok(Self::EnterpriseTier1),
            "ENTERPRISE_TIER_2" | "ENTERPRISE_2" => Ok(Self::EnterpriseTier2),
            _ => Err(UnknownCustomerType(value.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub customer_type: Option<CustomerType>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}
