use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::operations::{SaveNoId, qb_object};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaxRateDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_rate_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_rate_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_value: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_agency_id: Option<String>,
    /// `Sales` or `Purchase`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_applicable_on: Option<String>,
}

/// Creates a tax code with its rates in one call. The endpoint path
/// (`taxservice/taxcode`) differs from the response wrapper key
/// (`TaxService`), and the resource has no queryable id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaxService {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_code: Option<String>,
    #[serde(rename = "TaxCodeId", skip_serializing_if = "Option::is_none")]
    pub tax_code_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tax_rate_details: Vec<TaxRateDetails>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

qb_object!(TaxService, "TaxService/Taxcode", json = "TaxService");

impl SaveNoId for TaxService {}
