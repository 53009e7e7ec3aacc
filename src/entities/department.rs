use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entities::base::{MetaData, Ref};
use crate::operations::{Delete, Query, Read, Save, qb_entity};

/// A department (location) used to segment transactions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Department {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fully_qualified_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_department: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_ref: Option<Ref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_data: Option<MetaData>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

qb_entity!(Department, "Department");

impl Read for Department {}
impl Query for Department {}
impl Save for Department {}
impl Delete for Department {}
