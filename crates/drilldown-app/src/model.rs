// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Deserializer, Serialize};

/// One flat record of the department/section/division/plant hierarchy.
///
/// The wire form is camelCase JSON where any field may be missing or null;
/// both normalize to the empty string so downstream filtering never has to
/// reason about absence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Row {
    #[serde(deserialize_with = "null_as_empty")]
    pub department_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub section_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub division_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub plant_code: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub plant_name: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}
