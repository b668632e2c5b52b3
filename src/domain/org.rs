use serde::{Deserialize, Serialize};

/// Organizational reference data. The engine only consults these tables for
/// existence checks (e.g. a loan's branch); their attributes round-trip
/// untouched.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bank {
    pub bank_id: u32,
    pub name: String,
    #[serde(default)]
    pub swift_code: Option<String>,
    #[serde(default)]
    pub headquarters: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub branch_id: u32,
    pub bank_id: u32,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub swift_code: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub employee_id: u32,
    pub branch_id: u32,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}
