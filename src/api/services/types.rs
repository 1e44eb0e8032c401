//! API request / response types

use serde::{Deserialize, Serialize};

/// 统一响应信封
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SaveUrlBody {
    pub url: String,
    #[serde(default)]
    pub alias: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SaveUrlData {
    pub alias: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DeleteUrlData {
    pub alias: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AdminBody {
    pub email: String,
    #[serde(default)]
    pub app_id: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AdminData {
    pub email: String,
    pub updated: bool,
}
