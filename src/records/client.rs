use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::ClientId;

/// a borrower
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    /// cpf
    #[serde(default, rename = "cpf", skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,
    /// opaque image reference, usually a data url
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    /// description of what was left as guarantee
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collateral: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Client {
    pub fn new(name: impl Into<String>, phone: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            phone: phone.into(),
            address: None,
            profession: None,
            national_id: None,
            photo: None,
            collateral: None,
            created_at,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_profession(mut self, profession: impl Into<String>) -> Self {
        self.profession = Some(profession.into());
        self
    }

    pub fn with_national_id(mut self, national_id: impl Into<String>) -> Self {
        self.national_id = Some(national_id.into());
        self
    }

    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }

    pub fn with_collateral(mut self, collateral: impl Into<String>) -> Self {
        self.collateral = Some(collateral.into());
        self
    }
}
