use serde::{Deserialize, Serialize};

use orderdesk_core::{CustomerId, DomainError, DomainResult, Entity};

/// A known customer. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    last_name: String,
    first_name: String,
    street: String,
    zip_code: String,
    phone: String,
}

impl Customer {
    pub fn new(
        id: CustomerId,
        last_name: impl Into<String>,
        first_name: impl Into<String>,
        street: impl Into<String>,
        zip_code: impl Into<String>,
        phone: impl Into<String>,
    ) -> DomainResult<Self> {
        let last_name = last_name.into();
        if last_name.trim().is_empty() {
            return Err(DomainError::validation("customer last name must not be empty"));
        }
        Ok(Self {
            id,
            last_name,
            first_name: first_name.into(),
            street: street.into(),
            zip_code: zip_code.into(),
            phone: phone.into(),
        })
    }

    pub fn id_typed(&self) -> CustomerId {
        self.id
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn zip_code(&self) -> &str {
        &self.zip_code
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl core::fmt::Display for Customer {
    /// One directory listing row: `id  Last, First  street zip  phone`.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}  {}, {}  {} {}  {}",
            self.id, self.last_name, self.first_name, self.street, self.zip_code, self.phone
        )
    }
}
