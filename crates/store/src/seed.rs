use serde::{Deserialize, Serialize};

use orderdesk_catalog::Product;
use orderdesk_customers::Customer;

use crate::gateway::StoreError;

/// Seed document: the records a run starts from.
///
/// Replaces hard-coded entity lists with a JSON document, e.g.:
///
/// ```json
/// {
///   "products": [
///     { "upc": "123", "name": "16 oz. hickory hammer",
///       "manufacturer": "Stanley Tools", "category": "1",
///       "list_price": "9.97", "units_in_stock": 50 }
///   ],
///   "customers": [
///     { "id": 1, "last_name": "Smith", "first_name": "Bob",
///       "street": "123 Street", "zip_code": "12345",
///       "phone": "012-345-6789" }
///   ]
/// }
/// ```
///
/// Prices are decimal strings; parsing them as JSON floats would reintroduce
/// the binary-float drift the money type exists to avoid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seed {
    pub products: Vec<Product>,
    pub customers: Vec<Customer>,
}

impl Seed {
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }
}
