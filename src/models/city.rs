//! City and role types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The part a city plays in the delivery network.
///
/// Exactly one warehouse is expected by convention, but the network does
/// not enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CityRole {
    /// Origin of deliveries.
    Warehouse,
    /// Pass-through city with no demand of its own.
    #[default]
    Intermediate,
    /// Delivery destination.
    Customer,
}

impl fmt::Display for CityRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Warehouse => "warehouse",
            Self::Intermediate => "intermediate",
            Self::Customer => "customer",
        };
        f.write_str(name)
    }
}

/// A city (network node) identified by a unique string.
///
/// # Examples
///
/// ```
/// use u_roadnet::models::{City, CityRole};
///
/// let sp = City::warehouse("São Paulo");
/// assert_eq!(sp.id(), "São Paulo");
/// assert_eq!(sp.role(), CityRole::Warehouse);
///
/// let rio = City::new("Rio de Janeiro", CityRole::Customer);
/// assert!(rio.is_customer());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct City {
    id: String,
    role: CityRole,
}

impl City {
    /// Creates a city with the given identifier and role.
    pub fn new(id: impl Into<String>, role: CityRole) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    /// Creates a warehouse city.
    pub fn warehouse(id: impl Into<String>) -> Self {
        Self::new(id, CityRole::Warehouse)
    }

    /// Creates an intermediate city.
    pub fn intermediate(id: impl Into<String>) -> Self {
        Self::new(id, CityRole::Intermediate)
    }

    /// Creates a customer city.
    pub fn customer(id: impl Into<String>) -> Self {
        Self::new(id, CityRole::Customer)
    }

    /// Unique identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Role tag.
    pub fn role(&self) -> CityRole {
        self.role
    }

    pub fn is_warehouse(&self) -> bool {
        self.role == CityRole::Warehouse
    }

    pub fn is_customer(&self) -> bool {
        self.role == CityRole::Customer
    }
}
