//! Roles

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Role of a signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Role {
    /// Storefront customer
    #[default]
    #[serde(rename = "cliente")]
    Client,

    /// Pharmacy employee
    #[serde(rename = "empleado")]
    Employee,

    /// Administrator
    #[serde(rename = "admin")]
    Admin,
}

/// Something a role may be allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Browse the public catalog
    BrowseCatalog,

    /// Fill a cart and place orders
    PlaceOrders,

    /// See one's own invoice history
    ViewOwnInvoices,

    /// Create, edit and deactivate medicines
    ManageMedicines,

    /// See all orders and change their status
    ManageOrders,

    /// Draft and edit invoices for any client
    ManageInvoices,

    /// Administer user accounts
    ManageUsers,

    /// Administer role records
    ManageRoles,

    /// Read contact messages
    ReadMessages,
}

impl Capability {
    /// Every capability, in table order.
    pub const ALL: [Capability; 9] = [
        Capability::BrowseCatalog,
        Capability::PlaceOrders,
        Capability::ViewOwnInvoices,
        Capability::ManageMedicines,
        Capability::ManageOrders,
        Capability::ManageInvoices,
        Capability::ManageUsers,
        Capability::ManageRoles,
        Capability::ReadMessages,
    ];
}

impl Role {
    /// Every role.
    pub const ALL: [Role; 3] = [Role::Client, Role::Employee, Role::Admin];

    /// Checks the capability table.
    pub fn can(self, capability: Capability) -> bool {
        match capability {
            Capability::BrowseCatalog | Capability::PlaceOrders | Capability::ViewOwnInvoices => {
                true
            }
            Capability::ManageMedicines
            | Capability::ManageOrders
            | Capability::ManageInvoices => matches!(self, Role::Employee | Role::Admin),
            Capability::ManageUsers | Capability::ManageRoles | Capability::ReadMessages => {
                matches!(self, Role::Admin)
            }
        }
    }

    /// All capabilities granted to this role.
    pub fn capabilities(self) -> SmallVec<[Capability; 9]> {
        Capability::ALL
            .into_iter()
            .filter(|capability| self.can(*capability))
            .collect()
    }

    /// Route a user lands on after signing in.
    pub fn home_route(self) -> &'static str {
        match self {
            Role::Client => "/perfilCliente",
            Role::Employee => "/panelEmpleado",
            Role::Admin => "/panelAdmin",
        }
    }

    /// Backend name of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Client => "cliente",
            Role::Employee => "empleado",
            Role::Admin => "admin",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}
