//! Pharmacies and suppliers
//!
//! Public lookups used to label stock: the pharmacy branches medicines are held at and the
//! supplier names found in the inventory.

use serde::Deserialize;

fn default_true() -> bool {
    true
}

/// Pharmacy branch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Pharmacy {
    /// Primary key
    pub id: u64,

    /// Short unique code such as `D001`
    #[serde(rename = "codigo", default)]
    pub code: String,

    /// Public name
    #[serde(rename = "nombre")]
    pub name: String,

    /// Street address
    #[serde(rename = "direccion", default)]
    pub address: Option<String>,

    /// City
    #[serde(rename = "ciudad", default)]
    pub city: Option<String>,

    /// Phone number
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,

    /// Contact e-mail
    #[serde(default)]
    pub email: Option<String>,

    /// Whether the branch is open
    #[serde(rename = "activo", default = "default_true")]
    pub active: bool,
}

impl Pharmacy {
    /// `code - name`, or just the name when the branch has no code.
    pub fn label(&self) -> String {
        if self.code.is_empty() {
            self.name.clone()
        } else {
            format!("{} - {}", self.code, self.name)
        }
    }
}

/// Supplier named on inventory records.
///
/// The lookup answers with bare names or with records carrying the name, so both decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "SupplierEntry")]
pub struct Supplier {
    /// Supplier name
    pub name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SupplierEntry {
    Name(String),
    Record {
        #[serde(alias = "nombre")]
        proveedor: String,
    },
}

impl From<SupplierEntry> for Supplier {
    fn from(entry: SupplierEntry) -> Self {
        match entry {
            SupplierEntry::Name(name) | SupplierEntry::Record { proveedor: name } => Self { name },
        }
    }
}
