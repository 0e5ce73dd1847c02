//! Record schemas
//!
//! Each schema is a descriptor: an ordered list of [`FieldSpec`]s. A single
//! evaluator turns any descriptor plus a 1-based row index into a [`Record`].

mod field;

pub use field::{FieldRule, FieldSpec};

use chrono::NaiveDate;
use rand::Rng;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Scalar stored in a single cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Date(NaiveDate),
}

impl FieldValue {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

/// One generated row: field names paired with values, in column order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    fields: Vec<(&'static str, FieldValue)>,
}

impl Record {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, name: &'static str, value: FieldValue) {
        self.fields.push((name, value));
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    /// Replace the value of an existing field. Returns false if absent.
    pub fn set(&mut self, name: &str, value: FieldValue) -> bool {
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some((_, slot)) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    pub fn values(&self) -> impl Iterator<Item = &FieldValue> {
        self.fields.iter().map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

const PERSON_FIELDS: &[FieldSpec] = &[
    FieldSpec::new(
        "id",
        FieldRule::Sequence {
            prefix: "EMP",
            width: 6,
            modulus: None,
        },
    ),
    FieldSpec::new(
        "firstName",
        FieldRule::Indexed {
            prefix: "FirstName",
            suffix: "",
        },
    ),
    FieldSpec::new(
        "lastName",
        FieldRule::Indexed {
            prefix: "LastName",
            suffix: "",
        },
    ),
    FieldSpec::new(
        "email",
        FieldRule::Indexed {
            prefix: "user",
            suffix: "@company.com",
        },
    ),
    FieldSpec::new(
        "department",
        FieldRule::Cycle(&["Engineering", "Sales", "Marketing", "HR", "Finance"]),
    ),
    FieldSpec::new(
        "salary",
        FieldRule::RandomInt {
            min: 30_000,
            max: 130_000,
        },
    ),
    FieldSpec::new(
        "hireDate",
        FieldRule::Date {
            base_year: 2020,
            year_span: 4,
            as_text: true,
        },
    ),
    FieldSpec::new(
        "city",
        FieldRule::Cycle(&["Seoul", "Busan", "Incheon", "Daegu", "Gwangju"]),
    ),
    FieldSpec::new("phone", FieldRule::Phone),
    FieldSpec::new("status", FieldRule::Cycle(&["Active", "Inactive"])),
];

const SALE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new(
        "orderId",
        FieldRule::Sequence {
            prefix: "ORD",
            width: 8,
            modulus: None,
        },
    ),
    FieldSpec::new("productName", FieldRule::ProductCode),
    FieldSpec::new(
        "category",
        FieldRule::Cycle(&["Electronics", "Clothing", "Books", "Home", "Sports"]),
    ),
    FieldSpec::new("quantity", FieldRule::RandomInt { min: 1, max: 51 }),
    FieldSpec::new(
        "unitPrice",
        FieldRule::RandomInt {
            min: 1_000,
            max: 101_000,
        },
    ),
    FieldSpec::new("totalAmount", FieldRule::Product("quantity", "unitPrice")),
    FieldSpec::new(
        "orderDate",
        FieldRule::Date {
            base_year: 2024,
            year_span: 1,
            as_text: true,
        },
    ),
    FieldSpec::new(
        "customerName",
        FieldRule::Indexed {
            prefix: "Customer",
            suffix: "",
        },
    ),
    FieldSpec::new(
        "region",
        FieldRule::Cycle(&["North", "South", "East", "West", "Central"]),
    ),
    FieldSpec::new(
        "salesRep",
        FieldRule::Bucket {
            prefix: "Rep",
            modulus: 20,
            offset: 0,
        },
    ),
];

const TRANSACTION_FIELDS: &[FieldSpec] = &[
    FieldSpec::new(
        "transactionId",
        FieldRule::Sequence {
            prefix: "TXN",
            width: 10,
            modulus: None,
        },
    ),
    FieldSpec::new(
        "accountNumber",
        FieldRule::Sequence {
            prefix: "ACC",
            width: 6,
            modulus: Some(10_000),
        },
    ),
    FieldSpec::new("transactionType", FieldRule::Cycle(&["Debit", "Credit"])),
    FieldSpec::new(
        "amount",
        FieldRule::RandomInt {
            min: 100,
            max: 1_000_100,
        },
    ),
    FieldSpec::new("currency", FieldRule::Cycle(&["KRW", "USD", "EUR", "JPY"])),
    FieldSpec::new(
        "description",
        FieldRule::Indexed {
            prefix: "Transaction description for ",
            suffix: "",
        },
    ),
    FieldSpec::new(
        "transactionDate",
        FieldRule::Date {
            base_year: 2024,
            year_span: 1,
            as_text: false,
        },
    ),
    FieldSpec::new(
        "branch",
        FieldRule::Bucket {
            prefix: "Branch",
            modulus: 50,
            offset: 1,
        },
    ),
    FieldSpec::new(
        "category",
        FieldRule::Cycle(&["Operating", "Investment", "Financing"]),
    ),
    FieldSpec::new(
        "balance",
        FieldRule::RandomInt {
            min: 0,
            max: 10_000_000,
        },
    ),
];

/// The record shapes a run can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    Person,
    Sale,
    Transaction,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown schema '{0}' (expected person, sale or transaction)")]
pub struct UnknownSchema(pub String);

impl SchemaKind {
    pub const ALL: [SchemaKind; 3] = [
        SchemaKind::Person,
        SchemaKind::Sale,
        SchemaKind::Transaction,
    ];

    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            SchemaKind::Person => PERSON_FIELDS,
            SchemaKind::Sale => SALE_FIELDS,
            SchemaKind::Transaction => TRANSACTION_FIELDS,
        }
    }

    pub fn column_count(&self) -> usize {
        self.fields().len()
    }

    /// Short identifier, as accepted on the command line
    pub fn key(&self) -> &'static str {
        match self {
            SchemaKind::Person => "person",
            SchemaKind::Sale => "sale",
            SchemaKind::Transaction => "transaction",
        }
    }

    /// Menu label
    pub fn label(&self) -> &'static str {
        match self {
            SchemaKind::Person => "👥 Person data (employee records)",
            SchemaKind::Sale => "💰 Sales data (order records)",
            SchemaKind::Transaction => "🏦 Finance data (transaction records)",
        }
    }

    /// Column headers: field names with the first letter capitalized
    pub fn headers(&self) -> Vec<String> {
        self.fields().iter().map(|f| header_text(f.name)).collect()
    }

    /// Build the record for a 1-based row index
    pub fn build_record<R: Rng + ?Sized>(&self, index: u64, rng: &mut R) -> Record {
        let fields = self.fields();
        let mut record = Record::with_capacity(fields.len());
        for spec in fields {
            record.push(spec.name, spec.rule.evaluate(index, rng));
        }

        // Computed fields see the finished row
        for spec in fields.iter().filter(|f| f.rule.is_computed()) {
            if let FieldRule::Product(lhs, rhs) = spec.rule {
                let lhs = record.get(lhs).and_then(FieldValue::as_integer).unwrap_or(0);
                let rhs = record.get(rhs).and_then(FieldValue::as_integer).unwrap_or(0);
                record.set(spec.name, FieldValue::Integer(lhs * rhs));
            }
        }

        record
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SchemaKind {
    type Err = UnknownSchema;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "person" | "generatepersondata" => Ok(SchemaKind::Person),
            "sale" | "sales" | "generatesalesdata" => Ok(SchemaKind::Sale),
            "transaction" | "finance" | "generatefinancedata" => Ok(SchemaKind::Transaction),
            _ => Err(UnknownSchema(s.to_string())),
        }
    }
}

fn header_text(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
