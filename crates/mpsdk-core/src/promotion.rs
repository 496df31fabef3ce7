//! Vendor catalog promotions and the rules selecting the products they
//! discount.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{json, Map};
use uuid::Uuid;

use crate::error::{DomainError, NormalizeError};
use crate::record::{FromRecord, Record};

/// Product selection rule of a catalog promotion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CatalogRule {
    ProductInList { products_ids: Vec<i64> },
    ProductCategoryInList { categories_ids: Vec<i64> },
    And { items: Vec<CatalogRule> },
    Or { items: Vec<CatalogRule> },
}

impl CatalogRule {
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::ProductInList { .. } => "product_in_list",
            Self::ProductCategoryInList { .. } => "product_category_in_list",
            Self::And { .. } => "and",
            Self::Or { .. } => "or",
        }
    }

    /// Checks that every leaf selects something and every combinator
    /// combines something.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidPromotionRule`]; its context names the
    /// offending rule's `path` (e.g. `rule.items[1]`) and `type`.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.validate_at("rule")
    }

    fn validate_at(&self, path: &str) -> Result<(), DomainError> {
        let empty = match self {
            Self::ProductInList { products_ids } => products_ids.is_empty(),
            Self::ProductCategoryInList { categories_ids } => categories_ids.is_empty(),
            Self::And { items } | Self::Or { items } => items.is_empty(),
        };
        if empty {
            return Err(self.invalid(path, "rule selects nothing"));
        }

        if let Self::And { items } | Self::Or { items } = self {
            for (idx, item) in items.iter().enumerate() {
                item.validate_at(&format!("{path}.items[{idx}]"))?;
            }
        }
        Ok(())
    }

    fn invalid(&self, path: &str, message: &str) -> DomainError {
        let mut context = Map::new();
        context.insert("path".to_owned(), json!(path));
        context.insert("type".to_owned(), json!(self.type_name()));
        DomainError::InvalidPromotionRule {
            message: message.to_owned(),
            context,
        }
    }
}

impl FromRecord for CatalogRule {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        let rule_type = record.string("type")?;
        match rule_type.as_str() {
            "product_in_list" => Ok(Self::ProductInList {
                products_ids: record.int_list_or_empty("products_ids")?,
            }),
            "product_category_in_list" => Ok(Self::ProductCategoryInList {
                categories_ids: record.int_list_or_empty("categories_ids")?,
            }),
            "and" => Ok(Self::And {
                items: record.list("items")?,
            }),
            "or" => Ok(Self::Or {
                items: record.list("items")?,
            }),
            other => Err(record.malformed("type", format!("unknown rule type \"{other}\""))),
        }
    }
}

/// A percentage discount applied to the catalog products a rule selects.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPromotion {
    id: Option<Uuid>,
    name: String,
    active: bool,
    discount_percentage: Decimal,
    rule: Option<CatalogRule>,
}

impl CatalogPromotion {
    #[must_use]
    pub fn new(name: impl Into<String>, discount_percentage: Decimal) -> Self {
        Self {
            id: None,
            name: name.into(),
            active: true,
            discount_percentage,
            rule: None,
        }
    }

    /// Targets an existing promotion instead of creating one.
    #[must_use]
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    #[must_use]
    pub fn with_rule(mut self, rule: CatalogRule) -> Self {
        self.rule = Some(rule);
        self
    }

    /// Assigned by the marketplace once saved.
    #[must_use]
    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn discount_percentage(&self) -> Decimal {
        self.discount_percentage
    }

    #[must_use]
    pub fn rule(&self) -> Option<&CatalogRule> {
        self.rule.as_ref()
    }

    /// # Errors
    ///
    /// [`DomainError::SomeParametersAreInvalid`] for an empty name or a
    /// percentage outside `(0, 100]`; [`DomainError::InvalidPromotionRule`]
    /// from the rule.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::invalid_parameters("promotion name is required"));
        }
        if self.discount_percentage <= Decimal::ZERO || self.discount_percentage > Decimal::ONE_HUNDRED {
            return Err(DomainError::invalid_parameters(format!(
                "discount percentage must be in (0, 100], got {}",
                self.discount_percentage
            )));
        }
        match &self.rule {
            Some(rule) => rule.validate(),
            None => Ok(()),
        }
    }
}

impl Serialize for CatalogPromotion {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(None)?;
        if let Some(id) = &self.id {
            map.serialize_entry("promotion_id", id)?;
        }
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("active", &self.active)?;
        map.serialize_entry(
            "discounts",
            &[Discount {
                kind: "percentage",
                percentage: self.discount_percentage,
            }],
        )?;
        if let Some(rule) = &self.rule {
            map.serialize_entry("rule", rule)?;
        }
        map.end()
    }
}

#[derive(Serialize)]
struct Discount {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(with = "rust_decimal::serde::float")]
    percentage: Decimal,
}

impl FromRecord for CatalogPromotion {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        let id = record
            .opt_string("promotion_id")?
            .map(|raw| {
                Uuid::parse_str(&raw)
                    .map_err(|e| record.malformed("promotion_id", e.to_string()))
            })
            .transpose()?;

        let discounts: Vec<PercentageDiscount> = record.list_or_empty("discounts")?;
        let discount_percentage = discounts
            .first()
            .map_or(Decimal::ZERO, |d| d.percentage);

        Ok(Self {
            id,
            name: record.string("name")?,
            active: record.bool_or("active", false)?,
            discount_percentage,
            rule: record.opt_nested("rule")?,
        })
    }
}

struct PercentageDiscount {
    percentage: Decimal,
}

impl FromRecord for PercentageDiscount {
    fn from_record(record: &Record<'_>) -> Result<Self, NormalizeError> {
        let kind = record.string("type")?;
        if kind != "percentage" {
            return Err(record.malformed("type", format!("unsupported discount type \"{kind}\"")));
        }
        Ok(Self {
            percentage: record.decimal("percentage")?,
        })
    }
}
