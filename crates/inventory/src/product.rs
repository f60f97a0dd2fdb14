use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Entity, ProductId, UnitId, find_by_id};

use crate::date::nullable_string;

/// Display name for references to products that no longer exist.
pub const UNKNOWN_PRODUCT: &str = "Unknown product";

/// Unit name used when a product's unit cannot be resolved.
pub const FALLBACK_UNIT: &str = "pcs";

/// Unit of measure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
}

impl Entity for Unit {
    type Id = UnitId;

    fn id(&self) -> UnitId {
        self.id
    }
}

/// Catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub unit_id: UnitId,
    #[serde(default, deserialize_with = "nullable_string")]
    pub remarks: String,
    /// Product-specific low-stock threshold; see [`crate::StockThreshold`].
    #[serde(default)]
    pub stock_threshold: Option<i64>,
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }
}

impl Product {
    /// Build a product from validated input.
    pub fn create(id: ProductId, input: NewProduct) -> DomainResult<Self> {
        input.validate()?;
        Ok(Self {
            id,
            name: input.name.trim().to_string(),
            unit_id: input.unit_id,
            remarks: input.remarks,
            stock_threshold: input.stock_threshold,
        })
    }

    /// Replace editable fields (the edit form always submits all of them).
    pub fn apply_update(&mut self, update: ProductUpdate) -> DomainResult<()> {
        update.validate()?;
        self.name = update.name.trim().to_string();
        self.unit_id = update.unit_id;
        self.remarks = update.remarks;
        self.stock_threshold = update.stock_threshold;
        Ok(())
    }
}

/// Input for creating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub unit_id: UnitId,
    #[serde(default, deserialize_with = "nullable_string")]
    pub remarks: String,
    #[serde(default)]
    pub stock_threshold: Option<i64>,
}

/// Input for editing a product; carries the full set of editable fields.
pub type ProductUpdate = NewProduct;

impl NewProduct {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        if matches!(self.stock_threshold, Some(t) if t < 0) {
            return Err(DomainError::validation("stock threshold cannot be negative"));
        }
        Ok(())
    }
}

/// Read-only lookups over a product/unit listing.
///
/// Dangling references never fail: they resolve to [`UNKNOWN_PRODUCT`] and
/// [`FALLBACK_UNIT`].
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a> {
    products: &'a [Product],
    units: &'a [Unit],
}

impl<'a> Catalog<'a> {
    pub fn new(products: &'a [Product], units: &'a [Unit]) -> Self {
        Self { products, units }
    }

    pub fn products(&self) -> &'a [Product] {
        self.products
    }

    pub fn product(&self, id: ProductId) -> Option<&'a Product> {
        find_by_id(self.products, id)
    }

    pub fn product_name(&self, id: ProductId) -> &'a str {
        self.product(id).map_or(UNKNOWN_PRODUCT, |p| p.name.as_str())
    }

    pub fn unit_name(&self, id: UnitId) -> &'a str {
        find_by_id(self.units, id).map_or(FALLBACK_UNIT, |u| u.name.as_str())
    }

    /// Unit name for a product, falling back when either link is dangling.
    pub fn unit_name_for(&self, product_id: ProductId) -> &'a str {
        self.product(product_id)
            .map_or(FALLBACK_UNIT, |p| self.unit_name(p.unit_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, threshold: Option<i64>) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            unit_id: UnitId::new(1),
            remarks: String::new(),
            stock_threshold: threshold,
        }
    }

    #[test]
    fn create_trims_name() {
        let p = Product::create(ProductId::new(1), input("  Cotton Twill  ", Some(50))).unwrap();
        assert_eq!(p.name, "Cotton Twill");
        assert_eq!(p.stock_threshold, Some(50));
    }

    #[test]
    fn create_rejects_blank_name() {
        let err = Product::create(ProductId::new(1), input("   ", None)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn create_rejects_negative_threshold() {
        let err = Product::create(ProductId::new(1), input("Denim", Some(-1))).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn update_replaces_fields_but_keeps_id() {
        let mut p = Product::create(ProductId::new(9), input("Denim", None)).unwrap();
        p.apply_update(input("Raw Denim", Some(0))).unwrap();
        assert_eq!(p.id, ProductId::new(9));
        assert_eq!(p.name, "Raw Denim");
        assert_eq!(p.stock_threshold, Some(0));
    }

    #[test]
    fn wire_shape_tolerates_null_remarks_and_missing_threshold() {
        let p: Product =
            serde_json::from_str(r#"{"id":3,"name":"Lining","unit_id":1,"remarks":null}"#).unwrap();
        assert_eq!(p.remarks, "");
        assert_eq!(p.stock_threshold, None);
    }

    #[test]
    fn catalog_degrades_for_dangling_references() {
        let products = vec![Product::create(ProductId::new(1), input("Denim", None)).unwrap()];
        let units = vec![Unit { id: UnitId::new(1), name: "meters".to_string() }];
        let catalog = Catalog::new(&products, &units);

        assert_eq!(catalog.product_name(ProductId::new(1)), "Denim");
        assert_eq!(catalog.unit_name_for(ProductId::new(1)), "meters");
        assert_eq!(catalog.product_name(ProductId::new(2)), UNKNOWN_PRODUCT);
        assert_eq!(catalog.unit_name_for(ProductId::new(2)), FALLBACK_UNIT);

        let no_units = Catalog::new(&products, &[]);
        assert_eq!(no_units.unit_name_for(ProductId::new(1)), FALLBACK_UNIT);
    }
}
