//! Submitted form payloads.
//!
//! Every field is optional at the deserialization layer so a missing field
//! becomes a [`FormError`] (rendered as a 400 with the form redisplayed)
//! instead of axum's generic 422 rejection.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use thiserror::Error;

use shopkeep_core::{QuantityError, parse_price, parse_stock};

use crate::models::{Product, ProductInput, Shop, ShopInput};

/// Reasons a submitted form cannot be turned into store input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    /// A required field was not submitted.
    #[error("{0} is required")]
    Missing(&'static str),

    /// A price or stock field did not parse.
    #[error(transparent)]
    Quantity(#[from] QuantityError),
}

/// Render a form page with a 400 status.
pub fn rejected(page: impl IntoResponse) -> Response {
    (StatusCode::BAD_REQUEST, page).into_response()
}

fn required(field: &'static str, value: Option<&String>) -> Result<String, FormError> {
    value.cloned().ok_or(FormError::Missing(field))
}

/// Blank optional fields are stored as absent.
fn optional(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).cloned()
}

// =============================================================================
// Shop
// =============================================================================

/// Shop create/edit form.
#[derive(Debug, Default, Deserialize)]
pub struct ShopForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub image: Option<String>,
}

impl ShopForm {
    /// Convert the submission into store input.
    ///
    /// # Errors
    ///
    /// Returns `FormError::Missing` if `name` was not submitted.
    pub fn parse(&self) -> Result<ShopInput, FormError> {
        Ok(ShopInput {
            name: required("name", self.name.as_ref())?,
            description: optional(self.description.as_ref()),
            location: optional(self.location.as_ref()),
            image: optional(self.image.as_ref()),
        })
    }

    /// The submitted values, for redisplaying the form.
    #[must_use]
    pub fn values(&self) -> ShopFormValues {
        ShopFormValues {
            name: self.name.clone().unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
            location: self.location.clone().unwrap_or_default(),
            image: self.image.clone().unwrap_or_default(),
        }
    }
}

/// Values shown in the shop form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShopFormValues {
    pub name: String,
    pub description: String,
    pub location: String,
    pub image: String,
}

impl From<&Shop> for ShopFormValues {
    fn from(shop: &Shop) -> Self {
        Self {
            name: shop.name.clone(),
            description: shop.description.clone().unwrap_or_default(),
            location: shop.location.clone().unwrap_or_default(),
            image: shop.image.clone().unwrap_or_default(),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// Product create/edit form.
#[derive(Debug, Default, Deserialize)]
pub struct ProductForm {
    pub name: Option<String>,
    pub sell_price: Option<String>,
    pub buy_price: Option<String>,
    pub nr_in_stock: Option<String>,
}

impl ProductForm {
    /// Convert the submission into store input.
    ///
    /// # Errors
    ///
    /// Returns `FormError::Missing` for an absent field and
    /// `FormError::Quantity` when a price or the stock count does not parse.
    pub fn parse(&self) -> Result<ProductInput, FormError> {
        let name = required("name", self.name.as_ref())?;
        let sell_price = required("sell_price", self.sell_price.as_ref())?;
        let buy_price = required("buy_price", self.buy_price.as_ref())?;
        let nr_in_stock = required("nr_in_stock", self.nr_in_stock.as_ref())?;

        Ok(ProductInput {
            name,
            sell_price: parse_price("sell_price", &sell_price)?,
            buy_price: parse_price("buy_price", &buy_price)?,
            nr_in_stock: parse_stock("nr_in_stock", &nr_in_stock)?,
        })
    }

    /// The submitted values, for redisplaying the form.
    #[must_use]
    pub fn values(&self) -> ProductFormValues {
        ProductFormValues {
            name: self.name.clone().unwrap_or_default(),
            sell_price: self.sell_price.clone().unwrap_or_default(),
            buy_price: self.buy_price.clone().unwrap_or_default(),
            nr_in_stock: self.nr_in_stock.clone().unwrap_or_default(),
        }
    }
}

/// Values shown in the product form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFormValues {
    pub name: String,
    pub sell_price: String,
    pub buy_price: String,
    pub nr_in_stock: String,
}

impl From<&Product> for ProductFormValues {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            sell_price: product.sell_price.to_string(),
            buy_price: product.buy_price.to_string(),
            nr_in_stock: product.nr_in_stock.to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product_form(sell: &str) -> ProductForm {
        ProductForm {
            name: Some("Widget".to_string()),
            sell_price: Some(sell.to_string()),
            buy_price: Some("4".to_string()),
            nr_in_stock: Some("7".to_string()),
        }
    }

    #[test]
    fn test_shop_form_blank_optionals_become_none() {
        let form = ShopForm {
            name: Some("Acme".to_string()),
            description: Some("   ".to_string()),
            location: Some("Berlin".to_string()),
            image: None,
        };
        let input = form.parse().unwrap();
        assert_eq!(input.name, "Acme");
        assert_eq!(input.description, None);
        assert_eq!(input.location.as_deref(), Some("Berlin"));
        assert_eq!(input.image, None);
    }

    #[test]
    fn test_shop_form_requires_name() {
        let form = ShopForm::default();
        assert_eq!(form.parse().unwrap_err(), FormError::Missing("name"));
        assert_eq!(form.parse().unwrap_err().to_string(), "name is required");
    }

    #[test]
    fn test_product_form_parses_numbers() {
        let input = product_form(" 12.5 ").parse().unwrap();
        assert_eq!(input.name, "Widget");
        assert!((input.sell_price - 12.5).abs() < f64::EPSILON);
        assert!((input.buy_price - 4.0).abs() < f64::EPSILON);
        assert_eq!(input.nr_in_stock, 7);
    }

    #[test]
    fn test_product_form_rejects_non_numeric_price() {
        let err = product_form("cheap").parse().unwrap_err();
        assert!(matches!(err, FormError::Quantity(_)));
        assert!(err.to_string().contains("sell_price"));
    }

    #[test]
    fn test_product_form_reports_first_missing_field() {
        let mut form = product_form("1");
        form.nr_in_stock = None;
        assert_eq!(form.parse().unwrap_err(), FormError::Missing("nr_in_stock"));
    }

    #[test]
    fn test_product_form_values_keep_raw_input() {
        let values = product_form("abc").values();
        assert_eq!(values.sell_price, "abc");
        assert_eq!(values.nr_in_stock, "7");
    }
}
