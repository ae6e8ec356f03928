//! Cart Models

use std::{collections::HashSet, num::NonZeroU64, slice::Iter};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    cart::errors::{InvalidCart, Rejection},
    catalog::{Attributes, Product, ProductId},
};

/// A product line held in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product identifier; unique within a cart.
    pub id: ProductId,

    /// Product attributes copied from the catalog when the line was created.
    #[serde(flatten)]
    pub attributes: Attributes,

    /// Units held; always positive.
    pub amount: u32,
}

impl CartItem {
    /// Start a new line holding a single unit of `product`.
    #[must_use]
    pub fn from_product(product: Product) -> Self {
        let Product { id, mut attributes } = product;

        attributes.remove("id");
        attributes.remove("amount");

        Self {
            id,
            attributes,
            amount: 1,
        }
    }

    /// Display name, from the `title` or `name` attribute.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.attributes
            .get("title")
            .or_else(|| self.attributes.get("name"))
            .and_then(Value::as_str)
    }

    /// Unit price, when the catalog supplied a numeric `price` attribute.
    #[must_use]
    pub fn price(&self) -> Option<f64> {
        self.attributes.get("price").and_then(Value::as_f64)
    }
}

/// Ordered cart contents, in insertion order.
///
/// Serialized as a bare JSON array of items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from existing lines.
    ///
    /// # Errors
    ///
    /// Returns an error if a product appears twice or a line holds zero units.
    pub fn from_items(items: Vec<CartItem>) -> Result<Self, InvalidCart> {
        let mut seen = HashSet::with_capacity(items.len());

        for item in &items {
            if item.amount == 0 {
                return Err(InvalidCart::ZeroAmount(item.id));
            }

            if !seen.insert(item.id) {
                return Err(InvalidCart::DuplicateItem(item.id));
            }
        }

        Ok(Self { items })
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> Iter<'_, CartItem> {
        self.items.iter()
    }

    /// Number of distinct products held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Line for `product_id`, if present.
    #[must_use]
    pub fn get(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == product_id)
    }

    /// Sum of units across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.amount)).sum()
    }

    /// Add one unit of `product`, given `available` units in stock.
    ///
    /// An existing line is incremented; otherwise a new line with a single
    /// unit is appended.
    ///
    /// # Errors
    ///
    /// Returns [`Rejection::OutOfStock`] when nothing is in stock or the line
    /// would exceed the stock level.
    pub fn add_one(&mut self, product: Product, available: u32) -> Result<(), Rejection> {
        let product_id = product.id;

        if available == 0 {
            return Err(Rejection::OutOfStock {
                product_id,
                requested: 1,
                available,
            });
        }

        match self.items.iter_mut().find(|item| item.id == product_id) {
            Some(item) => {
                let requested = u64::from(item.amount) + 1;

                if requested > u64::from(available) {
                    return Err(Rejection::OutOfStock {
                        product_id,
                        requested,
                        available,
                    });
                }

                item.amount += 1;
            }
            None => self.items.push(CartItem::from_product(product)),
        }

        Ok(())
    }

    /// Remove the line for `product_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Rejection::NotInCart`] when there is no such line.
    pub fn remove(&mut self, product_id: ProductId) -> Result<CartItem, Rejection> {
        let position = self
            .items
            .iter()
            .position(|item| item.id == product_id)
            .ok_or(Rejection::NotInCart { product_id })?;

        Ok(self.items.remove(position))
    }

    /// Set the units held on the line for `product_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Rejection::OutOfStock`] when `requested` exceeds `available`,
    /// otherwise [`Rejection::NotInCart`] when there is no such line.
    pub fn set_amount(
        &mut self,
        product_id: ProductId,
        requested: NonZeroU64,
        available: u32,
    ) -> Result<(), Rejection> {
        let amount = u32::try_from(requested.get())
            .ok()
            .filter(|amount| *amount <= available)
            .ok_or(Rejection::OutOfStock {
                product_id,
                requested: requested.get(),
                available,
            })?;

        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == product_id)
            .ok_or(Rejection::NotInCart { product_id })?;

        item.amount = amount;

        Ok(())
    }
}

impl TryFrom<Vec<CartItem>> for Cart {
    type Error = InvalidCart;

    fn try_from(items: Vec<CartItem>) -> Result<Self, Self::Error> {
        Self::from_items(items)
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartItem;
    type IntoIter = Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Request to set the quantity of a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateProductAmount {
    /// Product whose line is changed.
    pub product_id: ProductId,

    /// Requested quantity; non-positive values are ignored.
    pub amount: i64,
}

/// Result of a cart operation that did not fault.
#[derive(Debug, Clone, PartialEq)]
pub enum CartOutcome {
    /// The change was persisted and is now the current cart.
    Committed(Cart),

    /// The change was refused; the cart is unchanged.
    Rejected(Rejection),

    /// The request asked for nothing; the cart is unchanged.
    Ignored,
}

impl CartOutcome {
    /// Whether a new cart was committed.
    #[must_use]
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }

    /// The rejection, if the change was refused.
    #[must_use]
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Rejected(rejection) => Some(*rejection),
            Self::Committed(_) | Self::Ignored => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn product(id: u64, title: &str) -> TestResult<Product> {
        Ok(serde_json::from_value(json!({
            "id": id,
            "title": title,
            "price": 139.9,
        }))?)
    }

    fn amount(value: u64) -> TestResult<NonZeroU64> {
        Ok(NonZeroU64::new(value).ok_or("amount must be non-zero")?)
    }

    #[test]
    fn add_one_appends_new_line_with_single_unit() -> TestResult {
        let mut cart = Cart::new();

        cart.add_one(product(1, "Shoe")?, 5)?;

        let item = cart.get(ProductId::new(1)).ok_or("line missing")?;

        assert_eq!(cart.len(), 1);
        assert_eq!(item.amount, 1);
        assert_eq!(item.name(), Some("Shoe"));
        assert!(
            item.price().is_some_and(|price| (price - 139.9).abs() < f64::EPSILON),
            "unexpected price {:?}",
            item.price()
        );

        Ok(())
    }

    #[test]
    fn add_one_increments_existing_line_in_place() -> TestResult {
        let mut cart = Cart::new();

        cart.add_one(product(1, "Shoe")?, 5)?;
        cart.add_one(product(2, "Boot")?, 5)?;
        cart.add_one(product(1, "Shoe")?, 5)?;

        let ids: Vec<u64> = cart.iter().map(|item| item.id.get()).collect();

        assert_eq!(ids, vec![1, 2]);
        assert_eq!(cart.get(ProductId::new(1)).map(|item| item.amount), Some(2));
        assert_eq!(cart.total_quantity(), 3);

        Ok(())
    }

    #[test]
    fn add_one_with_zero_stock_is_rejected() -> TestResult {
        let mut cart = Cart::new();

        let result = cart.add_one(product(1, "Shoe")?, 0);

        assert_eq!(
            result,
            Err(Rejection::OutOfStock {
                product_id: ProductId::new(1),
                requested: 1,
                available: 0,
            })
        );
        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn add_one_beyond_stock_is_rejected() -> TestResult {
        let mut cart = Cart::new();

        cart.add_one(product(1, "Shoe")?, 2)?;
        cart.add_one(product(1, "Shoe")?, 2)?;

        let result = cart.add_one(product(1, "Shoe")?, 2);

        assert_eq!(
            result,
            Err(Rejection::OutOfStock {
                product_id: ProductId::new(1),
                requested: 3,
                available: 2,
            })
        );
        assert_eq!(cart.get(ProductId::new(1)).map(|item| item.amount), Some(2));

        Ok(())
    }

    #[test]
    fn new_line_drops_catalog_amount_attribute() -> TestResult {
        let product: Product = serde_json::from_value(json!({
            "id": 4,
            "title": "Sandal",
            "amount": 99,
        }))?;

        let item = CartItem::from_product(product);

        assert_eq!(item.amount, 1);
        assert!(!item.attributes.contains_key("amount"));
        assert_eq!(
            serde_json::to_value(&item)?,
            json!({ "id": 4, "title": "Sandal", "amount": 1 })
        );

        Ok(())
    }

    #[test]
    fn remove_takes_the_line_out() -> TestResult {
        let mut cart = Cart::new();

        cart.add_one(product(1, "Shoe")?, 5)?;
        cart.add_one(product(2, "Boot")?, 5)?;

        let removed = cart.remove(ProductId::new(1))?;

        assert_eq!(removed.id, ProductId::new(1));
        assert_eq!(cart.len(), 1);
        assert!(cart.get(ProductId::new(1)).is_none());

        Ok(())
    }

    #[test]
    fn remove_missing_line_is_rejected() {
        let mut cart = Cart::new();

        assert_eq!(
            cart.remove(ProductId::new(1)),
            Err(Rejection::NotInCart {
                product_id: ProductId::new(1)
            })
        );
    }

    #[test]
    fn set_amount_within_stock() -> TestResult {
        let mut cart = Cart::new();

        cart.add_one(product(1, "Shoe")?, 5)?;
        cart.set_amount(ProductId::new(1), amount(5)?, 5)?;

        assert_eq!(cart.get(ProductId::new(1)).map(|item| item.amount), Some(5));

        Ok(())
    }

    #[test]
    fn set_amount_above_stock_is_rejected_before_lookup() -> TestResult {
        let mut cart = Cart::new();

        let result = cart.set_amount(ProductId::new(9), amount(4)?, 3);

        assert_eq!(
            result,
            Err(Rejection::OutOfStock {
                product_id: ProductId::new(9),
                requested: 4,
                available: 3,
            })
        );

        Ok(())
    }

    #[test]
    fn set_amount_on_missing_line_is_rejected() -> TestResult {
        let mut cart = Cart::new();

        let result = cart.set_amount(ProductId::new(9), amount(1)?, 3);

        assert_eq!(
            result,
            Err(Rejection::NotInCart {
                product_id: ProductId::new(9)
            })
        );

        Ok(())
    }

    #[test]
    fn decoding_rejects_duplicate_lines() {
        let result = serde_json::from_value::<Cart>(json!([
            { "id": 1, "amount": 1 },
            { "id": 1, "amount": 2 },
        ]));

        assert!(result.is_err(), "duplicate lines must not decode");
    }

    #[test]
    fn decoding_rejects_zero_amount() {
        let result = serde_json::from_value::<Cart>(json!([{ "id": 1, "amount": 0 }]));

        assert!(result.is_err(), "zero amount must not decode");
    }

    #[test]
    fn encode_decode_preserves_order_and_attributes() -> TestResult {
        let mut cart = Cart::new();

        cart.add_one(product(2, "Boot")?, 5)?;
        cart.add_one(product(1, "Shoe")?, 5)?;
        cart.add_one(product(2, "Boot")?, 5)?;

        let decoded: Cart = serde_json::from_str(&serde_json::to_string(&cart)?)?;

        assert_eq!(decoded, cart);

        Ok(())
    }

    #[test]
    fn outcome_accessors() {
        let rejection = Rejection::NotInCart {
            product_id: ProductId::new(1),
        };

        assert!(CartOutcome::Committed(Cart::new()).is_committed());
        assert!(!CartOutcome::Ignored.is_committed());
        assert_eq!(CartOutcome::Rejected(rejection).rejection(), Some(rejection));
        assert_eq!(CartOutcome::Ignored.rejection(), None);
    }
}
