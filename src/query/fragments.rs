//! Base fragments for the storefront entities.
//!
//! Each base fragment selects exactly the fields the typed models in
//! [`crate::retriever`] read. Extension hooks run on top of them.

use crate::query::{apply_hooks, QueryError, QueryHook, SelectionSet};

/// Type name of configurable products in the Magento schema.
pub const CONFIGURABLE_PRODUCT_TYPE: &str = "ConfigurableProduct";

fn money(selection: &mut SelectionSet) {
    selection.fields(["value", "currency"]);
}

fn price_range(selection: &mut SelectionSet) {
    selection.object("price_range", |range| {
        range.object("minimum_price", |price| {
            price
                .object("regular_price", money)
                .object("final_price", money)
                .object("discount", |discount| {
                    discount.fields(["amount_off", "percent_off"]);
                });
        });
    });
}

/// Fields selected for each variant of a configurable product.
#[must_use]
pub fn base_variant_fragment() -> SelectionSet {
    let mut variant = SelectionSet::new();
    variant.fields(["__typename", "uid", "sku", "name", "stock_status"]);
    price_range(&mut variant);
    variant.object("media_gallery", |gallery| {
        gallery.fields(["url", "label", "position", "disabled"]);
    });
    variant
}

/// Fields selected for a product, with `variant` nested under the
/// configurable-product variants.
#[must_use]
pub fn base_product_fragment(variant: SelectionSet) -> SelectionSet {
    let mut product = SelectionSet::new();
    product.fields(["__typename", "uid", "sku", "name", "url_key", "stock_status"]);
    price_range(&mut product);
    product.object("small_image", |image| {
        image.fields(["url", "label"]);
    });
    product.on_type(CONFIGURABLE_PRODUCT_TYPE, |configurable| {
        configurable
            .object("configurable_options", |option| {
                option.fields(["uid", "attribute_code", "label"]);
                option.object("values", |value| {
                    value.fields(["uid", "value_index", "label"]);
                });
            })
            .object("variants", |variants| {
                variants.object("attributes", |attributes| {
                    attributes.fields(["uid", "code", "value_index", "label"]);
                });
                variants.object("product", |product| {
                    *product = variant;
                });
            });
    });
    product
}

/// Fields selected for a category.
#[must_use]
pub fn base_category_fragment() -> SelectionSet {
    let mut category = SelectionSet::new();
    category.fields([
        "uid",
        "name",
        "url_key",
        "url_path",
        "description",
        "image",
        "product_count",
        "children_count",
    ]);
    category
}

/// Fields selected for a product search result; `product` is nested under
/// `items`.
#[must_use]
pub fn base_search_fragment(product: SelectionSet) -> SelectionSet {
    let mut search = SelectionSet::new();
    search.field("total_count");
    search.object("page_info", |page| {
        page.fields(["current_page", "page_size", "total_pages"]);
    });
    search.object("items", |items| {
        *items = product;
    });
    search.object("aggregations", |aggregation| {
        aggregation.fields(["attribute_code", "label", "count"]);
        aggregation.object("options", |option| {
            option.fields(["label", "value", "count"]);
        });
    });
    search
}

/// Builds the variant fragment with `variant_hooks` applied.
///
/// # Errors
///
/// Returns the first hook error, or [`QueryError::EmptySelection`] if the
/// hooks leave nothing selected.
pub fn variant_fragment(variant_hooks: &[QueryHook]) -> Result<SelectionSet, QueryError> {
    non_empty("product", apply_hooks(base_variant_fragment(), variant_hooks)?)
}

/// Builds the product fragment.
///
/// Variant hooks shape the nested variant selection first; product hooks
/// then run on the whole product fragment.
///
/// # Errors
///
/// Returns the first hook error, or [`QueryError::EmptySelection`] if the
/// hooks leave nothing selected.
pub fn product_fragment(
    product_hooks: &[QueryHook],
    variant_hooks: &[QueryHook],
) -> Result<SelectionSet, QueryError> {
    let variant = variant_fragment(variant_hooks)?;
    non_empty("items", apply_hooks(base_product_fragment(variant), product_hooks)?)
}

/// Builds the category fragment with `category_hooks` applied.
///
/// # Errors
///
/// Returns the first hook error, or [`QueryError::EmptySelection`] if the
/// hooks leave nothing selected.
pub fn category_fragment(category_hooks: &[QueryHook]) -> Result<SelectionSet, QueryError> {
    non_empty("categoryList", apply_hooks(base_category_fragment(), category_hooks)?)
}

/// Builds the search fragment. Product and variant hooks shape the items,
/// search hooks run on the whole result selection.
///
/// # Errors
///
/// Returns the first hook error, or [`QueryError::EmptySelection`] if the
/// hooks leave nothing selected.
pub fn search_fragment(
    product_hooks: &[QueryHook],
    variant_hooks: &[QueryHook],
    search_hooks: &[QueryHook],
) -> Result<SelectionSet, QueryError> {
    let product = product_fragment(product_hooks, variant_hooks)?;
    non_empty("products", apply_hooks(base_search_fragment(product), search_hooks)?)
}

fn non_empty(field: &str, selection: SelectionSet) -> Result<SelectionSet, QueryError> {
    if selection.is_empty() {
        return Err(QueryError::EmptySelection {
            field: field.to_string(),
        });
    }
    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_fragment_rendering() {
        assert_eq!(
            base_variant_fragment().to_string(),
            "{__typename uid sku name stock_status \
             price_range{minimum_price{regular_price{value currency} final_price{value currency} discount{amount_off percent_off}}} \
             media_gallery{url label position disabled}}"
        );
    }

    #[test]
    fn test_product_fragment_nests_variant_fragment() {
        let product = product_fragment(&[], &[]).unwrap();
        let configurable = product.fragment(CONFIGURABLE_PRODUCT_TYPE).unwrap();
        let variants = configurable.selection().get("variants").unwrap();
        let nested = variants.selection().get("product").unwrap();

        assert_eq!(nested.selection(), &base_variant_fragment());
    }

    #[test]
    fn test_variant_hooks_reach_nested_selection() {
        let hooks = vec![QueryHook::extend(|variant| {
            variant.field("color");
        })];
        let product = product_fragment(&[], &hooks).unwrap();

        assert!(product
            .paths()
            .contains("...ConfigurableProduct.variants.product.color"));
        assert!(!product.contains("color"));
    }

    #[test]
    fn test_extended_fragments_are_supersets() {
        let hooks = vec![QueryHook::extend(|product| {
            product.field("meta_title");
            product.object("price_range", |range| {
                range.object("maximum_price", |price| {
                    price.object("final_price", |money| {
                        money.field("value");
                    });
                });
            });
        })];
        let base = product_fragment(&[], &[]).unwrap();
        let extended = product_fragment(&hooks, &hooks).unwrap();

        assert!(extended.is_superset_of(&base));
        assert!(extended.paths().contains("price_range.maximum_price.final_price.value"));
    }

    #[test]
    fn test_search_fragment_wraps_products() {
        let search = search_fragment(&[], &[], &[]).unwrap();
        let items = search.get("items").unwrap();

        assert_eq!(items.selection(), &product_fragment(&[], &[]).unwrap());
        assert!(search.contains("total_count"));
        assert!(search.contains("aggregations"));
    }

    #[test]
    fn test_emptying_hooks_are_rejected() {
        let empty = vec![QueryHook::replace(|_| SelectionSet::new())];

        assert_eq!(
            variant_fragment(&empty),
            Err(QueryError::EmptySelection {
                field: "product".to_string()
            })
        );
        assert_eq!(
            product_fragment(&empty, &[]),
            Err(QueryError::EmptySelection {
                field: "items".to_string()
            })
        );
        assert_eq!(
            product_fragment(&[], &empty),
            Err(QueryError::EmptySelection {
                field: "product".to_string()
            })
        );
        assert_eq!(
            category_fragment(&empty),
            Err(QueryError::EmptySelection {
                field: "categoryList".to_string()
            })
        );
        assert_eq!(
            search_fragment(&[], &[], &empty),
            Err(QueryError::EmptySelection {
                field: "products".to_string()
            })
        );
    }
}
