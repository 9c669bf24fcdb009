//! Complete query documents for product, category and search lookups.

use std::fmt;

use super::value::check_name;
use crate::query::{
    category_fragment, product_fragment, search_fragment, ArgValue, Field, QueryError,
    QueryHook,
};

/// Identifies a single product.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ProductIdentifier {
    /// Lookup by SKU.
    Sku(String),
    /// Lookup by URL key.
    UrlKey(String),
}

impl ProductIdentifier {
    /// Returns the filter attribute name.
    #[must_use]
    pub const fn attribute(&self) -> &'static str {
        match self {
            Self::Sku(_) => "sku",
            Self::UrlKey(_) => "url_key",
        }
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Sku(value) | Self::UrlKey(value) => value,
        }
    }
}

impl fmt::Display for ProductIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.attribute(), self.value())
    }
}

/// Identifies a single category.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CategoryIdentifier {
    /// Lookup by encoded UID.
    Uid(String),
    /// Lookup by legacy numeric id.
    Id(u64),
    /// Lookup by URL path, e.g. `gear/bags`.
    UrlPath(String),
}

impl CategoryIdentifier {
    /// Returns the filter attribute name.
    #[must_use]
    pub const fn attribute(&self) -> &'static str {
        match self {
            Self::Uid(_) => "category_uid",
            Self::Id(_) => "ids",
            Self::UrlPath(_) => "url_path",
        }
    }

    fn filter_value(&self) -> ArgValue {
        match self {
            Self::Uid(value) | Self::UrlPath(value) => ArgValue::filter_eq(value.as_str()),
            Self::Id(id) => ArgValue::filter_eq(id.to_string()),
        }
    }
}

impl fmt::Display for CategoryIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uid(value) | Self::UrlPath(value) => write!(f, "{}={value}", self.attribute()),
            Self::Id(id) => write!(f, "{}={id}", self.attribute()),
        }
    }
}

/// A condition on one product attribute in a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterCondition {
    /// Exact match, `{eq:"..."}`.
    Eq(String),
    /// Any of the values, `{in:[...]}`.
    In(Vec<String>),
    /// Full-text match, `{match:"..."}`.
    Match(String),
    /// Inclusive range; either bound may be open.
    Range {
        /// Lower bound.
        from: Option<String>,
        /// Upper bound.
        to: Option<String>,
    },
}

impl From<&FilterCondition> for ArgValue {
    fn from(condition: &FilterCondition) -> Self {
        match condition {
            FilterCondition::Eq(value) => Self::filter_eq(value.as_str()),
            FilterCondition::In(values) => Self::object([(
                "in",
                Self::List(values.iter().map(|value| Self::from(value.as_str())).collect()),
            )]),
            FilterCondition::Match(value) => Self::object([("match", Self::from(value.as_str()))]),
            FilterCondition::Range { from, to } => {
                let mut bounds = Vec::new();
                if let Some(from) = from {
                    bounds.push(("from".to_string(), Self::from(from.as_str())));
                }
                if let Some(to) = to {
                    bounds.push(("to".to_string(), Self::from(to.as_str())));
                }
                Self::Object(bounds)
            }
        }
    }
}

/// Sort direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    /// Returns the GraphQL enum value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Default number of products per search page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Parameters of a product search.
///
/// # Example
///
/// ```rust
/// use magento_graphql::query::{FilterCondition, SearchCriteria, SortDirection};
///
/// let criteria = SearchCriteria::new()
///     .phrase("bag")
///     .filter("category_uid", FilterCondition::Eq("MTI=".to_string()))
///     .page(2, 12)
///     .sort("price", SortDirection::Asc);
///
/// assert_eq!(criteria.current_page(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchCriteria {
    phrase: Option<String>,
    filters: Vec<(String, FilterCondition)>,
    current_page: u32,
    page_size: u32,
    sort: Option<(String, SortDirection)>,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            phrase: None,
            filters: Vec::new(),
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            sort: None,
        }
    }
}

impl SearchCriteria {
    /// Creates criteria matching every product, first page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the full-text search phrase.
    #[must_use]
    pub fn phrase(mut self, phrase: impl Into<String>) -> Self {
        self.phrase = Some(phrase.into());
        self
    }

    /// Adds an attribute filter. A later filter on the same attribute
    /// replaces the earlier one.
    #[must_use]
    pub fn filter(mut self, attribute: impl Into<String>, condition: FilterCondition) -> Self {
        let attribute = attribute.into();
        self.filters.retain(|(existing, _)| *existing != attribute);
        self.filters.push((attribute, condition));
        self
    }

    /// Sets the 1-based page and the page size. Zero values are raised to 1.
    #[must_use]
    pub fn page(mut self, current_page: u32, page_size: u32) -> Self {
        self.current_page = current_page.max(1);
        self.page_size = page_size.max(1);
        self
    }

    /// Sorts by one attribute.
    #[must_use]
    pub fn sort(mut self, attribute: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some((attribute.into(), direction));
        self
    }

    /// Returns the 1-based page.
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Checks that filter and sort attributes are GraphQL names.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidName`] for the first invalid attribute.
    pub fn validate(&self) -> Result<(), QueryError> {
        self.filters
            .iter()
            .map(|(attribute, _)| attribute)
            .chain(self.sort.as_ref().map(|(attribute, _)| attribute))
            .try_for_each(|attribute| check_name(attribute))
    }

    fn apply_to(&self, mut field: Field) -> Result<Field, QueryError> {
        self.validate()?;
        if let Some(phrase) = &self.phrase {
            field = field.arg("search", phrase.as_str());
        }
        if !self.filters.is_empty() {
            field = field.arg(
                "filter",
                ArgValue::Object(
                    self.filters
                        .iter()
                        .map(|(attribute, condition)| (attribute.clone(), condition.into()))
                        .collect(),
                ),
            );
        }
        field = field
            .arg("currentPage", self.current_page)
            .arg("pageSize", self.page_size);
        if let Some((attribute, direction)) = &self.sort {
            field = field.arg(
                "sort",
                ArgValue::object([(attribute.as_str(), ArgValue::enum_value(direction.as_str()))]),
            );
        }
        Ok(field)
    }
}

fn document(root: &Field) -> String {
    format!("{{{root}}}")
}

/// Renders the query for one product.
///
/// # Example
///
/// ```rust
/// use magento_graphql::query::{product_query, ProductIdentifier, QueryHook};
///
/// let hooks = vec![QueryHook::replace(|_| {
///     let mut minimal = magento_graphql::query::SelectionSet::new();
///     minimal.field("sku");
///     minimal
/// })];
/// let query = product_query(&ProductIdentifier::Sku("MT07".to_string()), &hooks, &[]).unwrap();
/// assert_eq!(query, r#"{products(filter:{sku:{eq:"MT07"}}){items{sku}}}"#);
/// ```
///
/// # Errors
///
/// Returns the first hook error.
pub fn product_query(
    identifier: &ProductIdentifier,
    product_hooks: &[QueryHook],
    variant_hooks: &[QueryHook],
) -> Result<String, QueryError> {
    let product = product_fragment(product_hooks, variant_hooks)?;
    let filter = ArgValue::object([(identifier.attribute(), ArgValue::filter_eq(identifier.value()))]);
    let root = Field::new("products")
        .arg("filter", filter)
        .select(|products| {
            products.object("items", |items| *items = product);
        });
    Ok(document(&root))
}

/// Renders the query for one category.
///
/// # Errors
///
/// Returns the first hook error.
pub fn category_query(
    identifier: &CategoryIdentifier,
    category_hooks: &[QueryHook],
) -> Result<String, QueryError> {
    let category = category_fragment(category_hooks)?;
    let filter = ArgValue::object([(identifier.attribute(), identifier.filter_value())]);
    let root = Field::new("categoryList")
        .arg("filters", filter)
        .select(|list| *list = category);
    Ok(document(&root))
}

/// Renders a product search query.
///
/// # Errors
///
/// Returns the first hook error, or [`QueryError::InvalidName`] if a filter
/// or sort attribute is not a GraphQL name.
pub fn search_query(
    criteria: &SearchCriteria,
    product_hooks: &[QueryHook],
    variant_hooks: &[QueryHook],
    search_hooks: &[QueryHook],
) -> Result<String, QueryError> {
    let search = search_fragment(product_hooks, variant_hooks, search_hooks)?;
    let root = criteria
        .apply_to(Field::new("products"))?
        .select(|result| *result = search);
    Ok(document(&root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SelectionSet;

    #[test]
    fn test_product_query_without_hooks() {
        let query = product_query(&ProductIdentifier::Sku("24-MB01".to_string()), &[], &[]).unwrap();

        insta::assert_snapshot!(query, @r#"{products(filter:{sku:{eq:"24-MB01"}}){items{__typename uid sku name url_key stock_status price_range{minimum_price{regular_price{value currency} final_price{value currency} discount{amount_off percent_off}}} small_image{url label} ...on ConfigurableProduct{configurable_options{uid attribute_code label values{uid value_index label}} variants{attributes{uid code value_index label} product{__typename uid sku name stock_status price_range{minimum_price{regular_price{value currency} final_price{value currency} discount{amount_off percent_off}}} media_gallery{url label position disabled}}}}}}}"#);
    }

    #[test]
    fn test_product_query_by_url_key_escapes_value() {
        let hooks = vec![QueryHook::replace(|_| {
            let mut set = SelectionSet::new();
            set.field("sku");
            set
        })];
        let query =
            product_query(&ProductIdentifier::UrlKey("a\"b".to_string()), &hooks, &[]).unwrap();

        assert_eq!(query, r#"{products(filter:{url_key:{eq:"a\"b"}}){items{sku}}}"#);
    }

    #[test]
    fn test_product_query_is_deterministic() {
        let hooks = vec![QueryHook::extend(|product| {
            product.field("description");
        })];
        let identifier = ProductIdentifier::Sku("MT07".to_string());

        assert_eq!(
            product_query(&identifier, &hooks, &hooks).unwrap(),
            product_query(&identifier, &hooks, &hooks).unwrap()
        );
    }

    #[test]
    fn test_category_query_filters() {
        let uid = category_query(&CategoryIdentifier::Uid("MTI=".to_string()), &[]).unwrap();
        assert_eq!(
            uid,
            r#"{categoryList(filters:{category_uid:{eq:"MTI="}}){uid name url_key url_path description image product_count children_count}}"#
        );

        let id = category_query(&CategoryIdentifier::Id(12), &[]).unwrap();
        assert!(id.starts_with(r#"{categoryList(filters:{ids:{eq:"12"}})"#));

        let path = category_query(&CategoryIdentifier::UrlPath("gear/bags".to_string()), &[]).unwrap();
        assert!(path.starts_with(r#"{categoryList(filters:{url_path:{eq:"gear/bags"}})"#));
    }

    #[test]
    fn test_search_query_arguments() {
        let criteria = SearchCriteria::new()
            .phrase("bag")
            .filter("category_uid", FilterCondition::Eq("MTI=".to_string()))
            .filter(
                "price",
                FilterCondition::Range {
                    from: Some("10".to_string()),
                    to: None,
                },
            )
            .filter(
                "color",
                FilterCondition::In(vec!["49".to_string(), "50".to_string()]),
            )
            .page(2, 12)
            .sort("price", SortDirection::Desc);
        let hooks = vec![QueryHook::replace(|_| {
            let mut set = SelectionSet::new();
            set.field("total_count");
            set
        })];

        let query = search_query(&criteria, &[], &[], &hooks).unwrap();
        assert_eq!(
            query,
            r#"{products(search:"bag",filter:{category_uid:{eq:"MTI="},price:{from:"10"},color:{in:["49","50"]}},currentPage:2,pageSize:12,sort:{price:DESC}){total_count}}"#
        );
    }

    #[test]
    fn test_search_defaults() {
        let criteria = SearchCriteria::new().page(0, 0);
        assert_eq!(criteria.current_page(), 1);
        assert_eq!(criteria.page_size(), 1);

        let query = search_query(&SearchCriteria::new(), &[], &[], &[]).unwrap();
        assert!(query.starts_with("{products(currentPage:1,pageSize:20){total_count "));
    }

    #[test]
    fn test_later_filter_replaces_earlier_one() {
        let criteria = SearchCriteria::new()
            .filter("sku", FilterCondition::Eq("a".to_string()))
            .filter("sku", FilterCondition::Match("b".to_string()));
        let hooks = vec![QueryHook::replace(|_| {
            let mut count = SelectionSet::new();
            count.field("total_count");
            count
        })];

        let query = search_query(&criteria, &[], &[], &hooks).unwrap();
        assert_eq!(
            query,
            r#"{products(filter:{sku:{match:"b"}},currentPage:1,pageSize:20){total_count}}"#
        );
    }

    #[test]
    fn test_emptied_search_selection_is_rejected() {
        let hooks = vec![QueryHook::replace(|_| SelectionSet::new())];

        assert_eq!(
            search_query(&SearchCriteria::new(), &[], &[], &hooks),
            Err(QueryError::EmptySelection {
                field: "products".to_string()
            })
        );
    }

    #[test]
    fn test_search_attributes_must_be_names() {
        let injected = SearchCriteria::new().filter(
            "sku:{eq:\"x\"}}){items{sku}} evil: customer{email} x(a",
            FilterCondition::Eq("y".to_string()),
        );
        assert!(matches!(
            search_query(&injected, &[], &[], &[]),
            Err(QueryError::InvalidName { .. })
        ));

        let sorted = SearchCriteria::new().sort("price DESC", SortDirection::Asc);
        assert_eq!(
            sorted.validate(),
            Err(QueryError::InvalidName {
                name: "price DESC".to_string()
            })
        );
        assert_eq!(SearchCriteria::new().sort("price", SortDirection::Asc).validate(), Ok(()));
    }

    #[test]
    fn test_identifier_display() {
        assert_eq!(ProductIdentifier::Sku("MT07".to_string()).to_string(), "sku=MT07");
        assert_eq!(CategoryIdentifier::Id(3).to_string(), "ids=3");
    }
}
