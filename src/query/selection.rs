//! Selection sets, fields and inline fragments.
//!
//! The mutation API is additive only: selecting a field that is already
//! present merges into the existing selection instead of duplicating it. A
//! [`SelectionSet`] therefore only ever grows while extension hooks run, which
//! keeps every base field available to the code reading the response.

use std::collections::BTreeSet;
use std::fmt::{self, Write as _};

use crate::query::{ArgValue, QueryError};

/// A GraphQL field selection.
///
/// # Example
///
/// ```rust
/// use magento_graphql::query::{ArgValue, Field};
///
/// let field = Field::new("products")
///     .arg("filter", ArgValue::object([("sku", ArgValue::filter_eq("MT07"))]))
///     .select(|items| {
///         items.object("items", |item| {
///             item.fields(["sku", "name"]);
///         });
///     });
///
/// assert_eq!(
///     field.to_string(),
///     r#"products(filter:{sku:{eq:"MT07"}}){items{sku name}}"#
/// );
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    name: String,
    alias: Option<String>,
    arguments: Vec<(String, ArgValue)>,
    selection: SelectionSet,
}

impl Field {
    /// Creates a field without alias, arguments or sub-selection.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            arguments: Vec::new(),
            selection: SelectionSet::new(),
        }
    }

    /// Sets the response alias.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Adds an argument.
    #[must_use]
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.arguments.push((name.into(), value.into()));
        self
    }

    /// Fills the sub-selection.
    #[must_use]
    pub fn select(mut self, build: impl FnOnce(&mut SelectionSet)) -> Self {
        build(&mut self.selection);
        self
    }

    /// Returns the schema field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the key this field occupies in the response: the alias if set,
    /// the field name otherwise.
    #[must_use]
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// Returns the arguments in insertion order.
    #[must_use]
    pub fn arguments(&self) -> &[(String, ArgValue)] {
        &self.arguments
    }

    /// Returns the sub-selection.
    #[must_use]
    pub const fn selection(&self) -> &SelectionSet {
        &self.selection
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(alias) = &self.alias {
            write!(f, "{alias}:")?;
        }
        f.write_str(&self.name)?;
        if !self.arguments.is_empty() {
            f.write_char('(')?;
            for (i, (name, value)) in self.arguments.iter().enumerate() {
                if i > 0 {
                    f.write_char(',')?;
                }
                write!(f, "{name}:{value}")?;
            }
            f.write_char(')')?;
        }
        if !self.selection.is_empty() {
            write!(f, "{}", self.selection)?;
        }
        Ok(())
    }
}

/// An inline fragment, `...on Type{...}`.
#[derive(Clone, Debug, PartialEq)]
pub struct InlineFragment {
    type_condition: String,
    selection: SelectionSet,
}

impl InlineFragment {
    /// Returns the type condition.
    #[must_use]
    pub fn type_condition(&self) -> &str {
        &self.type_condition
    }

    /// Returns the fragment's selection.
    #[must_use]
    pub const fn selection(&self) -> &SelectionSet {
        &self.selection
    }
}

impl fmt::Display for InlineFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "...on {}{}", self.type_condition, self.selection)
    }
}

/// One entry of a selection set.
#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    /// A field.
    Field(Field),
    /// An inline fragment.
    InlineFragment(InlineFragment),
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(field) => write!(f, "{field}"),
            Self::InlineFragment(fragment) => write!(f, "{fragment}"),
        }
    }
}

/// An ordered set of selections.
///
/// Rendered compactly, `{a b c{d}}`, with entries in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionSet {
    items: Vec<Selection>,
}

impl SelectionSet {
    /// Creates an empty selection set.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Selects a field by name, unless a field with that response key is
    /// already selected.
    pub fn field(&mut self, name: &str) -> &mut Self {
        if self.get(name).is_none() {
            self.items.push(Selection::Field(Field::new(name)));
        }
        self
    }

    /// Selects several fields by name.
    pub fn fields<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) -> &mut Self {
        for name in names {
            self.field(name);
        }
        self
    }

    /// Extends the sub-selection of the field with response key `name`,
    /// selecting it first if absent.
    ///
    /// An existing field keeps its arguments.
    pub fn object(&mut self, name: &str, build: impl FnOnce(&mut Self)) -> &mut Self {
        let index = self.position(name).unwrap_or_else(|| {
            self.items.push(Selection::Field(Field::new(name)));
            self.items.len() - 1
        });
        if let Selection::Field(field) = &mut self.items[index] {
            build(&mut field.selection);
        }
        self
    }

    /// Extends the inline fragment on `type_condition`, adding it if absent.
    pub fn on_type(&mut self, type_condition: &str, build: impl FnOnce(&mut Self)) -> &mut Self {
        let existing = self.items.iter().position(|item| {
            matches!(item, Selection::InlineFragment(fragment) if fragment.type_condition == type_condition)
        });
        let index = existing.unwrap_or_else(|| {
            self.items.push(Selection::InlineFragment(InlineFragment {
                type_condition: type_condition.to_string(),
                selection: Self::new(),
            }));
            self.items.len() - 1
        });
        if let Selection::InlineFragment(fragment) = &mut self.items[index] {
            build(&mut fragment.selection);
        }
        self
    }

    /// Adds a fully built field, merging it into an existing field with the
    /// same response key.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::ConflictingArguments`] if the response key is
    /// already taken by a field with a different name or arguments.
    pub fn add(&mut self, field: Field) -> Result<&mut Self, QueryError> {
        let Some(index) = self.position(field.response_key()) else {
            self.items.push(Selection::Field(field));
            return Ok(self);
        };
        if let Selection::Field(existing) = &mut self.items[index] {
            if existing.name != field.name || existing.arguments != field.arguments {
                return Err(QueryError::ConflictingArguments {
                    field: field.response_key().to_string(),
                });
            }
            existing.selection.merge(field.selection)?;
        }
        Ok(self)
    }

    /// Merges every selection of `other` into this set.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::ConflictingArguments`] on a response key clash.
    pub fn merge(&mut self, other: Self) -> Result<&mut Self, QueryError> {
        for item in other.items {
            match item {
                Selection::Field(field) => {
                    self.add(field)?;
                }
                Selection::InlineFragment(fragment) => {
                    let mut result = Ok(());
                    self.on_type(&fragment.type_condition, |selection| {
                        result = selection.merge(fragment.selection).map(|_| ());
                    });
                    result?;
                }
            }
        }
        Ok(self)
    }

    /// Returns the field selected under `response_key`, if any.
    #[must_use]
    pub fn get(&self, response_key: &str) -> Option<&Field> {
        self.items.iter().find_map(|item| match item {
            Selection::Field(field) if field.response_key() == response_key => Some(field),
            _ => None,
        })
    }

    /// Returns `true` if a field is selected under `response_key`.
    #[must_use]
    pub fn contains(&self, response_key: &str) -> bool {
        self.get(response_key).is_some()
    }

    /// Returns the inline fragment on `type_condition`, if any.
    #[must_use]
    pub fn fragment(&self, type_condition: &str) -> Option<&InlineFragment> {
        self.items.iter().find_map(|item| match item {
            Selection::InlineFragment(fragment) if fragment.type_condition == type_condition => {
                Some(fragment)
            }
            _ => None,
        })
    }

    /// Iterates over the selections in order.
    pub fn iter(&self) -> impl Iterator<Item = &Selection> {
        self.items.iter()
    }

    /// Returns the number of direct selections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns every selected path, e.g. `price_range.minimum_price` or
    /// `...ConfigurableProduct.variants.product.sku`.
    #[must_use]
    pub fn paths(&self) -> BTreeSet<String> {
        let mut paths = BTreeSet::new();
        self.collect_paths("", &mut paths);
        paths
    }

    /// Returns `true` if every path selected in `other` is selected here.
    #[must_use]
    pub fn is_superset_of(&self, other: &Self) -> bool {
        self.paths().is_superset(&other.paths())
    }

    fn collect_paths(&self, prefix: &str, paths: &mut BTreeSet<String>) {
        for item in &self.items {
            let (segment, selection) = match item {
                Selection::Field(field) => (field.response_key().to_string(), &field.selection),
                Selection::InlineFragment(fragment) => {
                    (format!("...{}", fragment.type_condition), &fragment.selection)
                }
            };
            let path = if prefix.is_empty() {
                segment
            } else {
                format!("{prefix}.{segment}")
            };
            selection.collect_paths(&path, paths);
            paths.insert(path);
        }
    }

    fn position(&self, response_key: &str) -> Option<usize> {
        self.items.iter().position(
            |item| matches!(item, Selection::Field(field) if field.response_key() == response_key),
        )
    }
}

impl fmt::Display for SelectionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('{')?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_char(' ')?;
            }
            write!(f, "{item}")?;
        }
        f.write_char('}')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_is_selected_once() {
        let mut set = SelectionSet::new();
        set.fields(["sku", "name", "sku"]);

        assert_eq!(set.len(), 2);
        assert_eq!(set.to_string(), "{sku name}");
    }

    #[test]
    fn test_object_merges_into_existing_field() {
        let mut set = SelectionSet::new();
        set.object("small_image", |image| {
            image.field("url");
        });
        set.object("small_image", |image| {
            image.fields(["url", "label"]);
        });

        assert_eq!(set.to_string(), "{small_image{url label}}");
    }

    #[test]
    fn test_object_keeps_arguments_of_existing_field() {
        let mut set = SelectionSet::new();
        set.add(Field::new("products").arg("pageSize", 1_u32))
            .unwrap();
        set.object("products", |products| {
            products.field("total_count");
        });

        assert_eq!(set.to_string(), "{products(pageSize:1){total_count}}");
    }

    #[test]
    fn test_inline_fragments_merge_by_type_condition() {
        let mut set = SelectionSet::new();
        set.on_type("ConfigurableProduct", |c| {
            c.field("variants");
        });
        set.on_type("ConfigurableProduct", |c| {
            c.field("configurable_options");
        });

        assert_eq!(
            set.to_string(),
            "{...on ConfigurableProduct{variants configurable_options}}"
        );
        assert!(set.fragment("ConfigurableProduct").is_some());
    }

    #[test]
    fn test_alias_uses_its_own_response_key() {
        let mut set = SelectionSet::new();
        set.field("name");
        set.add(Field::new("name").alias("title")).unwrap();

        assert_eq!(set.to_string(), "{name title:name}");
        assert!(set.contains("title"));
    }

    #[test]
    fn test_add_rejects_conflicting_arguments() {
        let mut set = SelectionSet::new();
        set.add(Field::new("products").arg("pageSize", 1_u32))
            .unwrap();

        let result = set.add(Field::new("products").arg("pageSize", 2_u32));
        assert_eq!(
            result.unwrap_err(),
            QueryError::ConflictingArguments {
                field: "products".to_string()
            }
        );
    }

    #[test]
    fn test_merge_is_a_union() {
        let mut left = SelectionSet::new();
        left.field("a").object("b", |b| {
            b.field("c");
        });
        let mut right = SelectionSet::new();
        right.object("b", |b| {
            b.field("d");
        });
        right.field("e");

        left.merge(right.clone()).unwrap();

        assert_eq!(left.to_string(), "{a b{c d} e}");
        assert!(left.is_superset_of(&right));
    }

    #[test]
    fn test_paths() {
        let mut set = SelectionSet::new();
        set.field("sku").on_type("ConfigurableProduct", |c| {
            c.object("variants", |v| {
                v.field("attributes");
            });
        });

        let paths: Vec<String> = set.paths().into_iter().collect();
        assert_eq!(
            paths,
            vec![
                "...ConfigurableProduct",
                "...ConfigurableProduct.variants",
                "...ConfigurableProduct.variants.attributes",
                "sku",
            ]
        );
    }
}
