//! Product listing query construction
//!
//! Translates the catalog's query-string parameters into a SurrealQL
//! filter/sort/pagination specification. The listing always restricts to
//! active products; everything else is opt-in per request.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default page size for product listings
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Sort fields the listing accepts; anything else falls back to `createdAt`
const SORT_FIELDS: [&str; 4] = ["createdAt", "price", "name", "stock"];

/// Raw query-string parameters of `GET /api/products`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Tri-state: "true" → stock > 0, "false" → stock == 0, absent → no filter
    pub in_stock: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Echo of the filters actually applied, returned alongside the page
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    pub sort_by: String,
    pub sort_order: String,
}

/// A built product listing query
///
/// `select_statement` / `count_statement` share the same WHERE clause and
/// bindings; LIMIT/START are inlined as integers (they are computed values,
/// never raw input).
#[derive(Debug, Clone)]
pub struct ProductQuery {
    page: u32,
    limit: u32,
    conditions: Vec<String>,
    bindings: Vec<(&'static str, Value)>,
    sort_field: &'static str,
    sort_desc: bool,
    /// Filters echoed back to the caller
    pub filters: AppliedFilters,
}

impl ProductListQuery {
    /// Resolve defaults, clamp out-of-range values, and build the query
    pub fn build(self) -> ProductQuery {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(DEFAULT_PAGE_SIZE).max(1);

        let mut conditions = vec!["isActive = true".to_string()];
        let mut bindings: Vec<(&'static str, Value)> = Vec::new();

        let search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        if let Some(ref term) = search {
            conditions.push(
                "(string::lowercase(name) CONTAINS $search \
                 OR string::lowercase(description) CONTAINS $search)"
                    .to_string(),
            );
            bindings.push(("search", Value::from(term.clone())));
        }

        if let Some(ref category) = self.category {
            conditions.push("category = $category".to_string());
            bindings.push(("category", Value::from(category.clone())));
        }

        if let Some(min_price) = self.min_price {
            conditions.push("price >= $minPrice".to_string());
            bindings.push(("minPrice", Value::from(min_price)));
        }

        if let Some(max_price) = self.max_price {
            conditions.push("price <= $maxPrice".to_string());
            bindings.push(("maxPrice", Value::from(max_price)));
        }

        // Unrecognized values behave like "absent"
        let in_stock = match self.in_stock.as_deref() {
            Some("true") => {
                conditions.push("stock > 0".to_string());
                Some(true)
            }
            Some("false") => {
                conditions.push("stock = 0".to_string());
                Some(false)
            }
            _ => None,
        };

        let sort_field = self
            .sort_by
            .as_deref()
            .and_then(|requested| SORT_FIELDS.iter().find(|f| **f == requested))
            .copied()
            .unwrap_or("createdAt");
        let sort_desc = !matches!(self.sort_order.as_deref(), Some("asc"));

        let filters = AppliedFilters {
            search,
            category: self.category,
            min_price: self.min_price,
            max_price: self.max_price,
            in_stock,
            sort_by: sort_field.to_string(),
            sort_order: if sort_desc { "desc" } else { "asc" }.to_string(),
        };

        ProductQuery {
            page,
            limit,
            conditions,
            bindings,
            sort_field,
            sort_desc,
            filters,
        }
    }
}

impl ProductQuery {
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Offset of the first record of the requested page
    pub fn start(&self) -> u32 {
        (self.page - 1) * self.limit
    }

    /// Bind parameters shared by the select and count statements
    pub fn bindings(&self) -> &[(&'static str, Value)] {
        &self.bindings
    }

    fn where_clause(&self) -> String {
        self.conditions.join(" AND ")
    }

    /// The page query
    pub fn select_statement(&self) -> String {
        format!(
            "SELECT * FROM product WHERE {} ORDER BY {} {} LIMIT {} START {}",
            self.where_clause(),
            self.sort_field,
            if self.sort_desc { "DESC" } else { "ASC" },
            self.limit,
            self.start(),
        )
    }

    /// The matching-record count query
    pub fn count_statement(&self) -> String {
        format!(
            "SELECT count() AS count FROM product WHERE {} GROUP ALL",
            self.where_clause(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding_names(query: &ProductQuery) -> Vec<&str> {
        query.bindings().iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn test_defaults() {
        let query = ProductListQuery::default().build();

        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), DEFAULT_PAGE_SIZE);
        assert_eq!(query.start(), 0);
        assert_eq!(
            query.select_statement(),
            "SELECT * FROM product WHERE isActive = true \
             ORDER BY createdAt DESC LIMIT 10 START 0"
        );
        assert_eq!(
            query.count_statement(),
            "SELECT count() AS count FROM product WHERE isActive = true GROUP ALL"
        );
        assert!(query.bindings().is_empty());
    }

    #[test]
    fn test_page_zero_clamps_to_one() {
        let query = ProductListQuery {
            page: Some(0),
            ..Default::default()
        }
        .build();
        assert_eq!(query.page(), 1);
        assert_eq!(query.start(), 0);
    }

    #[test]
    fn test_start_arithmetic() {
        let query = ProductListQuery {
            page: Some(3),
            limit: Some(25),
            ..Default::default()
        }
        .build();
        assert_eq!(query.start(), 50);
        assert!(query.select_statement().ends_with("LIMIT 25 START 50"));
    }

    #[test]
    fn test_search_is_lowercased_and_matches_name_or_description() {
        let query = ProductListQuery {
            search: Some("  WiDgEt ".into()),
            ..Default::default()
        }
        .build();

        let statement = query.select_statement();
        assert!(statement.contains("string::lowercase(name) CONTAINS $search"));
        assert!(statement.contains("string::lowercase(description) CONTAINS $search"));
        assert_eq!(
            query.bindings()[0],
            ("search", Value::from("widget"))
        );
        assert_eq!(query.filters.search.as_deref(), Some("widget"));
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let query = ProductListQuery {
            search: Some("   ".into()),
            ..Default::default()
        }
        .build();
        assert!(!query.select_statement().contains("$search"));
        assert!(query.filters.search.is_none());
    }

    #[test]
    fn test_price_range_bindings() {
        let query = ProductListQuery {
            min_price: Some(5.0),
            max_price: Some(20.0),
            ..Default::default()
        }
        .build();

        let statement = query.select_statement();
        assert!(statement.contains("price >= $minPrice"));
        assert!(statement.contains("price <= $maxPrice"));
        assert_eq!(binding_names(&query), vec!["minPrice", "maxPrice"]);
    }

    #[test]
    fn test_in_stock_tri_state() {
        let yes = ProductListQuery {
            in_stock: Some("true".into()),
            ..Default::default()
        }
        .build();
        assert!(yes.select_statement().contains("stock > 0"));
        assert_eq!(yes.filters.in_stock, Some(true));

        let no = ProductListQuery {
            in_stock: Some("false".into()),
            ..Default::default()
        }
        .build();
        assert!(no.select_statement().contains("stock = 0"));
        assert_eq!(no.filters.in_stock, Some(false));

        let junk = ProductListQuery {
            in_stock: Some("maybe".into()),
            ..Default::default()
        }
        .build();
        assert!(!junk.select_statement().contains("stock"));
        assert_eq!(junk.filters.in_stock, None);
    }

    #[test]
    fn test_sort_whitelist_falls_back_to_created_at() {
        let query = ProductListQuery {
            sort_by: Some("price; DROP TABLE product".into()),
            ..Default::default()
        }
        .build();
        assert!(query.select_statement().contains("ORDER BY createdAt DESC"));

        let query = ProductListQuery {
            sort_by: Some("price".into()),
            sort_order: Some("asc".into()),
            ..Default::default()
        }
        .build();
        assert!(query.select_statement().contains("ORDER BY price ASC"));
        assert_eq!(query.filters.sort_by, "price");
        assert_eq!(query.filters.sort_order, "asc");
    }

    #[test]
    fn test_category_filter() {
        let query = ProductListQuery {
            category: Some("fasteners".into()),
            ..Default::default()
        }
        .build();
        assert!(query.select_statement().contains("category = $category"));
        assert_eq!(query.filters.category.as_deref(), Some("fasteners"));
    }

    #[test]
    fn test_always_restricts_to_active() {
        let query = ProductListQuery {
            search: Some("x".into()),
            category: Some("y".into()),
            in_stock: Some("true".into()),
            ..Default::default()
        }
        .build();
        assert!(query.select_statement().starts_with(
            "SELECT * FROM product WHERE isActive = true AND"
        ));
        assert!(query.count_statement().contains("isActive = true AND"));
    }
}
