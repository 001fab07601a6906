//! List-query construction: filter predicate, sort and pagination window.
//!
//! Search endpoints never reject a request for a bad parameter. Each
//! parameter either contributes a clause or is dropped, and pagination and
//! sorting fall back to defaults.

use bson::{doc, Bson, Document};

use crate::normalize::AGE_FIELD;
use crate::reference::Reference;
use crate::resource::{ResourceKind, CREATED_AT_FIELD, ID_FIELD, NAME_FIELD};

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Page size used when `limit` is missing or out of range.
pub const DEFAULT_LIMIT: i64 = 10;

/// Largest accepted page size.
pub const MAX_LIMIT: i64 = 100;

pub const DEFAULT_PAGE: i64 = 1;

pub const ADOPTED_FIELD: &str = "adopted";
pub const SPECIES_FIELD: &str = "species";
pub const CATEGORY_FIELD: &str = "category";

// ---------------------------------------------------------------------------
// Request parameters
// ---------------------------------------------------------------------------

/// Raw query-string parameters of a list request.
///
/// Kept as strings so that malformed values can be ignored individually
/// instead of failing the whole extraction.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub species: Option<String>,
    pub name: Option<String>,
    pub min_age: Option<String>,
    pub max_age: Option<String>,
    pub adopted: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListParams {
    /// Collect parameters from decoded query-string pairs.
    ///
    /// The first occurrence of a repeated key wins; unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "species" => &mut params.species,
                "name" => &mut params.name,
                "minAge" => &mut params.min_age,
                "maxAge" => &mut params.max_age,
                "adopted" => &mut params.adopted,
                "category" => &mut params.category,
                "sort" => &mut params.sort,
                "order" => &mut params.order,
                "page" => &mut params.page,
                "limit" => &mut params.limit,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        params
    }
}

// ---------------------------------------------------------------------------
// Filter builder
// ---------------------------------------------------------------------------

/// Bound of a range clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Inclusive lower bound (`$gte`).
    AtLeast,
    /// Inclusive upper bound (`$lte`).
    AtMost,
}

impl Bound {
    fn operator(self) -> &'static str {
        match self {
            Bound::AtLeast => "$gte",
            Bound::AtMost => "$lte",
        }
    }
}

/// Accumulates filter clauses and renders them as one store predicate.
///
/// Clauses on the same field merge instead of overwriting each other:
/// range bounds collect into one range, and alternatives added under the
/// same group are unioned. Distinct alternative groups are all required.
#[derive(Debug, Clone, Default)]
pub struct FilterBuilder {
    equals: Vec<(String, Bson)>,
    ranges: Vec<(String, Document)>,
    alternatives: Vec<(String, Vec<Document>)>,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field == value`. A later call for the same field replaces the value.
    pub fn add_eq(&mut self, field: &str, value: impl Into<Bson>) -> &mut Self {
        let value = value.into();
        match self.equals.iter_mut().find(|(f, _)| f == field) {
            Some((_, existing)) => *existing = value,
            None => self.equals.push((field.to_string(), value)),
        }
        self
    }

    /// Add one bound to the range on `field`, keeping any other bound.
    pub fn add_range(&mut self, field: &str, bound: Bound, value: impl Into<Bson>) -> &mut Self {
        let value = value.into();
        match self.ranges.iter_mut().find(|(f, _)| f == field) {
            Some((_, range)) => {
                range.insert(bound.operator(), value);
            }
            None => {
                let mut range = Document::new();
                range.insert(bound.operator(), value);
                self.ranges.push((field.to_string(), range));
            }
        }
        self
    }

    /// Require at least one of `branches` to match.
    ///
    /// `group` names the logical field the branches describe. Branches added
    /// under an existing group extend it.
    pub fn add_alternatives(
        &mut self,
        group: &str,
        branches: impl IntoIterator<Item = Document>,
    ) -> &mut Self {
        let branches: Vec<Document> = branches.into_iter().collect();
        if branches.is_empty() {
            return self;
        }
        match self.alternatives.iter_mut().find(|(g, _)| g == group) {
            Some((_, existing)) => existing.extend(branches),
            None => self.alternatives.push((group.to_string(), branches)),
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.equals.is_empty() && self.ranges.is_empty() && self.alternatives.is_empty()
    }

    /// Render the predicate. An empty builder matches everything.
    pub fn build(&self) -> Document {
        let mut filter = Document::new();
        for (field, value) in &self.equals {
            filter.insert(field.clone(), value.clone());
        }
        for (field, range) in &self.ranges {
            filter.insert(field.clone(), range.clone());
        }

        let mut groups = self
            .alternatives
            .iter()
            .map(|(_, branches)| {
                Bson::Array(branches.iter().cloned().map(Bson::Document).collect())
            });

        match self.alternatives.len() {
            0 => {}
            1 => {
                if let Some(branches) = groups.next() {
                    filter.insert("$or", branches);
                }
            }
            _ => {
                let all: Vec<Bson> = groups
                    .map(|branches| Bson::Document(doc! { "$or": branches }))
                    .collect();
                filter.insert("$and", all);
            }
        }
        filter
    }
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// `asc` in any case is ascending; anything else, including absence, is descending.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if s.eq_ignore_ascii_case("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    pub fn direction(self) -> i32 {
        match self {
            SortOrder::Asc => 1,
            SortOrder::Desc => -1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

impl Sort {
    /// Pick the sort field from the kind's allow-list, defaulting to `createdAt`.
    pub fn parse(kind: ResourceKind, field: Option<&str>, order: Option<&str>) -> Self {
        let field = field
            .filter(|f| kind.is_sortable(f))
            .unwrap_or(CREATED_AT_FIELD);
        Self {
            field: field.to_string(),
            order: SortOrder::parse(order),
        }
    }

    /// Store sort specification.
    ///
    /// Sorting by `createdAt` adds `_id` in the same direction so documents
    /// with equal (or derived) creation times keep a stable order across pages.
    pub fn to_document(&self) -> Document {
        let direction = self.order.direction();
        let mut spec = Document::new();
        spec.insert(self.field.clone(), direction);
        if self.field == CREATED_AT_FIELD {
            spec.insert(ID_FIELD, direction);
        }
        spec
    }
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number.
    pub page: i64,
    pub limit: i64,
}

impl Pagination {
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = page
            .and_then(|p| p.parse::<i64>().ok())
            .filter(|p| *p > 0)
            .unwrap_or(DEFAULT_PAGE);
        let limit = limit
            .and_then(|l| l.parse::<i64>().ok())
            .filter(|l| (1..=MAX_LIMIT).contains(l))
            .unwrap_or(DEFAULT_LIMIT);
        Self { page, limit }
    }

    /// Number of documents before this page.
    pub fn skip(&self) -> u64 {
        let skip = (self.page - 1).saturating_mul(self.limit);
        u64::try_from(skip).unwrap_or(0)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

// ---------------------------------------------------------------------------
// Query assembly
// ---------------------------------------------------------------------------

/// Everything a store needs to run one page of a list request.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub filter: Document,
    pub sort: Sort,
    pub pagination: Pagination,
}

impl ListQuery {
    pub fn sort_document(&self) -> Document {
        self.sort.to_document()
    }

    pub fn skip(&self) -> u64 {
        self.pagination.skip()
    }

    pub fn limit(&self) -> i64 {
        self.pagination.limit
    }
}

fn trimmed(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Case-insensitive "contains" predicate on `field`.
fn contains_ignore_case(field: &str, needle: &str) -> Document {
    let mut clause = Document::new();
    clause.insert(
        field,
        doc! { "$regex": regex::escape(needle), "$options": "i" },
    );
    clause
}

/// Branches matching a weak reference stored as text or as an identifier.
fn reference_branches(field: &str, raw: &str) -> Vec<Document> {
    Reference::stored_forms(raw)
        .into_iter()
        .map(|value| {
            let mut clause = Document::new();
            clause.insert(field, value);
            clause
        })
        .collect()
}

/// Translate list parameters into a query for `kind`.
///
/// Parameters that do not apply to `kind` are ignored.
pub fn build_list_query(kind: ResourceKind, params: &ListParams) -> ListQuery {
    let mut filter = FilterBuilder::new();

    if kind == ResourceKind::Animal {
        if let Some(species) = trimmed(&params.species) {
            filter.add_alternatives(SPECIES_FIELD, reference_branches(SPECIES_FIELD, species));
        }
    }

    if let Some(name) = trimmed(&params.name) {
        let mut branches = vec![contains_ignore_case(NAME_FIELD, name)];
        if kind.searches_name_alias() {
            branches.push(contains_ignore_case(kind.name_alias(), name));
        }
        filter.add_alternatives(NAME_FIELD, branches);
    }

    if kind == ResourceKind::Animal {
        if let Some(min) = params.min_age.as_deref().and_then(|v| v.parse::<i64>().ok()) {
            filter.add_range(AGE_FIELD, Bound::AtLeast, min);
        }
        if let Some(max) = params.max_age.as_deref().and_then(|v| v.parse::<i64>().ok()) {
            filter.add_range(AGE_FIELD, Bound::AtMost, max);
        }
        match params.adopted.as_deref() {
            Some("true") => {
                filter.add_eq(ADOPTED_FIELD, true);
            }
            Some("false") => {
                filter.add_eq(ADOPTED_FIELD, false);
            }
            _ => {}
        }
    }

    if kind == ResourceKind::Species {
        if let Some(category) = trimmed(&params.category) {
            filter.add_alternatives(CATEGORY_FIELD, reference_branches(CATEGORY_FIELD, category));
        }
    }

    ListQuery {
        filter: filter.build(),
        sort: Sort::parse(kind, params.sort.as_deref(), params.order.as_deref()),
        pagination: Pagination::parse(params.page.as_deref(), params.limit.as_deref()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
