use crate::{record::FieldValue, traits::record::TableRecord};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QueryMode {
    #[default]
    Fetch,
    Count,
}

/// Match on a single field's rendered value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldFilter {
    /// Case-insensitive substring match. An empty needle matches every record
    /// that has the field.
    Contains { field: String, needle: String },
    /// Exact value match.
    Equals { field: String, value: FieldValue },
}

impl FieldFilter {
    pub fn contains(field: impl Into<String>, needle: impl Into<String>) -> Self {
        FieldFilter::Contains {
            field: field.into(),
            needle: needle.into(),
        }
    }

    pub fn equals(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        FieldFilter::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn matches<R: TableRecord>(&self, record: &R) -> bool {
        match self {
            FieldFilter::Contains { field, needle } => record.field(field).is_some_and(|v| {
                v.to_string()
                    .to_lowercase()
                    .contains(&needle.to_lowercase())
            }),
            FieldFilter::Equals { field, value } => record.field(field).as_ref() == Some(value),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryConfig {
    pub mode: QueryMode,
    pub filter: Option<FieldFilter>,
    pub pagination: Pagination,
    pub reversed: bool,
}

impl QueryConfig {
    /// A config that fetches every record in store order.
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a config to fetch just the first record.
    ///
    /// # Example
    ///
    /// ```
    /// use tablebase_store::query::QueryConfig;
    ///
    /// let config = QueryConfig::first();
    /// assert_eq!(config.pagination.limit, Some(1));
    /// ```
    pub fn first() -> Self {
        Self::default().with_limit(1)
    }

    /// Set the mode to count only, without fetching data.
    ///
    /// # Example
    ///
    /// ```
    /// use tablebase_store::query::{QueryConfig, QueryMode};
    ///
    /// let config = QueryConfig::default().count_only();
    /// assert_eq!(config.mode, QueryMode::Count);
    /// ```
    pub fn count_only(mut self) -> Self {
        self.mode = QueryMode::Count;
        self
    }

    pub fn with_filter(mut self, filter: FieldFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Reverse the iteration order.
    pub fn reversed(mut self) -> Self {
        self.reversed = true;
        self
    }

    /// Set a limit on the number of results.
    ///
    /// # Example
    ///
    /// ```
    /// use tablebase_store::query::QueryConfig;
    ///
    /// let config = QueryConfig::default().with_limit(10);
    /// assert_eq!(config.pagination.limit, Some(10));
    /// ```
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.pagination.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.pagination.offset = Some(offset);
        self
    }

    /// Evaluate against a record sequence without reordering it.
    ///
    /// Counting ignores pagination and reports every match.
    pub fn run<'a, R: TableRecord>(&self, records: &'a [R]) -> QueryResult<&'a R> {
        let matching = |r: &&'a R| self.filter.as_ref().is_none_or(|f| f.matches(*r));

        if self.mode == QueryMode::Count {
            return QueryResult::Count(records.iter().filter(matching).count() as u64);
        }

        let offset = self.pagination.offset.unwrap_or(0);
        let limit = self.pagination.limit.unwrap_or(usize::MAX);
        let items: Vec<&'a R> = if self.reversed {
            records
                .iter()
                .rev()
                .filter(matching)
                .skip(offset)
                .take(limit)
                .collect()
        } else {
            records
                .iter()
                .filter(matching)
                .skip(offset)
                .take(limit)
                .collect()
        };
        QueryResult::Multiple(items)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Pagination {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// Result of a query operation.
#[derive(Debug, Clone)]
pub enum QueryResult<T> {
    Multiple(Vec<T>),
    Count(u64),
}

impl<T> QueryResult<T> {
    /// Convert the result into a vector.
    ///
    /// # Example
    ///
    /// ```
    /// use tablebase_store::query::QueryResult;
    ///
    /// let multiple = QueryResult::Multiple(vec![1, 2, 3]);
    /// assert_eq!(multiple.into_vec(), vec![1, 2, 3]);
    ///
    /// let count: QueryResult<i32> = QueryResult::Count(5);
    /// assert_eq!(count.into_vec(), Vec::<i32>::new());
    /// ```
    pub fn into_vec(self) -> Vec<T> {
        match self {
            QueryResult::Multiple(vec) => vec,
            QueryResult::Count(_) => Vec::new(),
        }
    }

    pub fn count(&self) -> Option<u64> {
        match self {
            QueryResult::Count(c) => Some(*c),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        match self {
            QueryResult::Multiple(vec) => vec.len(),
            QueryResult::Count(c) => *c as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    fn products() -> Vec<Record> {
        [("P1", "Electronics"), ("P2", "Home"), ("P3", "electronic toys")]
            .into_iter()
            .map(|(id, category)| Record::new("id").with("id", id).with("category", category))
            .collect()
    }

    #[test]
    fn contains_is_case_insensitive() {
        let records = products();
        let config = QueryConfig::all().with_filter(FieldFilter::contains("category", "ELECTRON"));
        let keys: Vec<_> = config
            .run(&records)
            .into_vec()
            .into_iter()
            .map(|r| r.key())
            .collect();
        assert_eq!(keys, vec!["P1", "P3"]);
    }

    #[test]
    fn empty_needle_matches_everything() {
        let records = products();
        let config = QueryConfig::all().with_filter(FieldFilter::contains("category", ""));
        assert_eq!(config.run(&records).len(), 3);
    }

    #[test]
    fn count_ignores_pagination() {
        let records = products();
        let result = QueryConfig::all().with_limit(1).count_only().run(&records);
        assert_eq!(result.count(), Some(3));
    }

    #[test]
    fn reversed_pagination() {
        let records = products();
        let result = QueryConfig::all().reversed().with_offset(1).with_limit(1).run(&records);
        assert_eq!(result.into_vec()[0].key(), "P2");
    }

    #[test]
    fn equals_matches_exact_values() {
        let records = products();
        let config = QueryConfig::all().with_filter(FieldFilter::equals("category", "Home"));
        assert_eq!(config.run(&records).into_vec()[0].key(), "P2");
    }
}
