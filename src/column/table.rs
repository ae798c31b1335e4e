//! The assembled result of one parse: named columns in schema order plus
//! optional row labels.

use super::Column;

#[derive(Debug, Clone, PartialEq)]
pub struct NamedColumn {
    pub name: String,
    /// Zero-based index of the column in the input file.
    pub position: usize,
    pub column: Column,
    /// Cells stored as missing because conversion failed.
    pub coerced: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<NamedColumn>,
    row_names: Option<Vec<String>>,
    n_rows: usize,
}

impl Table {
    pub fn new(columns: Vec<NamedColumn>, row_names: Option<Vec<String>>, n_rows: usize) -> Self {
        Self {
            columns,
            row_names,
            n_rows,
        }
    }

    pub fn columns(&self) -> &[NamedColumn] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<NamedColumn> {
        self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.column)
    }

    pub fn get(&self, index: usize) -> Option<&Column> {
        self.columns.get(index).map(|c| &c.column)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn row_names(&self) -> Option<&[String]> {
        self.row_names.as_deref()
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of data columns, row labels excluded.
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn total_coerced(&self) -> usize {
        self.columns.iter().map(|c| c.coerced).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(
            vec![
                NamedColumn {
                    name: "id".into(),
                    position: 0,
                    column: Column::Integer(vec![1, 2]),
                    coerced: 0,
                },
                NamedColumn {
                    name: "score".into(),
                    position: 2,
                    column: Column::Double(vec![0.5, f64::NAN]),
                    coerced: 1,
                },
            ],
            Some(vec!["a".into(), "b".into()]),
            2,
        )
    }

    #[test]
    fn looks_up_columns_by_name_and_index() {
        let table = sample();

        assert_eq!(table.column("id").unwrap().as_integers(), Some(&[1, 2][..]));
        assert!(table.column("missing").is_none());
        assert_eq!(table.get(1).unwrap().len(), 2);
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["id", "score"]);
    }

    #[test]
    fn reports_shape_and_coercions() {
        let table = sample();

        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.n_cols(), 2);
        assert_eq!(table.total_coerced(), 1);
        assert_eq!(table.row_names().unwrap().len(), 2);
    }
}
