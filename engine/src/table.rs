use std::{collections::HashMap, fmt};

/// Small column-addressed table used to print truth tables in the terminal.
pub struct Table<T> {
    cols: Vec<String>,
    col_idx: HashMap<String, usize>,
    pub rows: Vec<Vec<T>>,
}

impl<T: Default + Clone> Table<T> {
    pub fn new() -> Table<T> {
        Table {
            cols: Vec::new(),
            col_idx: HashMap::new(),
            rows: Vec::new(),
        }
    }

    /// Duplicate column names would shadow each other; callers keep them unique.
    pub fn set_columns(&mut self, cols: Vec<String>) {
        self.cols = cols;
        self.col_idx.clear();
        for (i, col) in self.cols.iter().enumerate() {
            self.col_idx.insert(col.clone(), i);
        }
    }

    pub fn add_row(&mut self) -> usize {
        self.rows.push(vec![T::default(); self.cols.len()]);
        self.rows.len() - 1
    }

    pub fn set_val_at(&mut self, i: usize, col: &str, val: T) {
        self.rows[i][self.col_idx[col]] = val;
    }

    pub fn get_val_at(&self, i: usize, col: &str) -> &T {
        &self.rows[i][self.col_idx[col]]
    }
}

impl<T: Default + Clone> Default for Table<T> {
    fn default() -> Table<T> {
        Table::new()
    }
}

impl<T: fmt::Display> fmt::Display for Table<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cols.is_empty() {
            return Ok(());
        }
        let pad = self
            .cols
            .iter()
            .map(|c| {
                let width = c.len() + 2 + 1; // 2 spaces left and right of the label text
                (" ".repeat(width / 2), " ".repeat(width - width / 2))
            })
            .collect::<Vec<(String, String)>>();
        let total_width = pad.iter().fold(0, |a, b| a + b.0.len() + b.1.len() + 2);

        writeln!(f, "|{}|", "¯".repeat(total_width - 1))?;
        write!(f, "|")?;
        for col in &self.cols {
            write!(f, "  \x1b[33m{}\x1b[0m  |", col)?;
        }
        writeln!(f)?;
        writeln!(f, "|{}|", "-".repeat(total_width - 1))?;
        for row in &self.rows {
            write!(f, "|")?;
            for i in 0..pad.len() {
                write!(f, "{}{}{}|", pad[i].0, row[i], pad[i].1)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "|{}|", "_".repeat(total_width - 1))?;
        Ok(())
    }
}

/// Iterate every assignment of `bits` booleans, most significant first.
pub fn bitwise_counter(bits: usize) -> impl Iterator<Item = Vec<bool>> {
    let total_combs = 1 << bits;
    (0..total_combs).map(move |n| {
        (0..bits)
            .map(|i| (1 << i & n) > 0)
            .rev()
            .collect::<Vec<bool>>()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_addressing_by_column() {
        let mut t = Table::<char>::new();
        t.set_columns(vec!["A".to_string(), "Q".to_string()]);
        let r = t.add_row();
        t.set_val_at(r, "Q", '1');
        assert_eq!(*t.get_val_at(r, "A"), char::default());
        assert_eq!(*t.get_val_at(r, "Q"), '1');
    }

    #[test]
    fn display_with_no_columns_is_empty() {
        let t = Table::<char>::new();
        assert_eq!(t.to_string(), "");
    }

    #[test]
    fn counter_covers_all_assignments() {
        let combs: Vec<Vec<bool>> = bitwise_counter(3).collect();
        assert_eq!(combs.len(), 8);
        assert_eq!(combs[0], vec![false, false, false]);
        assert_eq!(combs[5], vec![true, false, true]);
        assert_eq!(combs[7], vec![true, true, true]);
    }
}
