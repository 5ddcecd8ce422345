use std::path::Path;

use serde::Serialize;

use crate::calculation::CategoryReport;
use crate::error::Result;
use crate::models::Unit;

/// One line of the shopping list: what to buy to close a shortage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingListRow {
    pub category: String,
    pub item_id: String,
    pub item_name: String,
    pub have: f64,
    pub need: f64,
    pub buy: f64,
    pub unit: Unit,
}

/// Flatten category shortages into shopping-list rows.
pub fn shopping_list_rows(reports: &[CategoryReport<'_>]) -> Vec<ShoppingListRow> {
    reports
        .iter()
        .flat_map(|report| {
            report.result.shortages.iter().map(|shortage| ShoppingListRow {
                category: report.category_id.to_string(),
                item_id: shortage.item_id.clone(),
                item_name: shortage.item_name.clone(),
                have: shortage.actual,
                need: shortage.needed,
                buy: shortage.missing.ceil(),
                unit: shortage.unit,
            })
        })
        .collect()
}

/// Write rows as CSV with a header line.
pub fn write_shopping_list<P: AsRef<Path>>(path: P, rows: &[ShoppingListRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_shopping_list() {
        let rows = vec![ShoppingListRow {
            category: "light-power".to_string(),
            item_id: "candles".to_string(),
            item_name: "Candles".to_string(),
            have: 4.0,
            need: 10.0,
            buy: 6.0,
            unit: Unit::Pieces,
        }];

        let file = NamedTempFile::new().unwrap();
        write_shopping_list(file.path(), &rows).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("category,item_id,item_name,have,need,buy,unit"));
        assert_eq!(lines.next(), Some("light-power,candles,Candles,4.0,10.0,6.0,pieces"));
    }
}
