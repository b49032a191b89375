use super::{RowRef, RowStore, StoreResult};
use crate::models::sheet_row::{SHEET_HEADERS, SheetRow};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

/// Sheet kept as a CSV file with the header line
/// `id,Nome,Tipo,Idade,Status,Hora,Data,Evento`.
///
/// Short rows are accepted and padded with empty cells, the way a
/// spreadsheet export leaves trailing cells blank.
pub struct CsvRowStore {
    path: PathBuf,
}

impl CsvRowStore {
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        if !path.exists() {
            let mut wtr = csv::Writer::from_path(path)?;
            wtr.write_record(SHEET_HEADERS)?;
            wtr.flush()?;
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    fn write_all(&self, rows: &[SheetRow]) -> StoreResult<()> {
        let tmp = self.path.with_extension("csv.tmp");
        {
            let mut wtr = csv::Writer::from_path(&tmp)?;
            wtr.write_record(SHEET_HEADERS)?;
            for r in rows {
                wtr.write_record(r.to_cells())?;
            }
            wtr.flush()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl RowStore for CsvRowStore {
    fn append_row(&mut self, row: &SheetRow) -> StoreResult<()> {
        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        wtr.write_record(row.to_cells())?;
        wtr.flush()?;
        Ok(())
    }

    fn all_rows(&mut self) -> StoreResult<Vec<SheetRow>> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;

        let mut out = Vec::new();
        for rec in rdr.records() {
            let rec = rec?;
            let cells: Vec<String> = rec.iter().map(str::to_string).collect();
            out.push(SheetRow::from_cells(&cells));
        }
        Ok(out)
    }

    fn find_row(&mut self, id: &str) -> StoreResult<Option<RowRef>> {
        Ok(self
            .all_rows()?
            .iter()
            .position(|r| r.id == id)
            .map(|i| RowRef(i as i64)))
    }

    fn delete_row(&mut self, row: RowRef) -> StoreResult<()> {
        let mut rows = self.all_rows()?;
        let idx = row.0 as usize;
        if row.0 >= 0 && idx < rows.len() {
            rows.remove(idx);
            self.write_all(&rows)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_sheet_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.csv");
        let mut store = CsvRowStore::open(&path).unwrap();

        for (id, name) in [("1", "Ana"), ("2", "Bia"), ("3", "Caio")] {
            store
                .append_row(&SheetRow {
                    id: id.into(),
                    name: name.into(),
                    event: "Festa".into(),
                    ..Default::default()
                })
                .unwrap();
        }

        let r = store.find_row("2").unwrap().unwrap();
        assert_eq!(r, RowRef(1));
        store.delete_row(r).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("id,Nome,Tipo,Idade,Status,Hora,Data,Evento"));
        assert!(!content.contains("Bia"));
        assert_eq!(store.all_rows().unwrap().len(), 2);
    }

    #[test]
    fn short_rows_are_padded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.csv");
        fs::write(&path, "id,Nome,Tipo,Idade,Status,Hora,Data,Evento\n7,Lia\n").unwrap();

        let mut store = CsvRowStore::open(&path).unwrap();
        let rows = store.all_rows().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Lia");
        assert_eq!(rows[0].status, "");
    }
}
