//! CSV reader with iterator interface for replay input
//!
//! Provides a streaming iterator over replay operations from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual record parsing errors are yielded as Err variants in the
//!   iterator with line numbers, so the driver can skip them and continue

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::Operation;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Streaming CSV reader over replay operations
///
/// Reads records one at a time without loading the whole file into memory.
///
/// # Examples
///
/// ```no_run
/// use market_engine::io::reader::OperationReader;
/// use std::path::Path;
///
/// let reader = OperationReader::new(Path::new("operations.csv")).unwrap();
/// for result in reader {
///     match result {
///         Ok(op) => println!("Replaying: {:?}", op),
///         Err(e) => eprintln!("Error: {}", e),
///     }
/// }
/// ```
#[derive(Debug)]
pub struct OperationReader {
    reader: csv::Reader<File>,
    line_num: usize,
}

impl OperationReader {
    /// Create a new OperationReader from a file path
    ///
    /// The CSV reader trims whitespace and allows flexible field counts so
    /// trailing optional columns may be omitted.
    ///
    /// # Returns
    ///
    /// * `Ok(OperationReader)` if the file opened successfully
    /// * `Err(String)` if the file could not be opened
    pub fn new(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
        })
    }
}

impl Iterator for OperationReader {
    type Item = Result<Operation, String>;

    /// Get the next operation from the CSV file
    ///
    /// # Returns
    ///
    /// * `Some(Ok(Operation))` - Successfully parsed record
    /// * `Some(Err(String))` - Parse or conversion error with line number
    /// * `None` - End of file reached
    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvRecord>();

        match deserializer.next()? {
            Ok(record) => {
                self.line_num += 1;
                // Line numbers are 1-based and offset by the header row
                Some(
                    convert_csv_record(record)
                        .map_err(|e| format!("Line {}: {}", self.line_num + 1, e)),
                )
            }
            Err(e) => {
                self.line_num += 1;
                Some(Err(format!(
                    "Line {}: CSV parse error: {}",
                    self.line_num + 1,
                    e
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "op,account,item,username,email,name,barcode,description,amount\n";

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_reader_new_fails_on_missing_file() {
        let result = OperationReader::new(Path::new("nonexistent.csv"));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Failed to open file"));
    }

    #[test]
    fn test_reader_parses_full_session() {
        let content = format!(
            "{}register,,,alice,alice@example.com,,,,1000\n\
             list_item,,,,,iPhone,123456789012,Fancy phone,500\n\
             purchase,1,1,,,,,,\n\
             sell,1,1,,,,,,\n",
            HEADER
        );
        let file = create_temp_csv(&content);

        let reader = OperationReader::new(file.path()).unwrap();
        let ops: Vec<_> = reader.collect::<Result<Vec<_>, _>>().unwrap();

        assert_eq!(ops.len(), 4);
        assert_eq!(
            ops[0],
            Operation::Register {
                username: "alice".into(),
                email: "alice@example.com".into(),
                budget: 1000,
            }
        );
        assert_eq!(
            ops[1],
            Operation::ListItem {
                name: "iPhone".into(),
                barcode: "123456789012".into(),
                description: "Fancy phone".into(),
                price: 500,
            }
        );
        assert_eq!(ops[2], Operation::Purchase { account: 1, item: 1 });
        assert_eq!(ops[3], Operation::Sell { account: 1, item: 1 });
    }

    #[test]
    fn test_reader_handles_whitespace() {
        let content = format!("{}  purchase , 1 , 1 ,,,,,,\n", HEADER);
        let file = create_temp_csv(&content);

        let reader = OperationReader::new(file.path()).unwrap();
        let ops: Vec<_> = reader.filter_map(Result::ok).collect();

        assert_eq!(ops, vec![Operation::Purchase { account: 1, item: 1 }]);
    }

    #[test]
    fn test_reader_includes_line_numbers_in_errors() {
        let content = format!(
            "{}register,,,alice,alice@example.com,,,,1000\n\
             teleport,1,1,,,,,,\n\
             purchase,1,1,,,,,,\n",
            HEADER
        );
        let file = create_temp_csv(&content);

        let reader = OperationReader::new(file.path()).unwrap();
        let results: Vec<_> = reader.collect();

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());

        let error = results[1].as_ref().unwrap_err();
        assert!(error.contains("Line 3"));
        assert!(error.contains("Invalid operation"));
    }

    #[test]
    fn test_reader_continues_after_malformed_record() {
        let content = format!(
            "{}purchase,not_a_number,1,,,,,,\n\
             purchase,2,2,,,,,,\n",
            HEADER
        );
        let file = create_temp_csv(&content);

        let reader = OperationReader::new(file.path()).unwrap();
        let results: Vec<_> = reader.collect();

        assert_eq!(results.len(), 2);
        assert!(results[0].is_err());
        assert_eq!(
            results[1].as_ref().unwrap(),
            &Operation::Purchase { account: 2, item: 2 }
        );
    }

    #[test]
    fn test_reader_empty_file_after_header() {
        let file = create_temp_csv(HEADER);

        let reader = OperationReader::new(file.path()).unwrap();
        assert_eq!(reader.count(), 0);
    }
}
