//! Text-table rendering for the file listing.

use crate::api::FileRecord;
use crate::format::{format_size, format_timestamp};

const HEADERS: [&str; 4] = ["FILENAME", "SIZE", "UPLOADED", "TYPE"];

/// The four display cells for one record.
pub fn row(file: &FileRecord) -> [String; 4] {
    [
        file.filename.clone(),
        format_size(file.size),
        format_timestamp(file.uploaded_at.as_deref()),
        file.content_type.clone(),
    ]
}

/// Render the listing as a padded table, rows in the order received.
pub fn render_listing(files: &[FileRecord]) -> String {
    let rows: Vec<[String; 4]> = files.iter().map(row).collect();

    let mut widths: [usize; 4] = HEADERS.map(str::len);
    for cells in &rows {
        for (w, cell) in widths.iter_mut().zip(cells) {
            *w = (*w).max(cell.len());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(String::from), &widths);
    for cells in &rows {
        push_row(&mut out, cells, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        out.push_str(cell);
        // no padding after the last column
        if i < cells.len() - 1 {
            for _ in cell.len()..*width {
                out.push(' ');
            }
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(filename: &str, size: u64) -> FileRecord {
        FileRecord {
            filename: filename.to_string(),
            size,
            uploaded_at: None,
            content_type: "text/plain".to_string(),
        }
    }

    #[test]
    fn test_row_cells_for_minimal_record() {
        let cells = row(&record("a.txt", 10));
        assert_eq!(cells, ["a.txt", "10 Bytes", "Unknown", "text/plain"]);
    }

    #[test]
    fn test_listing_preserves_server_order() {
        let files = vec![record("zzz.bin", 1), record("aaa.bin", 2)];
        let rendered = render_listing(&files);
        let zzz = rendered.find("zzz.bin").unwrap();
        let aaa = rendered.find("aaa.bin").unwrap();
        assert!(zzz < aaa, "rows must not be sorted client-side");
    }

    #[test]
    fn test_listing_has_header_and_one_line_per_file() {
        let files = vec![record("a.txt", 10), record("b.txt", 20)];
        let rendered = render_listing(&files);
        assert_eq!(rendered.lines().count(), 3);
        assert!(rendered.lines().next().unwrap().starts_with("FILENAME"));
    }

    #[test]
    fn test_empty_listing_renders_header_only() {
        let rendered = render_listing(&[]);
        assert_eq!(rendered.lines().count(), 1);
    }
}
