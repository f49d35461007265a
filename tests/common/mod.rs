#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::{SimpleFileOptions, ZipWriter};

pub const BOUNDARY: &str = "roster-test-boundary";

/// Builds an .xlsx workbook with a `Name` header and one name per row.
pub fn xlsx_workbook(sheets: &[(&str, Vec<String>)]) -> Vec<u8> {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    for (sheet_name, names) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*sheet_name).expect("sheet name");
        worksheet.write_string(0, 0, "Name").expect("header");
        worksheet.write_string(0, 1, "Email").expect("header");
        for (row, name) in names.iter().enumerate() {
            let row = row as u32 + 1;
            worksheet.write_string(row, 0, name.as_str()).expect("name cell");
            worksheet
                .write_string(row, 1, format!("{}@example.com", name.to_lowercase()))
                .expect("email cell");
        }
    }
    workbook.save_to_buffer().expect("save workbook")
}

pub fn csv_bundle(files: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in files {
        zip.start_file(*name, SimpleFileOptions::default())
            .expect("start zip entry");
        zip.write_all(content.as_bytes()).expect("write zip entry");
    }
    zip.finish().expect("finish zip").into_inner()
}

pub fn names(prefix: &str, count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("{}{}", prefix, i)).collect()
}

/// Standard staff workbook with the three role sheets.
pub fn staff_workbook(developers: usize, business: usize, data: usize) -> Vec<u8> {
    xlsx_workbook(&[
        ("Developers", names("Dev", developers)),
        ("Business Analysts", names("Biz", business)),
        ("Data Analysts", names("Data", data)),
    ])
}

/// multipart/form-data body with a single file part.
pub fn multipart_body(field: &str, file_name: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn dir_is_empty(path: &std::path::Path) -> bool {
    std::fs::read_dir(path)
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(true)
}
