// Adapters layer: concrete implementations for external systems (storage, workbooks, pdf, http).

pub mod http;
pub mod pdf;
pub mod storage;
pub mod workbook;
