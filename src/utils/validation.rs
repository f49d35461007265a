use crate::utils::error::{Result, RosterError};
use std::cmp::Ordering;
use std::fmt::Display;
use std::path::Path;

/// Extensions accepted for an uploaded or local workbook.
pub const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods", "zip"];

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl Display, reason: impl Into<String>) -> RosterError {
    RosterError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let display = path.to_string_lossy();
    if display.is_empty() {
        return Err(invalid(field_name, display, "Path cannot be empty"));
    }
    if display.contains('\0') {
        return Err(invalid(field_name, display, "Path contains null bytes"));
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

/// Checks that `path` names a workbook by its extension, ignoring case.
pub fn validate_workbook_path(field_name: &str, path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension {
        Some(ext) if WORKBOOK_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        Some(ext) => Err(invalid(
            field_name,
            path.display(),
            format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                ext,
                WORKBOOK_EXTENSIONS.join(", ")
            ),
        )),
        None => Err(invalid(
            field_name,
            path.display(),
            "File has no extension or invalid filename",
        )),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // NaN is outside every range
    if !(min..=max).contains(&value) {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

/// A block taller than the space between the margins would overflow every
/// page it lands on.
pub fn validate_fits(field_name: &str, needed: f32, available: f32) -> Result<()> {
    let fits = matches!(
        needed.partial_cmp(&available),
        Some(Ordering::Less | Ordering::Equal)
    );
    if !fits {
        return Err(invalid(
            field_name,
            needed,
            format!("Needs {}pt but only {}pt fit between the margins", needed, available),
        ));
    }
    Ok(())
}
