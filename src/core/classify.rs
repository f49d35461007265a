use crate::core::{Role, RolePools, Sheet};
use crate::utils::error::{Result, RosterError};

/// Sorts sheets into role pools by sheet name.
///
/// A later sheet for the same role replaces the earlier one; sheets matching
/// no role are skipped. Fails when any role ends up with no records.
pub fn classify_sheets(sheets: Vec<Sheet>) -> Result<RolePools> {
    let mut pools = RolePools::default();

    for sheet in sheets {
        let Some(role) = Role::classify(&sheet.name) else {
            tracing::debug!("Ignoring sheet '{}' (no role token)", sheet.name);
            continue;
        };

        let pool = pools.pool_mut(role);
        if !pool.is_empty() {
            tracing::debug!(
                "Sheet '{}' replaces {} earlier {} record(s)",
                sheet.name,
                pool.len(),
                role
            );
        }

        tracing::debug!(
            "Sheet '{}' classified as {} ({} records)",
            sheet.name,
            role,
            sheet.records.len()
        );
        *pool = sheet.records.into();
    }

    let missing: Vec<Role> = Role::PRIORITY
        .into_iter()
        .filter(|role| pools.pool(*role).is_empty())
        .collect();

    if !missing.is_empty() {
        return Err(RosterError::MissingRoleData { roles: missing });
    }

    Ok(pools)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Record;

    fn sheet(name: &str, names: &[&str]) -> Sheet {
        Sheet::new(name, names.iter().map(|n| Record::with_name(n)).collect())
    }

    fn names(pool: &std::collections::VecDeque<Record>) -> Vec<String> {
        pool.iter().map(Record::name).collect()
    }

    #[test]
    fn test_classify_all_three_roles() {
        let pools = classify_sheets(vec![
            sheet("Developers", &["d1", "d2", "d3"]),
            sheet("Business Analysts", &["b1"]),
            sheet("Data Analysts", &["a1"]),
        ])
        .unwrap();

        assert_eq!(names(&pools.developers), vec!["d1", "d2", "d3"]);
        assert_eq!(names(&pools.business_analysts), vec!["b1"]);
        assert_eq!(names(&pools.data_analysts), vec!["a1"]);
    }

    #[test]
    fn test_classify_ignores_unmatched_sheets() {
        let pools = classify_sheets(vec![
            sheet("Managers", &["m1"]),
            sheet("DEVELOPERS_2024", &["d1"]),
            sheet("business", &["b1"]),
            sheet("DATA", &["a1"]),
        ])
        .unwrap();

        assert_eq!(names(&pools.developers), vec!["d1"]);
    }

    #[test]
    fn test_classify_later_sheet_replaces_earlier() {
        let pools = classify_sheets(vec![
            sheet("Developers A", &["d1", "d2"]),
            sheet("Business", &["b1"]),
            sheet("Developers B", &["d9"]),
            sheet("Data", &["a1"]),
        ])
        .unwrap();

        assert_eq!(names(&pools.developers), vec!["d9"]);
    }

    #[test]
    fn test_classify_missing_developers() {
        let err = classify_sheets(vec![
            sheet("Developers", &[]),
            sheet("Business", &["b1"]),
            sheet("Data", &["a1"]),
        ])
        .unwrap_err();

        match err {
            RosterError::MissingRoleData { roles } => assert_eq!(roles, vec![Role::Developer]),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_classify_reports_every_missing_role() {
        let err = classify_sheets(vec![sheet("Data", &["a1"])]).unwrap_err();

        match err {
            RosterError::MissingRoleData { roles } => {
                assert_eq!(roles, vec![Role::Developer, Role::BusinessAnalyst])
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_classify_empty_later_sheet_clears_role() {
        let err = classify_sheets(vec![
            sheet("Developers", &["d1", "d2", "d3"]),
            sheet("Business", &["b1"]),
            sheet("Data", &["a1"]),
            sheet("developers (old)", &[]),
        ])
        .unwrap_err();

        assert!(matches!(err, RosterError::MissingRoleData { .. }));
    }
}
