use crate::constants::{
    COLUMN_RENAMES, LAST_UPDATE, LAST_UPDATE_TIMESTAMP, MEMBERSHIP_LEVEL, NAME, PROFILE_URL,
    TOTAL_TIME_AS_MEMBER, TOTAL_TIME_IN_LEVEL,
};
use crate::error::{MembershipError, Result};
use crate::types::{MemberList, MemberRecord, RawTable};
use tracing::debug;

/// Renames the export's localized headers to canonical field names.
///
/// Labels match after trimming whitespace and a leading byte-order mark. Unknown columns are
/// kept as they are, and rows are untouched. Running it twice is a no-op because canonical
/// names never appear on the left side of the table.
pub fn rename_csv_columns(mut table: RawTable) -> RawTable {
    for header in table.headers.iter_mut() {
        let label = header.trim().trim_start_matches('\u{feff}');
        if let Some((_, canonical)) = COLUMN_RENAMES.iter().find(|(source, _)| *source == label) {
            debug!("Renaming column {:?} to {}", header, canonical);
            *header = (*canonical).to_string();
        }
    }
    table
}

/// Positions of the canonical columns within a renamed table
struct ColumnIndexes {
    name: usize,
    profile_url: usize,
    membership_level: usize,
    total_time_in_level: usize,
    total_time_as_member: usize,
    last_update: usize,
    last_update_timestamp: usize,
}

impl ColumnIndexes {
    fn resolve(table: &RawTable) -> Result<Self> {
        let find = |name: &str| {
            table
                .column_index(name)
                .ok_or_else(|| MembershipError::MissingColumn(name.to_string()))
        };
        Ok(Self {
            name: find(NAME)?,
            profile_url: find(PROFILE_URL)?,
            membership_level: find(MEMBERSHIP_LEVEL)?,
            total_time_in_level: find(TOTAL_TIME_IN_LEVEL)?,
            total_time_as_member: find(TOTAL_TIME_AS_MEMBER)?,
            last_update: find(LAST_UPDATE)?,
            last_update_timestamp: find(LAST_UPDATE_TIMESTAMP)?,
        })
    }
}

fn field<'a>(row: &'a [String], index: usize, row_number: usize, column: &str) -> Result<&'a str> {
    row.get(index)
        .map(|value| value.trim())
        .ok_or_else(|| MembershipError::MissingField {
            row: row_number,
            column: column.to_string(),
        })
}

fn tenure(row: &[String], index: usize, row_number: usize, column: &str) -> Result<f64> {
    let raw = field(row, index, row_number, column)?;
    let invalid = || MembershipError::InvalidTenure {
        row: row_number,
        column: column.to_string(),
        value: raw.to_string(),
    };
    let months: f64 = raw.parse().map_err(|_| invalid())?;
    if !months.is_finite() || months < 0.0 {
        return Err(invalid());
    }
    Ok(months)
}

/// Maps every row of a renamed table into a [`MemberRecord`], keeping row order.
///
/// Row numbers in errors are 1-based and count data rows only.
pub fn members_from_table(table: &RawTable) -> Result<MemberList> {
    let columns = ColumnIndexes::resolve(table)?;

    let members = table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let row_number = i + 1;
            Ok(MemberRecord {
                name: field(row, columns.name, row_number, NAME)?.to_string(),
                profile_url: field(row, columns.profile_url, row_number, PROFILE_URL)?.to_string(),
                membership_level: field(row, columns.membership_level, row_number, MEMBERSHIP_LEVEL)?
                    .to_string(),
                total_time_in_level: tenure(
                    row,
                    columns.total_time_in_level,
                    row_number,
                    TOTAL_TIME_IN_LEVEL,
                )?,
                total_time_as_member: tenure(
                    row,
                    columns.total_time_as_member,
                    row_number,
                    TOTAL_TIME_AS_MEMBER,
                )?,
                last_update: field(row, columns.last_update, row_number, LAST_UPDATE)?.to_string(),
                last_update_timestamp: field(
                    row,
                    columns.last_update_timestamp,
                    row_number,
                    LAST_UPDATE_TIMESTAMP,
                )?
                .to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(MemberList::new(members))
}
