use std::path::Path;
use tracing::{info, instrument};

use crate::app::ports::MemberSourcePort;
use crate::error::Result;
use crate::infra::csv_source::CsvMemberSource;
use crate::membership::{members_from_table, rename_csv_columns};
use crate::types::MemberList;

/// Use case for turning a membership export into a [`MemberList`]
pub struct ImportUseCase {
    source: Box<dyn MemberSourcePort>,
}

impl ImportUseCase {
    pub fn new(source: Box<dyn MemberSourcePort>) -> Self {
        Self { source }
    }

    /// Create a use case reading CSV files from disk
    pub fn with_csv_source() -> Self {
        Self::new(Box::new(CsvMemberSource))
    }

    /// Read, rename and map every row of the export at `path`
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub fn get_members_from_csv(&self, path: &Path) -> Result<MemberList> {
        let table = self.source.read_table(path)?;
        let members = members_from_table(&rename_csv_columns(table))?;
        info!("Loaded {} members", members.len());
        Ok(members)
    }
}

/// Reads the CSV export at `path` with the default source
pub fn get_members_from_csv(path: impl AsRef<Path>) -> Result<MemberList> {
    ImportUseCase::with_csv_source().get_members_from_csv(path.as_ref())
}
