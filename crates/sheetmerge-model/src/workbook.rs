//! Multi-sheet workbooks.

use std::collections::HashSet;

use crate::dataset::Dataset;
use crate::error::WorkbookError;

/// One named sheet of a workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub data: Dataset,
}

impl Sheet {
    pub fn new(name: impl Into<String>, data: Dataset) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// Ordered collection of sheets, as they appear in the source file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Result<Self, WorkbookError> {
        let mut seen = HashSet::with_capacity(sheets.len());
        for sheet in &sheets {
            if !seen.insert(sheet.name.as_str()) {
                return Err(WorkbookError::DuplicateSheet {
                    sheet: sheet.name.clone(),
                });
            }
        }
        Ok(Self { sheets })
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|sheet| sheet.name.clone()).collect()
    }

    pub fn first_sheet(&self) -> Option<&Sheet> {
        self.sheets.first()
    }

    pub fn sheet(&self, name: &str) -> Option<&Dataset> {
        self.sheets
            .iter()
            .find(|sheet| sheet.name == name)
            .map(|sheet| &sheet.data)
    }

    /// Look up a sheet, reporting the available names when it is absent.
    pub fn require_sheet(&self, name: &str) -> Result<&Dataset, WorkbookError> {
        self.sheet(name).ok_or_else(|| WorkbookError::SheetNotFound {
            sheet: name.to_string(),
            available: self.sheet_names(),
        })
    }

    /// Suggested target sheet for a lookup sheet: the next sheet, wrapping
    /// around to the first.
    pub fn default_target_sheet(&self, lookup_sheet: &str) -> Option<&str> {
        let idx = self
            .sheets
            .iter()
            .position(|sheet| sheet.name == lookup_sheet)?;
        let next = (idx + 1) % self.sheets.len();
        Some(self.sheets[next].name.as_str())
    }

    /// Resolve the lookup and target sheets for a single-workbook merge.
    pub fn sheet_pair(
        &self,
        lookup_sheet: &str,
        target_sheet: &str,
    ) -> Result<(&Dataset, &Dataset), WorkbookError> {
        if self.sheets.len() < 2 {
            return Err(WorkbookError::NotEnoughSheets {
                found: self.sheets.len(),
            });
        }
        if lookup_sheet == target_sheet {
            return Err(WorkbookError::SameSheet {
                sheet: lookup_sheet.to_string(),
            });
        }
        Ok((
            self.require_sheet(lookup_sheet)?,
            self.require_sheet(target_sheet)?,
        ))
    }
}
