//! Sequential page navigation over the checklist catalog.

use std::sync::Arc;

use crate::error::NotFoundError;
use crate::model::{Catalog, Group, Subgroup};

/// Position of the displayed page: `(group index, page index within group)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub group: usize,
    pub page: usize,
}

/// Single-focus cursor over a catalog.
///
/// Pages move strictly one at a time inside a group; groups are chosen freely
/// from the menu and always open on their first page. Progress inside a group
/// is not remembered across group switches.
///
/// Invariant: `cursor.page < subgroup count of cursor.group` after every call.
#[derive(Debug, Clone)]
pub struct Navigator {
    catalog: Arc<Catalog>,
    cursor: Cursor,
}

impl Navigator {
    /// Start at the first page of the first group.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            cursor: Cursor::default(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[must_use]
    pub fn current_group(&self) -> &Group {
        &self.catalog.all_groups()[self.cursor.group]
    }

    #[must_use]
    pub fn current_subgroup(&self) -> &Subgroup {
        &self.current_group().subgroups()[self.cursor.page]
    }

    #[must_use]
    pub fn page_index(&self) -> usize {
        self.cursor.page
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.current_group().subgroups().len()
    }

    #[must_use]
    pub fn can_previous(&self) -> bool {
        self.cursor.page > 0
    }

    #[must_use]
    pub fn can_next(&self) -> bool {
        self.cursor.page + 1 < self.page_count()
    }

    /// Finalizing is offered on the last page of the current group only.
    #[must_use]
    pub fn can_finalize(&self) -> bool {
        !self.can_next()
    }

    /// Switch to `name` and land on its first page.
    ///
    /// # Errors
    ///
    /// Returns `NotFoundError::Group` for an unknown name; the cursor is left
    /// unchanged.
    pub fn select_group(&mut self, name: &str) -> Result<(), NotFoundError> {
        let group = self
            .catalog
            .group_index(name)
            .ok_or_else(|| NotFoundError::Group {
                name: name.to_owned(),
            })?;
        self.cursor = Cursor { group, page: 0 };
        Ok(())
    }

    /// Advance one page. Returns `false` (and does nothing) on the last page.
    pub fn next(&mut self) -> bool {
        if !self.can_next() {
            return false;
        }
        self.cursor.page += 1;
        true
    }

    /// Go back one page. Returns `false` (and does nothing) on the first page.
    pub fn previous(&mut self) -> bool {
        if !self.can_previous() {
            return false;
        }
        self.cursor.page -= 1;
        true
    }
}
