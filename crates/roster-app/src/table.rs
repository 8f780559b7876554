// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::ops::Range;

use crate::{EditableCell, FieldValue, Record, SelectionChange, SelectionSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column<F> {
    pub key: F,
    pub label: &'static str,
    /// Layout hint in terminal cells.
    pub width: Option<u16>,
    pub editable: bool,
}

impl<F> Column<F> {
    pub fn new(key: F, label: &'static str) -> Self {
        Self {
            key,
            label,
            width: None,
            editable: false,
        }
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn editable(mut self) -> Self {
        self.editable = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditState<R: Record> {
    View,
    Edit {
        row_id: R::Id,
        field: R::Field,
        cell: EditableCell,
    },
}

/// What a table asks its owner to do. The table never mutates rows itself.
#[derive(Debug, Clone, PartialEq)]
pub enum TableOutput<R: Record> {
    Save {
        row_id: R::Id,
        field: R::Field,
        value: FieldValue,
    },
    Rejected {
        row_id: R::Id,
        field: R::Field,
        raw: String,
    },
    Select(SelectionChange<R::Id>),
    Delete(R::Id),
    LoadMore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub offset: usize,
    pub height: usize,
}

impl Viewport {
    pub fn range(self, total: usize) -> Range<usize> {
        let start = self.offset.min(total);
        let end = self.offset.saturating_add(self.height).min(total);
        start..end
    }

    /// Whether the bottom edge of the last row is inside the visible range.
    pub fn shows_last_row(self, total: usize) -> bool {
        if total == 0 || self.height == 0 {
            return false;
        }
        let last = total - 1;
        last >= self.offset && last < self.offset.saturating_add(self.height)
    }

    fn max_offset(self, total: usize) -> usize {
        total.saturating_sub(self.height.max(1))
    }
}

/// Per-table edit, cursor and scroll state.
#[derive(Debug, Clone, PartialEq)]
pub struct TableState<R: Record> {
    columns: Vec<Column<R::Field>>,
    infinite: bool,
    edit: EditState<R>,
    cursor_row: usize,
    cursor_col: usize,
    viewport: Viewport,
}

impl<R: Record> TableState<R> {
    /// `infinite` marks a table with a load-more callback.
    pub fn new(columns: Vec<Column<R::Field>>, infinite: bool) -> Self {
        Self {
            columns,
            infinite,
            edit: EditState::View,
            cursor_row: 0,
            cursor_col: 0,
            viewport: Viewport::default(),
        }
    }

    pub fn columns(&self) -> &[Column<R::Field>] {
        &self.columns
    }

    pub fn column(&self, field: R::Field) -> Option<&Column<R::Field>> {
        self.columns.iter().find(|column| column.key == field)
    }

    pub fn edit_state(&self) -> &EditState<R> {
        &self.edit
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.edit, EditState::Edit { .. })
    }

    pub fn is_editing_cell(&self, row_id: R::Id, field: R::Field) -> bool {
        matches!(
            &self.edit,
            EditState::Edit { row_id: id, field: key, .. } if *id == row_id && *key == field
        )
    }

    pub fn edit_cell_mut(&mut self) -> Option<&mut EditableCell> {
        match &mut self.edit {
            EditState::Edit { cell, .. } => Some(cell),
            EditState::View => None,
        }
    }

    /// Enters edit mode on an editable column. A cell already being edited is
    /// committed first and its output returned.
    pub fn activate(&mut self, row: &R, field: R::Field) -> Vec<TableOutput<R>> {
        let editable = self.column(field).is_some_and(|column| column.editable);
        if !editable || self.is_editing_cell(row.id(), field) {
            return Vec::new();
        }

        let mut outputs = Vec::new();
        if let Some(output) = self.commit() {
            outputs.push(output);
        }
        self.edit = EditState::Edit {
            row_id: row.id(),
            field,
            cell: EditableCell::begin(row.field(field).display()),
        };
        outputs
    }

    pub fn activate_at_cursor(&mut self, rows: &[R]) -> Vec<TableOutput<R>> {
        let Some(row) = rows.get(self.cursor_row) else {
            return Vec::new();
        };
        let Some(field) = self.columns.get(self.cursor_col).map(|column| column.key) else {
            return Vec::new();
        };
        self.activate(row, field)
    }

    /// Blur: leaves edit mode and reports the draft, parsed into the field's
    /// declared kind.
    pub fn commit(&mut self) -> Option<TableOutput<R>> {
        let EditState::Edit {
            row_id,
            field,
            cell,
        } = std::mem::replace(&mut self.edit, EditState::View)
        else {
            return None;
        };

        let raw = cell.blur();
        Some(match FieldValue::parse_for(R::field_kind(field), &raw) {
            Some(value) => TableOutput::Save {
                row_id,
                field,
                value,
            },
            None => TableOutput::Rejected { row_id, field, raw },
        })
    }

    pub fn toggle_row(&self, row_id: R::Id) -> TableOutput<R> {
        TableOutput::Select(SelectionChange::Single(row_id))
    }

    pub fn select_all(&self, rows: &[R]) -> TableOutput<R> {
        TableOutput::Select(SelectionChange::Bulk(
            rows.iter().map(Record::id).collect(),
        ))
    }

    pub fn unselect_all(&self) -> TableOutput<R> {
        TableOutput::Select(SelectionChange::Bulk(Vec::new()))
    }

    /// The header checkbox: clears when everything is selected, otherwise
    /// selects every rendered row.
    pub fn toggle_header(&self, rows: &[R], selected: &SelectionSet<R::Id>) -> TableOutput<R> {
        if selected.len() == rows.len() {
            self.unselect_all()
        } else {
            self.select_all(rows)
        }
    }

    pub fn delete_row(&self, row_id: R::Id) -> TableOutput<R> {
        TableOutput::Delete(row_id)
    }

    pub fn cursor_row(&self) -> usize {
        self.cursor_row
    }

    pub fn cursor_col(&self) -> usize {
        self.cursor_col
    }

    pub fn cursor_field(&self) -> Option<R::Field> {
        self.columns.get(self.cursor_col).map(|column| column.key)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn visible_range(&self, total: usize) -> Range<usize> {
        self.viewport.range(total)
    }

    pub fn set_viewport_height(&mut self, height: usize, total: usize) {
        self.viewport.height = height;
        self.clamp(total);
    }

    /// Moves the row cursor. Returns the load-more output when the move
    /// scrolled the viewport into the trigger zone.
    pub fn move_row(&mut self, delta: isize, total: usize) -> Option<TableOutput<R>> {
        if total == 0 {
            self.cursor_row = 0;
            return None;
        }
        let last = total - 1;
        self.cursor_row = self.cursor_row.saturating_add_signed(delta).min(last);
        self.jump_row(self.cursor_row, total)
    }

    pub fn jump_row(&mut self, index: usize, total: usize) -> Option<TableOutput<R>> {
        self.cursor_row = index.min(total.saturating_sub(1));
        let before = self.viewport.offset;
        let height = self.viewport.height.max(1);
        if self.cursor_row < self.viewport.offset {
            self.viewport.offset = self.cursor_row;
        } else if self.cursor_row >= self.viewport.offset + height {
            self.viewport.offset = self.cursor_row + 1 - height;
        }
        if self.viewport.offset == before {
            return None;
        }
        self.scroll_event(total)
    }

    pub fn move_column(&mut self, delta: isize) {
        let last = self.columns.len().saturating_sub(1);
        self.cursor_col = self.cursor_col.saturating_add_signed(delta).min(last);
    }

    pub fn set_cursor_col(&mut self, index: usize) {
        self.cursor_col = index.min(self.columns.len().saturating_sub(1));
    }

    /// A wheel scroll. Always counts as a scroll event, even when the offset
    /// is already clamped.
    pub fn scroll(&mut self, delta: isize, total: usize) -> Option<TableOutput<R>> {
        let max_offset = self.viewport.max_offset(total);
        self.viewport.offset = self
            .viewport
            .offset
            .saturating_add_signed(delta)
            .min(max_offset);
        let height = self.viewport.height.max(1);
        let last_visible = (self.viewport.offset + height).saturating_sub(1);
        self.cursor_row = self
            .cursor_row
            .clamp(self.viewport.offset, last_visible.max(self.viewport.offset))
            .min(total.saturating_sub(1));
        self.scroll_event(total)
    }

    pub fn last_row_in_viewport(&self, total: usize) -> bool {
        self.viewport.shows_last_row(total)
    }

    /// Level-triggered: fires on every event while the last row is visible.
    pub fn scroll_event(&self, total: usize) -> Option<TableOutput<R>> {
        (self.infinite && self.last_row_in_viewport(total)).then_some(TableOutput::LoadMore)
    }

    /// Re-fits cursor and viewport after the row count changed.
    pub fn clamp(&mut self, total: usize) {
        self.cursor_row = self.cursor_row.min(total.saturating_sub(1));
        self.viewport.offset = self.viewport.offset.min(self.viewport.max_offset(total));
        let height = self.viewport.height.max(1);
        if self.cursor_row < self.viewport.offset {
            self.viewport.offset = self.cursor_row;
        } else if self.cursor_row >= self.viewport.offset + height {
            self.viewport.offset = self.cursor_row + 1 - height;
        }
    }

    /// Drops an edit whose row disappeared without saving it.
    pub fn abandon_edit_if_missing(&mut self, rows: &[R]) -> bool {
        let EditState::Edit { row_id, .. } = &self.edit else {
            return false;
        };
        if rows.iter().any(|row| row.id() == *row_id) {
            return false;
        }
        self.edit = EditState::View;
        true
    }
}

pub fn header_checked(selected: usize, total: usize) -> bool {
    selected == total && total > 0
}
