use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, instrument, warn};

use crate::catalog::CatalogSnapshot;
use crate::domain::{ComposedLine, LineField, LineItemDraft, NewOrderItem, OrderDraft};

use super::error::{OrderError, VALIDATION_FAILED};

/// Holds the in-progress order draft.
///
/// Product names are never stored on the draft. They are resolved against
/// the catalog snapshot each time a line is read, so a name can't disagree
/// with its product id.
pub struct OrderComposer {
    catalog: Arc<CatalogSnapshot>,
    draft: Mutex<OrderDraft>,
}

impl OrderComposer {
    pub fn new(catalog: Arc<CatalogSnapshot>) -> Self {
        Self {
            catalog,
            draft: Mutex::new(OrderDraft::new()),
        }
    }

    /// Update one field of one line. Other lines are not touched.
    #[instrument(skip(self, value))]
    pub fn set_line(&self, index: usize, field: LineField, value: impl Into<String>) -> Result<(), OrderError> {
        let mut draft = self.draft.lock();
        let line = draft.line_mut(index).ok_or(OrderError::LineOutOfRange(index))?;
        let value = value.into();
        debug!(value = %value, "Updating draft line");
        match field {
            LineField::ProductId => line.product_id = value,
            // Stored raw; coerced at submission.
            LineField::Quantity => line.quantity = value,
        }
        Ok(())
    }

    /// Append an empty line and return its index.
    pub fn add_line(&self) -> usize {
        let mut draft = self.draft.lock();
        draft.push_empty();
        draft.lines().len() - 1
    }

    /// Put the draft back to a single empty line.
    pub fn reset(&self) {
        *self.draft.lock() = OrderDraft::new();
    }

    pub fn draft(&self) -> OrderDraft {
        self.draft.lock().clone()
    }

    /// Name of the product selected on line `index`, resolved now. Empty when
    /// nothing matching is selected; `None` when the line does not exist.
    pub fn product_name(&self, index: usize) -> Option<String> {
        let draft = self.draft.lock();
        draft.lines().get(index).map(|line| self.resolve_name(line))
    }

    /// All lines with their product names resolved against the catalog.
    pub fn lines(&self) -> Vec<ComposedLine> {
        self.draft
            .lock()
            .lines()
            .iter()
            .map(|line| ComposedLine {
                product_id: line.product_id.clone(),
                product_name: self.resolve_name(line),
                quantity: line.quantity.clone(),
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), OrderError> {
        self.validated_items().map(|_| ())
    }

    /// Validate the whole draft and map it to create-order lines, keeping
    /// draft order. Fails on the first invalid line with one aggregate
    /// message.
    pub fn validated_items(&self) -> Result<Vec<NewOrderItem>, OrderError> {
        let draft = self.draft.lock();
        draft
            .lines()
            .iter()
            .enumerate()
            .map(|(index, line)| {
                self.validate_line(line).ok_or_else(|| {
                    warn!(line = index, "Draft line is incomplete");
                    OrderError::Validation(VALIDATION_FAILED.to_string())
                })
            })
            .collect()
    }

    fn validate_line(&self, line: &LineItemDraft) -> Option<NewOrderItem> {
        if line.product_id.trim().is_empty() || self.resolve_name(line).is_empty() {
            return None;
        }
        Some(NewOrderItem {
            product_id: line.parsed_product_id()?,
            quantity: line.parsed_quantity()?,
        })
    }

    fn resolve_name(&self, line: &LineItemDraft) -> String {
        line.parsed_product_id()
            .and_then(|id| self.catalog.lookup(id))
            .map(|product| product.name)
            .unwrap_or_default()
    }
}
