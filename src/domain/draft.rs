use super::ProductId;

/// Which user-editable field of a draft line is being changed.
///
/// The product name is not listed: it is derived from the product id and
/// the catalog snapshot whenever it is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineField {
    ProductId,
    Quantity,
}

/// One not-yet-submitted line, holding the raw user input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineItemDraft {
    pub product_id: String,
    pub quantity: String,
}

impl LineItemDraft {
    /// Numeric product id, or `None` when empty or not a number.
    pub fn parsed_product_id(&self) -> Option<ProductId> {
        self.product_id.trim().parse().ok()
    }

    /// Quantity as a strictly positive integer.
    pub fn parsed_quantity(&self) -> Option<u32> {
        self.quantity.trim().parse().ok().filter(|quantity| *quantity > 0)
    }
}

/// Ordered, never-empty list of draft lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    lines: Vec<LineItemDraft>,
}

impl Default for OrderDraft {
    fn default() -> Self {
        Self {
            lines: vec![LineItemDraft::default()],
        }
    }
}

impl OrderDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[LineItemDraft] {
        &self.lines
    }

    /// Mutable access to a single line; siblings are left untouched.
    pub fn line_mut(&mut self, index: usize) -> Option<&mut LineItemDraft> {
        self.lines.get_mut(index)
    }

    pub fn push_empty(&mut self) {
        self.lines.push(LineItemDraft::default());
    }

    /// True when the draft is back to its single empty row.
    pub fn is_pristine(&self) -> bool {
        *self == Self::default()
    }
}

/// Read view of a draft line with its product name resolved against the
/// current catalog snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedLine {
    pub product_id: String,
    pub product_name: String,
    pub quantity: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(quantity: &str) -> LineItemDraft {
        LineItemDraft {
            product_id: "7".to_string(),
            quantity: quantity.to_string(),
        }
    }

    #[test]
    fn test_new_draft_has_one_empty_line() {
        let draft = OrderDraft::new();
        assert_eq!(draft.lines(), &[LineItemDraft::default()]);
        assert!(draft.is_pristine());
    }

    #[test]
    fn test_quantity_must_be_positive_integer() {
        assert_eq!(line("3").parsed_quantity(), Some(3));
        assert_eq!(line(" 2 ").parsed_quantity(), Some(2));
        assert_eq!(line("0").parsed_quantity(), None);
        assert_eq!(line("-1").parsed_quantity(), None);
        assert_eq!(line("").parsed_quantity(), None);
        assert_eq!(line("abc").parsed_quantity(), None);
    }
}
