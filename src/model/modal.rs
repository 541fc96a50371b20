//! Modal stack for managing overlays
//!
//! Replaces scattered visibility booleans (show_url_dialog, show_alert, ...)
//! with an enum-based modal stack; only the top modal receives input.

/// Represents a modal overlay displayed on top of the workspace
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// URL import dialog with the address being typed
    UrlImport { url: String },
    /// File import dialog with the path being typed
    FileImport { path: String },
    /// Blocking alert; must be dismissed before anything else
    Alert { message: String },
    /// Export/import history overlay
    History { selected_index: usize },
    /// Keyboard shortcut help
    Help { scroll_offset: usize },
}

/// A stack of modal overlays
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Modal> {
        self.stack.last_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_pop_is_lifo() {
        let mut stack = ModalStack::new();
        assert!(stack.top().is_none());

        stack.push(Modal::QuitConfirm);
        stack.push(Modal::Alert {
            message: "boom".to_string(),
        });

        assert_eq!(
            stack.pop(),
            Some(Modal::Alert {
                message: "boom".to_string()
            })
        );
        assert_eq!(stack.pop(), Some(Modal::QuitConfirm));
        assert!(stack.is_empty());
    }

    #[test]
    fn top_mut_edits_in_place() {
        let mut stack = ModalStack::new();
        stack.push(Modal::UrlImport { url: String::new() });

        if let Some(Modal::UrlImport { url }) = stack.top_mut() {
            url.push_str("example.com");
        }

        assert_eq!(
            stack.top(),
            Some(&Modal::UrlImport {
                url: "example.com".to_string()
            })
        );
    }
}
