//! Compile artifacts and export helpers.

/// Text and binary renderings of the last successful compile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputBundle {
    /// Textual rendering (e.g. wat) shown in the output editor.
    pub text: String,
    /// Binary module bytes offered for download.
    pub binary: Vec<u8>,
}

impl OutputBundle {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.binary.is_empty()
    }
}

/// Filename the binary is exported under, derived from the backend id.
pub fn export_filename(backend_id: &str) -> String {
    format!("{}.module.wasm", backend_id.to_lowercase())
}

/// Human-readable byte size for the footer display.
pub fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    let bytes_f = bytes as f64;
    if bytes_f >= MB {
        format!("{:.1} MB", bytes_f / MB)
    } else if bytes_f >= KB {
        format!("{:.1} KB", bytes_f / KB)
    } else {
        format!("{bytes} B")
    }
}
