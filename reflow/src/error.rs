use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Container width not measured yet; pagination deferred")]
    LayoutPending,

    #[error("Invalid font size: {0}px (must be finite and positive)")]
    InvalidFontSize(f32),

    #[error("Measurement surface unavailable: {0}")]
    MeasurementUnavailable(String),

    #[error("Unknown width class: {0}. Use narrow, comfort or wide.")]
    UnknownWidthClass(String),
}

impl LayoutError {
    /// Whether the condition clears on its own once the host can measure.
    pub fn is_deferral(&self) -> bool {
        matches!(
            self,
            LayoutError::LayoutPending | LayoutError::MeasurementUnavailable(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, LayoutError>;
