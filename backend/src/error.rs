/// Which half of the setup sequence failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStage {
    ContextCreation,
    FunctionLoading,
}

/// Fatal errors raised while bringing up the window and its OpenGL context.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SetupError {
    #[error("Failed to initialize SDL: {0}")]
    Init(String),

    #[error("Failed to create window: {0}")]
    Window(String),

    #[error("Failed to create OpenGL context: {0}")]
    Context(String),

    #[error("Failed to make OpenGL context current: {0}")]
    MakeCurrent(String),

    #[error("Failed to create event pump: {0}")]
    EventPump(String),

    #[error("Failed to load OpenGL function pointers: {missing} is unavailable")]
    Loader { missing: &'static str },
}

impl SetupError {
    pub fn stage(&self) -> SetupStage {
        match self {
            SetupError::Loader { .. } => SetupStage::FunctionLoading,
            _ => SetupStage::ContextCreation,
        }
    }

    /// Process exit status to report for this error. Never zero.
    pub fn exit_status(&self) -> u8 {
        match self.stage() {
            SetupStage::ContextCreation => 1,
            SetupStage::FunctionLoading => 2,
        }
    }
}
