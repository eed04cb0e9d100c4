use uuid::Uuid;

#[derive(Debug)]
pub enum AppError {
    ActionNotFound(Uuid),
    DepthExceeded { action_id: Uuid, depth: u32 },
    InvalidName(String),
    Transport(reqwest::Error),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::ActionNotFound(id) => write!(f, "No action found for id {id}"),
            AppError::DepthExceeded { action_id, depth } => write!(
                f,
                "Follow-up dispatch for action {action_id} stopped at depth {depth}"
            ),
            AppError::InvalidName(name) => write!(f, "{name} is not a valid action name"),
            AppError::Transport(err) => write!(f, "Action API request failed: {err}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Transport(err)
    }
}
