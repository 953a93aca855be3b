use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("State not registered: {type_name}")]
    StateNotFound { type_name: &'static str },
    #[error("Compute not registered: {type_name}")]
    ComputeNotFound { type_name: &'static str },
    #[error("Command not registered: {type_name}")]
    CommandNotFound { type_name: &'static str },
    #[error("{type_name} is missing from the command snapshot")]
    NotInSnapshot { type_name: &'static str },
}

impl Error {
    pub fn state_not_found<T>() -> Self {
        Self::StateNotFound {
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn compute_not_found<T>() -> Self {
        Self::ComputeNotFound {
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn command_not_found<T>() -> Self {
        Self::CommandNotFound {
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn not_in_snapshot<T>() -> Self {
        Self::NotInSnapshot {
            type_name: std::any::type_name::<T>(),
        }
    }
}
