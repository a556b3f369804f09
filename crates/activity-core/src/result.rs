use crate::error::ActivityError;

pub type ActivityResult<T> = Result<T, ActivityError>;
