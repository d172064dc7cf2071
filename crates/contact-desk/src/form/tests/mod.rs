mod common;
mod live_validation;
