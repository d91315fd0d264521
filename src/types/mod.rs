mod user;

pub use user::{Address, Company, User, UserDraft};

#[cfg(test)]
pub(crate) use user::sample_draft;
