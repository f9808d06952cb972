pub mod application;
pub mod presentation;

#[cfg(test)]
pub(crate) mod test_support;
