pub mod console;
pub mod persistence;
pub mod registry;

#[cfg(test)]
pub(crate) mod test_support;
