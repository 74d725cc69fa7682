pub mod app_config;
pub mod traits;

#[cfg(test)]
pub mod test_support;
