use mural_core::{Error, Result};

pub fn require_non_empty(field: &str, v: &str) -> Result<()> {
    if v.trim().is_empty() {
        return Err(Error::invalid_input(format!("'{field}' must not be empty")));
    }
    Ok(())
}
