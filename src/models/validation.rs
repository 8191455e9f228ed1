use crate::errors::PushError;

pub fn validate_device_token(token: &str) -> Result<(), PushError> {
    if token.is_empty() {
        return Err(PushError::Configuration(
            "Device token cannot be empty".to_string(),
        ));
    }

    // Tokens travel comma-joined in a single field.
    if token.contains(',') {
        return Err(PushError::Configuration(format!(
            "Device token '{}' contains a comma",
            token
        )));
    }

    if token.chars().any(char::is_whitespace) {
        return Err(PushError::Configuration(format!(
            "Device token '{}' contains whitespace",
            token
        )));
    }

    Ok(())
}
