use anyhow::{anyhow, Result};

/// Validate a single wellness dimension rating
pub fn validate_score(value: i32, field_name: &str) -> Result<()> {
    if !(0..=100).contains(&value) {
        return Err(anyhow!("{} must be between 0 and 100", field_name));
    }
    Ok(())
}

/// Validate a chat message role as stored with the conversation history
pub fn validate_chat_role(role: &str) -> Result<()> {
    match role {
        "user" | "assistant" => Ok(()),
        _ => Err(anyhow!("Role must be 'user' or 'assistant'")),
    }
}

/// Validate a completion request role (system turns are allowed there)
pub fn validate_completion_role(role: &str) -> Result<()> {
    match role {
        "user" | "assistant" | "system" => Ok(()),
        _ => Err(anyhow!("Role must be 'user', 'assistant' or 'system'")),
    }
}

/// Validate the requested number of action-plan weeks
pub fn validate_week_count(weeks: i32) -> Result<()> {
    if !(1..=12).contains(&weeks) {
        return Err(anyhow!("Week count must be between 1 and 12"));
    }
    Ok(())
}

/// Validate an HSA dollar amount
pub fn validate_amount(value: f64, field_name: &str) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(anyhow!("{} must be a non-negative amount", field_name));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_validation() {
        assert!(validate_score(0, "physical").is_ok());
        assert!(validate_score(100, "physical").is_ok());
        assert!(validate_score(-1, "physical").is_err());
        assert!(validate_score(101, "physical").is_err());
    }

    #[test]
    fn test_chat_role_validation() {
        assert!(validate_chat_role("user").is_ok());
        assert!(validate_chat_role("assistant").is_ok());
        assert!(validate_chat_role("system").is_err());
        assert!(validate_chat_role("").is_err());
    }

    #[test]
    fn test_completion_role_validation() {
        assert!(validate_completion_role("system").is_ok());
        assert!(validate_completion_role("moderator").is_err());
    }

    #[test]
    fn test_week_count_validation() {
        assert!(validate_week_count(1).is_ok());
        assert!(validate_week_count(4).is_ok());
        assert!(validate_week_count(0).is_err());
        assert!(validate_week_count(13).is_err());
    }

    #[test]
    fn test_amount_validation() {
        assert!(validate_amount(0.0, "balance").is_ok());
        assert!(validate_amount(2450.0, "balance").is_ok());
        assert!(validate_amount(-1.0, "balance").is_err());
        assert!(validate_amount(f64::NAN, "balance").is_err());
    }
}
