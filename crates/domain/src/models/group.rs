//! Group domain models.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to create a group.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateGroupRequest {
    #[validate(custom(function = "shared::validation::validate_title"))]
    pub title: String,

    #[validate(custom(function = "shared::validation::validate_display_name"))]
    pub host_name: String,

    /// Group capacity, fixed at creation.
    #[validate(range(min = 1, message = "max_members must be at least 1"))]
    pub max_members: u32,
}

/// Response after creating a group.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CreateGroupResponse {
    pub code: String,
    /// Host capability link; embeds the host token as a query parameter.
    pub admin_link: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_group_request_validation() {
        let valid = CreateGroupRequest {
            title: "Awards night".into(),
            host_name: "Ana".into(),
            max_members: 5,
        };
        assert!(valid.validate().is_ok());

        let blank_title = CreateGroupRequest {
            title: "   ".into(),
            host_name: "Ana".into(),
            max_members: 5,
        };
        assert!(blank_title.validate().is_err());

        let zero_capacity = CreateGroupRequest {
            title: "Awards night".into(),
            host_name: "Ana".into(),
            max_members: 0,
        };
        assert!(zero_capacity.validate().is_err());

        let long_host_name = CreateGroupRequest {
            title: "Awards night".into(),
            host_name: "h".repeat(41),
            max_members: 5,
        };
        assert!(long_host_name.validate().is_err());
    }
}
