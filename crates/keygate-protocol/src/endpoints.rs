/// Credential check for an existing account.
pub const LOGIN: &str = "/login";

/// Account creation.
pub const REGISTER: &str = "/register";
