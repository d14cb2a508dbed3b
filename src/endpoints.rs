//! Backend endpoint table, shared by the native client and the browser.

/// Version prefix every backend path lives under
pub const API_PREFIX: &str = "/api/v1";

pub const SEND_OTP: &str = "/auth/send-otp";
pub const VERIFY_OTP: &str = "/auth/verify-otp";
pub const LOGOUT: &str = "/auth/logout";
pub const ME: &str = "/users/me";
pub const UPCOMING_DINNERS: &str = "/dinner/upcoming";
pub const OPT_IN: &str = "/dinner/opt-in";
pub const MY_BOOKINGS: &str = "/dinner/my-bookings";
pub const OPTED_IN_DINNERS: &str = "/dinner/dinners/user-view";
pub const JOURNEY_SAVE: &str = "/journey/save";
pub const JOURNEY_SUBMIT: &str = "/journey/submit";
pub const CHECKOUT_SESSION: &str = "/subscription/create-checkout-session";
pub const SESSION_INFO: &str = "/subscription/session-info";
pub const CANCEL_SUBSCRIPTION: &str = "/subscription/cancel";
pub const ADMIN_LOGIN: &str = "/admin/login";
pub const ADMIN_CREATE_DINNER: &str = "/admin/dinner/create";
pub const ADMIN_DINNERS: &str = "/admin/dinner/all";

/// Absolute URL for an endpoint. Trailing slashes on the base are ignored.
pub fn url(base: &str, path: &str) -> String {
    format!("{}{}{}", base.trim_end_matches('/'), API_PREFIX, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_prefix() {
        assert_eq!(
            url("https://api.example.com/", SEND_OTP),
            "https://api.example.com/api/v1/auth/send-otp"
        );
        assert_eq!(
            url("http://127.0.0.1:3000", OPTED_IN_DINNERS),
            "http://127.0.0.1:3000/api/v1/dinner/dinners/user-view"
        );
    }
}
