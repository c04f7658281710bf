pub(super) fn default_api_url() -> String {
    "https://api.telegram.org".to_string()
}
