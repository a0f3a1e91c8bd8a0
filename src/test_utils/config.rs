use crate::config::ApiConfig;

/// An [`ApiConfig`] pointed at a test server, with fixed meter identifiers
/// that the HTTP tests assert against in resource paths.
pub fn test_api_config(url: String) -> ApiConfig {
    ApiConfig {
        url,
        api_key: "test_api_key".to_string(),
        account_number: "A-TEST1234".to_string(),
        electricity_mpan: "test-mpan".to_string(),
        electricity_serial: "test-elec-serial".to_string(),
        gas_mprn: "test-mprn".to_string(),
        gas_serial: "test-gas-serial".to_string(),
    }
}
