use utoipa::IntoParams;

#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeviceDataQuery {
    /// Number of most recent rows to return (default 100). Non-numeric
    /// values fall back to the default instead of failing.
    #[param(value_type = Option<u64>)]
    pub limit: Option<String>,
}

impl DeviceDataQuery {
    /// Build from raw query pairs. A repeated `limit` key keeps its first
    /// value; unknown keys are ignored.
    #[must_use]
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let limit = pairs
            .into_iter()
            .find_map(|(key, value)| (key == "limit").then_some(value));
        Self { limit }
    }
}
