use serde::{Deserialize, Serialize};
use tarifa_core::TarifaError;

fn default_observations_table() -> String {
    "hotel_usuario".to_string()
}

fn default_events_table() -> String {
    "events".to_string()
}

fn default_property_id_column() -> String {
    "user_id".to_string()
}

fn default_property_name_column() -> String {
    "hotel_name".to_string()
}

fn default_order_column() -> String {
    "checkin_date".to_string()
}

/// Connection settings for a PostgREST/Supabase project.
///
/// Passed explicitly at construction; nothing is read from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    pub base_url: String,
    /// Project API key, sent as `apikey`.
    pub api_key: String,
    /// Signed-in user's JWT; when set it replaces the API key as bearer token.
    #[serde(default)]
    pub user_jwt: Option<String>,
    /// Table holding scraped price observations.
    #[serde(default = "default_observations_table")]
    pub observations_table: String,
    /// Table holding local events.
    #[serde(default = "default_events_table")]
    pub events_table: String,
    /// Column matched by `PropertyRef::Id`.
    #[serde(default = "default_property_id_column")]
    pub property_id_column: String,
    /// Column matched by `PropertyRef::Name`.
    #[serde(default = "default_property_name_column")]
    pub property_name_column: String,
    /// Column observations are sorted by (ascending).
    #[serde(default = "default_order_column")]
    pub order_column: String,
}

impl SupabaseConfig {
    /// Settings with the default table names.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            user_jwt: None,
            observations_table: default_observations_table(),
            events_table: default_events_table(),
            property_id_column: default_property_id_column(),
            property_name_column: default_property_name_column(),
            order_column: default_order_column(),
        }
    }

    /// Act on behalf of a signed-in user.
    #[must_use]
    pub fn with_user_jwt(mut self, jwt: impl Into<String>) -> Self {
        self.user_jwt = Some(jwt.into());
        self
    }

    /// Override the observations table.
    #[must_use]
    pub fn with_observations_table(mut self, table: impl Into<String>) -> Self {
        self.observations_table = table.into();
        self
    }

    /// Override the events table.
    #[must_use]
    pub fn with_events_table(mut self, table: impl Into<String>) -> Self {
        self.events_table = table.into();
        self
    }

    /// Override the columns used to look up and order observations, e.g.
    /// `("nombre", "fecha")` for a table with Spanish column names.
    #[must_use]
    pub fn with_observation_columns(
        mut self,
        property_name_column: impl Into<String>,
        order_column: impl Into<String>,
    ) -> Self {
        self.property_name_column = property_name_column.into();
        self.order_column = order_column.into();
        self
    }

    pub(crate) fn validate(&self) -> Result<(), TarifaError> {
        if self.base_url.trim().is_empty() {
            return Err(TarifaError::InvalidArg("base_url must not be empty".into()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(TarifaError::InvalidArg(format!(
                "base_url must be an http(s) URL, got {}",
                self.base_url
            )));
        }
        if self.api_key.trim().is_empty() {
            return Err(TarifaError::InvalidArg("api_key must not be empty".into()));
        }
        for (label, table) in [
            ("observations_table", &self.observations_table),
            ("events_table", &self.events_table),
            ("property_id_column", &self.property_id_column),
            ("property_name_column", &self.property_name_column),
            ("order_column", &self.order_column),
        ] {
            if table.trim().is_empty() {
                return Err(TarifaError::InvalidArg(format!("{label} must not be empty")));
            }
        }
        Ok(())
    }

    pub(crate) fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url.trim_end_matches('/'))
    }

    pub(crate) fn bearer(&self) -> &str {
        self.user_jwt.as_deref().unwrap_or(&self.api_key)
    }
}
