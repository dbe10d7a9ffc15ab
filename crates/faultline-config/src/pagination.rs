use serde::Deserialize;

/// Paging limits for list endpoints
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaginationConfig {
    /// Page size used when the client does not send `showCount`
    #[serde(default = "default_show_count")]
    pub default_show_count: u32,
    /// Upper bound a client may request
    #[serde(default = "default_max_show_count")]
    pub max_show_count: u32,
}

impl PaginationConfig {
    /// Page size to use for a client request, clamped to `1..=max_show_count`
    pub fn show_count(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.default_show_count)
            .clamp(1, self.max_show_count.max(1))
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_show_count: default_show_count(),
            max_show_count: default_max_show_count(),
        }
    }
}

const fn default_show_count() -> u32 {
    20
}

const fn default_max_show_count() -> u32 {
    100
}
